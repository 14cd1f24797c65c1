//! Breadth-first search over the station graph.
//!
//! A search visits stations level by level from a single source and
//! records, for every station it reaches, the minimum number of hops and
//! the station it was discovered from. Results live in a [`Traversal`]
//! owned by the caller, so the network itself is never mutated by a search.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::domain::{StationCode, StationId};
use crate::network::MetroNetwork;

/// Error from starting a search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The source code is not in the network
    #[error("unknown source station: {0}")]
    UnknownSource(StationCode),
}

/// Progress marker for a station during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitState {
    /// Not reached yet.
    #[default]
    Unvisited,
    /// Reached and waiting in the queue.
    Discovered,
    /// Dequeued and all its connections examined.
    Finalized,
}

/// Search result for a single station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visit {
    /// Hop count from the source, `None` while unreachable.
    pub distance: Option<u32>,

    /// Station this one was discovered from.
    pub parent: Option<StationId>,

    /// Search progress.
    pub state: VisitState,
}

/// Per-station results of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    source: Option<StationId>,
    visits: Vec<Visit>,
}

impl Traversal {
    /// A reset traversal: every station unvisited, at infinite distance and
    /// without a parent.
    pub fn unvisited(station_count: usize) -> Self {
        Self {
            source: None,
            visits: vec![Visit::default(); station_count],
        }
    }

    /// Station the search started from, or `None` if no search has run
    /// since the last reset.
    pub fn source(&self) -> Option<StationId> {
        self.source
    }

    /// Returns true if a search has populated this traversal.
    pub fn has_run(&self) -> bool {
        self.source.is_some()
    }

    /// Result for a station.
    pub fn visit(&self, id: StationId) -> Option<&Visit> {
        self.visits.get(id.0)
    }

    /// Hop count from the source, `None` if unreachable.
    pub fn distance(&self, id: StationId) -> Option<u32> {
        self.visit(id).and_then(|v| v.distance)
    }

    /// Station the given one was discovered from.
    pub fn parent(&self, id: StationId) -> Option<StationId> {
        self.visit(id).and_then(|v| v.parent)
    }

    /// Search progress of a station.
    pub fn state(&self, id: StationId) -> VisitState {
        self.visit(id).map(|v| v.state).unwrap_or_default()
    }

    /// Stations reached by the search with their distances, in id order.
    pub fn reachable(&self) -> impl Iterator<Item = (StationId, u32)> + '_ {
        self.visits
            .iter()
            .enumerate()
            .filter_map(|(idx, v)| v.distance.map(|d| (StationId(idx), d)))
    }

    /// Number of stations reached, including the source.
    pub fn reachable_count(&self) -> usize {
        self.reachable().count()
    }

    /// Explore the network from `source`.
    ///
    /// Expects a reset traversal. Connections are examined in their stored
    /// order, so among equally short routes the one through the earliest
    /// discovered station wins.
    fn explore(&mut self, network: &MetroNetwork, source: StationId) {
        self.source = Some(source);

        let mut queue = VecDeque::new();
        self.visits[source.0] = Visit {
            distance: Some(0),
            parent: None,
            state: VisitState::Discovered,
        };
        queue.push_back(source);

        while let Some(current) = queue.pop_front() {
            self.visits[current.0].state = VisitState::Finalized;
            let distance = self.visits[current.0].distance.unwrap_or_default();

            for &next in network.neighbors(current) {
                let visit = &mut self.visits[next.0];
                if visit.state != VisitState::Unvisited {
                    continue;
                }

                *visit = Visit {
                    distance: Some(distance + 1),
                    parent: Some(current),
                    state: VisitState::Discovered,
                };
                trace!(station = next.0, distance = distance + 1, "Discovered station");
                queue.push_back(next);
            }
        }
    }
}

/// Run a search from `source` over the whole network.
///
/// Fails if the source code is not in the network.
pub fn breadth_first(network: &MetroNetwork, source: &StationCode) -> Result<Traversal, SearchError> {
    let mut traversal = Traversal::unvisited(network.len());
    run_into(network, &mut traversal, source)?;
    Ok(traversal)
}

/// Reset `traversal` and search from `source` into it.
///
/// The reset happens even when the source is unknown.
pub(super) fn run_into(
    network: &MetroNetwork,
    traversal: &mut Traversal,
    source: &StationCode,
) -> Result<(), SearchError> {
    *traversal = Traversal::unvisited(network.len());

    let source_id = network
        .id_of(source)
        .ok_or_else(|| SearchError::UnknownSource(source.clone()))?;

    traversal.explore(network, source_id);

    debug!(
        source = %source,
        reachable = traversal.reachable_count(),
        stations = network.len(),
        "BFS complete"
    );

    Ok(())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Random undirected graphs as (station count, edge list).
    fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (1usize..20).prop_flat_map(|n| {
            let edges = prop::collection::vec((0..n, 0..n), 0..40);
            (Just(n), edges)
        })
    }

    fn build(n: usize, edges: &[(usize, usize)]) -> MetroNetwork {
        let mut network = MetroNetwork::new();
        for i in 0..n {
            network.insert(StationCode::parse(&format!("S{i}")).unwrap());
        }
        for &(a, b) in edges {
            let a = StationCode::parse(&format!("S{a}")).unwrap();
            let b = StationCode::parse(&format!("S{b}")).unwrap();
            // Self-connections are rejected; ignore them here
            let _ = network.connect(&a, &b);
        }
        network
    }

    /// Reference hop counts by repeated relaxation.
    fn reference_distances(network: &MetroNetwork, source: usize) -> Vec<Option<u32>> {
        let mut dist = vec![None; network.len()];
        dist[source] = Some(0u32);
        loop {
            let mut changed = false;
            for (id, _) in network.stations() {
                let Some(d) = dist[id.0] else { continue };
                for next in network.neighbors(id) {
                    if dist[next.0].is_none_or(|cur| cur > d + 1) {
                        dist[next.0] = Some(d + 1);
                        changed = true;
                    }
                }
            }
            if !changed {
                return dist;
            }
        }
    }

    proptest! {
        /// BFS distances match the reference hop counts
        #[test]
        fn distances_are_minimal((n, edges) in graph_strategy(), source in 0usize..20) {
            let source = source % n;
            let network = build(n, &edges);
            let code = StationCode::parse(&format!("S{source}")).unwrap();
            let traversal = breadth_first(&network, &code).unwrap();

            let expected = reference_distances(&network, source);
            for (id, _) in network.stations() {
                prop_assert_eq!(traversal.distance(id), expected[id.0]);
            }
        }

        /// Every parent is one hop closer and actually connected
        #[test]
        fn parents_are_valid((n, edges) in graph_strategy()) {
            let network = build(n, &edges);
            let traversal = breadth_first(&network, &StationCode::parse("S0").unwrap()).unwrap();

            for (id, d) in traversal.reachable() {
                match traversal.parent(id) {
                    None => prop_assert_eq!(d, 0),
                    Some(parent) => {
                        prop_assert_eq!(traversal.distance(parent), Some(d - 1));
                        prop_assert!(network.neighbors(parent).contains(&id));
                    }
                }
            }
        }
    }
}

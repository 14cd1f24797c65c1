//! Route reconstruction from search results.

use std::fmt;

use serde::Serialize;

use crate::domain::{StationCode, StationId};
use crate::network::MetroNetwork;

use super::bfs::Traversal;

/// Error from a route query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The destination code is not in the network
    #[error("unknown destination station: {0}")]
    UnknownStation(StationCode),

    /// The destination exists but the search never reached it
    #[error("no path from {name}")]
    Unreachable { code: StationCode, name: String },

    /// No search has been run since the last reset
    #[error("no search has been run")]
    NotRun,
}

/// Walk parent links back from `dest` and return the stations from the
/// search source to `dest`, inclusive.
///
/// Returns `None` if the search did not reach `dest`.
pub fn reconstruct_path(traversal: &Traversal, dest: StationId) -> Option<Vec<StationId>> {
    let distance = traversal.distance(dest)?;

    let mut path = Vec::with_capacity(distance as usize + 1);
    let mut current = Some(dest);
    while let Some(id) = current {
        path.push(id);
        current = traversal.parent(id);
    }
    path.reverse();

    Some(path)
}

/// A station on a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteStop {
    /// Station code
    pub code: String,

    /// Display name
    pub name: String,
}

/// Shortest route between two stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    stops: Vec<RouteStop>,
}

impl Route {
    /// Build a route from station ids in travel order.
    pub(super) fn from_ids(network: &MetroNetwork, ids: &[StationId]) -> Self {
        let stops = ids
            .iter()
            .filter_map(|id| network.station(*id))
            .map(|station| RouteStop {
                code: station.code().to_string(),
                name: station.display_name().to_string(),
            })
            .collect();

        Self { stops }
    }

    /// Stations on the route, origin first.
    pub fn stops(&self) -> &[RouteStop] {
        &self.stops
    }

    /// Display names in travel order.
    pub fn names(&self) -> Vec<&str> {
        self.stops.iter().map(|s| s.name.as_str()).collect()
    }

    /// Number of connections travelled.
    pub fn hops(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }

    /// First station of the route.
    pub fn origin(&self) -> Option<&RouteStop> {
        self.stops.first()
    }

    /// Last station of the route.
    pub fn destination(&self) -> Option<&RouteStop> {
        self.stops.last()
    }
}

/// Renders as `Jurong East -> Bukit Batok -> Bukit Gombak.`
impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, stop) in self.stops.iter().enumerate() {
            if idx > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(&stop.name)?;
        }
        f.write_str(".")
    }
}

/// JSON form of a route.
#[derive(Debug, Serialize)]
pub struct RouteDto<'a> {
    /// Origin station code
    pub from: &'a str,

    /// Destination station code
    pub to: &'a str,

    /// Number of connections travelled
    pub hops: usize,

    /// Stations in travel order
    pub stops: &'a [RouteStop],
}

impl<'a> From<&'a Route> for RouteDto<'a> {
    fn from(route: &'a Route) -> Self {
        Self {
            from: route.origin().map(|s| s.code.as_str()).unwrap_or_default(),
            to: route.destination().map(|s| s.code.as_str()).unwrap_or_default(),
            hops: route.hops(),
            stops: route.stops(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::breadth_first;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn line_network() -> MetroNetwork {
        let mut network = MetroNetwork::new();
        for (c, name) in [("A", "Alpha"), ("B", "Bravo"), ("C", "Charlie"), ("Z", "Zulu")] {
            network.insert(code(c)).unwrap().name = Some(name.to_string());
        }
        network.connect(&code("A"), &code("B")).unwrap();
        network.connect(&code("B"), &code("C")).unwrap();
        network
    }

    #[test]
    fn path_runs_source_to_destination() {
        let network = line_network();
        let traversal = breadth_first(&network, &code("A")).unwrap();
        let dest = network.id_of(&code("C")).unwrap();

        let path = reconstruct_path(&traversal, dest).unwrap();
        let codes: Vec<&str> = path
            .iter()
            .map(|id| network.station(*id).unwrap().code().as_str())
            .collect();
        assert_eq!(codes, vec!["A", "B", "C"]);
    }

    #[test]
    fn path_to_source_is_single_station() {
        let network = line_network();
        let traversal = breadth_first(&network, &code("B")).unwrap();
        let source = network.id_of(&code("B")).unwrap();

        assert_eq!(reconstruct_path(&traversal, source), Some(vec![source]));
    }

    #[test]
    fn unreached_destination_has_no_path() {
        let network = line_network();
        let traversal = breadth_first(&network, &code("A")).unwrap();
        let island = network.id_of(&code("Z")).unwrap();

        assert_eq!(reconstruct_path(&traversal, island), None);
    }

    #[test]
    fn reset_traversal_has_no_paths() {
        let network = line_network();
        let traversal = Traversal::unvisited(network.len());

        for (id, _) in network.stations() {
            assert_eq!(reconstruct_path(&traversal, id), None);
        }
    }

    #[test]
    fn route_display() {
        let network = line_network();
        let ids: Vec<StationId> = ["A", "B", "C"]
            .iter()
            .map(|c| network.id_of(&code(c)).unwrap())
            .collect();
        let route = Route::from_ids(&network, &ids);

        assert_eq!(route.to_string(), "Alpha -> Bravo -> Charlie.");
        assert_eq!(route.hops(), 2);
        assert_eq!(route.names(), vec!["Alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn single_stop_route_display() {
        let network = line_network();
        let route = Route::from_ids(&network, &[network.id_of(&code("Z")).unwrap()]);

        assert_eq!(route.to_string(), "Zulu.");
        assert_eq!(route.hops(), 0);
    }

    #[test]
    fn route_dto_json() {
        let network = line_network();
        let ids: Vec<StationId> = ["A", "B"]
            .iter()
            .map(|c| network.id_of(&code(c)).unwrap())
            .collect();
        let route = Route::from_ids(&network, &ids);

        let json = serde_json::to_value(RouteDto::from(&route)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "from": "A",
                "to": "B",
                "hops": 1,
                "stops": [
                    { "code": "A", "name": "Alpha" },
                    { "code": "B", "name": "Bravo" }
                ]
            })
        );
    }

    #[test]
    fn error_display() {
        let err = PathError::UnknownStation(code("Q"));
        assert_eq!(err.to_string(), "unknown destination station: Q");

        let err = PathError::Unreachable {
            code: code("Z"),
            name: "Zulu".to_string(),
        };
        assert_eq!(err.to_string(), "no path from Zulu");

        assert_eq!(PathError::NotRun.to_string(), "no search has been run");
    }
}

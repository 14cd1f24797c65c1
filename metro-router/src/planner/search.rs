//! Shortest route queries.
//!
//! A `Planner` runs one breadth-first search at a time against a loaded
//! network and answers any number of route queries from its result
//! without searching again.

use tracing::debug;

use crate::domain::StationCode;
use crate::network::MetroNetwork;

use super::bfs::{SearchError, Traversal, run_into};
use super::path::{PathError, Route, reconstruct_path};

/// Route planner over a loaded network.
pub struct Planner<'a> {
    network: &'a MetroNetwork,
    traversal: Traversal,
}

impl<'a> Planner<'a> {
    /// Create a planner. No search has run yet.
    pub fn new(network: &'a MetroNetwork) -> Self {
        Self {
            network,
            traversal: Traversal::unvisited(network.len()),
        }
    }

    /// The network being searched.
    pub fn network(&self) -> &'a MetroNetwork {
        self.network
    }

    /// Result of the latest search.
    pub fn traversal(&self) -> &Traversal {
        &self.traversal
    }

    /// Discard the latest search result.
    pub fn reset(&mut self) {
        self.traversal = Traversal::unvisited(self.network.len());
    }

    /// Search from `source`, replacing any earlier result.
    ///
    /// On failure the planner is left reset, so later route queries report
    /// [`PathError::NotRun`].
    pub fn run(&mut self, source: &StationCode) -> Result<&Traversal, SearchError> {
        run_into(self.network, &mut self.traversal, source)?;
        Ok(&self.traversal)
    }

    /// Hop count from the latest source to `dest`.
    pub fn distance_to(&self, dest: &StationCode) -> Result<u32, PathError> {
        let id = self
            .network
            .id_of(dest)
            .ok_or_else(|| PathError::UnknownStation(dest.clone()))?;

        if !self.traversal.has_run() {
            return Err(PathError::NotRun);
        }

        self.traversal
            .distance(id)
            .ok_or_else(|| self.unreachable(dest))
    }

    /// Shortest route from the latest source to `dest`.
    pub fn shortest_path(&self, dest: &StationCode) -> Result<Route, PathError> {
        let id = self
            .network
            .id_of(dest)
            .ok_or_else(|| PathError::UnknownStation(dest.clone()))?;

        if !self.traversal.has_run() {
            return Err(PathError::NotRun);
        }

        let ids = reconstruct_path(&self.traversal, id).ok_or_else(|| self.unreachable(dest))?;
        let route = Route::from_ids(self.network, &ids);

        debug!(to = %dest, hops = route.hops(), "Route found");
        Ok(route)
    }

    fn unreachable(&self, dest: &StationCode) -> PathError {
        let name = self
            .network
            .get(dest)
            .map(|s| s.display_name().to_string())
            .unwrap_or_else(|| dest.to_string());

        PathError::Unreachable {
            code: dest.clone(),
            name,
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;

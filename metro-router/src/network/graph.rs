//! Station graph storage.

use std::collections::HashMap;

use tracing::trace;

use crate::domain::{ConnectError, Station, StationCode, StationId};

/// Metro network stored as an adjacency list.
///
/// Stations are owned by the network and addressed by [`StationId`], which
/// follows insertion order. Each station keeps its outgoing connections in
/// the order they were added; breadth-first search relies on that order to
/// pick between equally short routes.
#[derive(Debug, Clone, Default)]
pub struct MetroNetwork {
    stations: Vec<Station>,
    index: HashMap<StationCode, StationId>,
    connections: Vec<Vec<StationId>>,
    directed: bool,
}

impl MetroNetwork {
    /// Create an empty undirected network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty directed network.
    ///
    /// `connect(a, b)` only records a → b.
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::default()
        }
    }

    /// Returns true if connections are one-way.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Insert a new station under `code`.
    ///
    /// Returns the new station so the caller can attach a name, or `None`
    /// if the code is already present. A duplicate insert is a no-op and
    /// leaves the existing station untouched.
    pub fn insert(&mut self, code: StationCode) -> Option<&mut Station> {
        if self.index.contains_key(&code) {
            return None;
        }

        let id = StationId(self.stations.len());
        self.index.insert(code.clone(), id);
        self.stations.push(Station::new(code));
        self.connections.push(Vec::new());

        self.stations.last_mut()
    }

    /// Connect two stations.
    ///
    /// In an undirected network both a → b and b → a are recorded. Both
    /// codes are checked before anything is written.
    pub fn connect(&mut self, a: &StationCode, b: &StationCode) -> Result<(), ConnectError> {
        let from = self
            .id_of(a)
            .ok_or_else(|| ConnectError::UnknownStation(a.clone()))?;
        let to = self
            .id_of(b)
            .ok_or_else(|| ConnectError::UnknownStation(b.clone()))?;

        if from == to {
            return Err(ConnectError::SelfConnection(a.clone()));
        }

        self.connections[from.0].push(to);
        if !self.directed {
            self.connections[to.0].push(from);
        }

        trace!(from = %a, to = %b, "Stations connected");
        Ok(())
    }

    /// Look up a station's id by code.
    pub fn id_of(&self, code: &StationCode) -> Option<StationId> {
        self.index.get(code).copied()
    }

    /// Look up a station by code.
    pub fn get(&self, code: &StationCode) -> Option<&Station> {
        self.id_of(code).map(|id| &self.stations[id.0])
    }

    /// Look up a station by id.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.0)
    }

    /// Outgoing connections of a station, in the order they were added.
    pub fn neighbors(&self, id: StationId) -> &[StationId] {
        self.connections
            .get(id.0)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Check whether `b` is one hop away from `a`.
    pub fn are_adjacent(&self, a: &StationCode, b: &StationCode) -> bool {
        match (self.id_of(a), self.id_of(b)) {
            (Some(from), Some(to)) => self.neighbors(from).contains(&to),
            _ => false,
        }
    }

    /// Iterate over all stations in insertion order.
    pub fn stations(&self) -> impl Iterator<Item = (StationId, &Station)> {
        self.stations
            .iter()
            .enumerate()
            .map(|(idx, station)| (StationId(idx), station))
    }

    /// Returns the number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if the network has no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Returns the number of connection records.
    ///
    /// In an undirected network every `connect` adds two records.
    pub fn connection_count(&self) -> usize {
        self.connections.iter().map(Vec::len).sum()
    }
}

//! Metro network graph and loading.
//!
//! The network is an undirected graph of stations. It is built once from
//! station records and not changed afterwards.

mod config;
mod graph;
mod loader;

pub use config::{InterchangePolicy, LoaderConfig};
pub use graph::MetroNetwork;
pub use loader::{LoadError, StationRecord, build_network, load_from_path, read_records};

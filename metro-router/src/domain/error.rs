//! Domain error types.
//!
//! These errors describe invalid operations against the station graph.
//! They are distinct from load-time IO and parse errors.

use super::StationCode;

/// Error returned when two stations cannot be connected.
///
/// Key checks happen before any connection record is written, so a failed
/// connect never leaves a half-built edge behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectError {
    /// One or both codes are not in the network
    #[error("station not found: {0}")]
    UnknownStation(StationCode),

    /// A station cannot be connected to itself
    #[error("station {0} cannot be connected to itself")]
    SelfConnection(StationCode),
}

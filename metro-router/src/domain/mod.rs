//! Domain types for the metro router.
//!
//! Station codes are validated at construction time, so code that receives
//! a `StationCode` can trust it is a usable key.

mod error;
mod station;

pub use error::ConnectError;
pub use station::{InvalidStationCode, Station, StationCode, StationId};

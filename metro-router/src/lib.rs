//! Metro shortest route finder.
//!
//! Loads a metro network from a station file and answers: "what is the
//! route with the fewest stops between these two stations?"

pub mod domain;
pub mod network;
pub mod planner;

//! Shortest route search.
//!
//! Routes are found with breadth-first search, so "shortest" means fewest
//! connections travelled. Line rides and interchange walks count the same.

mod bfs;
mod path;
mod search;

pub use bfs::{SearchError, Traversal, Visit, VisitState, breadth_first};
pub use path::{PathError, Route, RouteDto, RouteStop, reconstruct_path};
pub use search::Planner;

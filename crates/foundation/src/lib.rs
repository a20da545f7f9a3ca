pub mod geo;
pub mod seq;
pub mod time;

// Dependency-free building blocks shared by every crate in the workspace.
pub use geo::*;
pub use seq::*;
pub use time::*;

//! Workspace root crate.
//!
//! This crate re-exports the tuning calculator and the response simulator so
//! integration tests can depend on a single crate.

pub use sim::*;
pub use tuning::*;

//! Core types and utilities

pub mod measurement;
pub mod taxonomy;
pub mod units;

pub use measurement::*;
pub use taxonomy::*;
pub use units::*;

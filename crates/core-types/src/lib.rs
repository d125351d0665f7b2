//! # PSF Core Types
//!
//! Layer 0 of the workspace. Holds the plain data types shared by the analytics,
//! preparation and configuration crates: the return series itself, wide tables
//! of several series, and the enums that steer the calculations.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Periodicity, WindowMode};
pub use error::CoreError;
pub use structs::{Column, Observation, ReturnSeries, WideTable};

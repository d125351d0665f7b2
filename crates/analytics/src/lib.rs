//! # PSF Analytics
//!
//! Returns and risk analytics for a single instrument's periodic returns.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   charts or tables. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every function, and the `AnalyticsEngine` wrapping
//!   them, takes a `ReturnSeries` and produces a freshly allocated result.
//! - **NaN, not errors, for degenerate data:** zero volatility, single samples and
//!   empty date ranges yield NaN. Only malformed input is an `AnalyticsError`.
//!
//! ## Public API
//!
//! - `returns`: cumulative return, z-score, annualized return between dates.
//! - `statistics` / `rolling`: full-period and trailing-window statistics.
//! - `AnalyticsEngine`: the same calculations bound to a periodicity and risk-free rate.
//! - `AnalyticsResult` / `RollingAnalyticsResult`: the result DTOs.
//! - `format`: axis-label formatters for presentation layers.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod format;
pub mod report;
pub mod returns;
pub mod rolling;
pub mod statistics;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{AnalyticsEngine, RollingWindow};
pub use error::AnalyticsError;
pub use report::{AnalyticsResult, AnalyticsRow, ReturnStatistics, RollingAnalyticsResult, RollingRow};
pub use returns::{annualized_return_between_dates, cumulative_returns, cumulative_table, z_score};
pub use rolling::compute_rolling_statistics;
pub use statistics::compute_statistics;

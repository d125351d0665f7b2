//! # PSF Data Preparation
//!
//! Turns tabular market data that is already in memory into the shapes the
//! analytics and the presentation layer expect: one series per security,
//! quarter labels, quarter-end snapshots, per-security summary values and
//! display strings for market-summary tables.
//!
//! Nothing here reads or writes files.

pub mod error;
pub mod formatting;
pub mod records;
pub mod sector;
pub mod summary;
pub mod tables;

pub use error::PreparationError;
pub use formatting::{ValueFormat, format_table_values};
pub use records::{
    Dated, PreparedRow, SecurityRecord, last_day_each_quarter, prepare_securities,
    prepare_security, to_return_series, unique_securities,
};
pub use sector::map_to_sector;
pub use summary::{ProcessedSecurities, SummaryCalculation, process_securities};
pub use tables::{TableInfo, describe, split_columns};

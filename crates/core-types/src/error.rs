use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Duplicate observation date {0}")]
    DuplicateDate(NaiveDate),

    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),
}

use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Not enough data to perform calculation: {0}")]
    NotEnoughData(String),

    #[error("Invalid rolling window: {0}")]
    InvalidWindow(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

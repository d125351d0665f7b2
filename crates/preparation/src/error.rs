use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreparationError {
    #[error("Security '{0}' has no records")]
    UnknownSecurity(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

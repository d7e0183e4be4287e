use aviation_core::CalcError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecordError>;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("stored records are not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0} is required")]
    MissingField(&'static str),

    /// Flight time that is neither decimal hours nor `H:MM`.
    #[error("flight time must be decimal hours or H:MM, got {0:?}")]
    InvalidFlightTime(String),

    #[error("no record with id {0:?}")]
    NotFound(String),

    #[error(transparent)]
    Calc(#[from] CalcError),
}

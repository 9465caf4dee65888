//! Domain errors

use thiserror::Error;

/// Domain-level error types
///
/// Every fatal condition a use case can hit maps to one stable variant so
/// the API layer can render a specific status and message.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Invalid measurement unit: {0}")]
    InvalidMeasurementUnit(String),

    #[error("Reading date cannot be in the future")]
    ReadingDateNotAllowed,

    #[error("Reading not allowed: {0}")]
    ReadingNotAllowed(String),

    #[error("Only the two most recent readings of a meter can be edited")]
    ReadingNotLast,

    #[error("Only the most recent reading of a meter can be deleted")]
    CanOnlyDeleteMostRecentReading,

    #[error("Water meter {0} is not active")]
    WaterMeterInactive(String),

    #[error("No readings provided for recalculation")]
    NoReadingsProvided,

    #[error("Non-positive interval of {days} days between readings")]
    NonPositiveInterval { days: i64 },

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

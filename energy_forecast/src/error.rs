//! Error types for the energy_forecast crate

use thiserror::Error;

/// Custom error types for the energy_forecast crate
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// Empty or malformed history handed to the projector
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error related to data loading or row mapping
    #[error("Data error: {0}")]
    DataError(String),

    /// Error related to parameter validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from invalid configuration parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error parsing a period or a number
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Error from the trend primitives
    #[error("Math error: {0}")]
    MathError(#[from] trend_math::MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV decoding
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error from JSON decoding or encoding
    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ProjectionError>;

impl From<csv::Error> for ProjectionError {
    fn from(err: csv::Error) -> Self {
        ProjectionError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for ProjectionError {
    fn from(err: serde_json::Error) -> Self {
        ProjectionError::JsonError(err.to_string())
    }
}

impl From<chrono::ParseError> for ProjectionError {
    fn from(err: chrono::ParseError) -> Self {
        ProjectionError::ParseError(err.to_string())
    }
}

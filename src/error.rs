//! Error types for the bankmark service

use thiserror::Error;

/// Result type alias for bankmark operations
pub type Result<T> = std::result::Result<T, BankmarkError>;

/// Main error type for the bankmark crate
#[derive(Error, Debug)]
pub enum BankmarkError {
    #[error("Model bundle not found at {0}")]
    BundleMissing(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Inference error: {0}")]
    InferenceError(String),

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<polars::error::PolarsError> for BankmarkError {
    fn from(err: polars::error::PolarsError) -> Self {
        BankmarkError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for BankmarkError {
    fn from(err: serde_json::Error) -> Self {
        BankmarkError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BankmarkError::InferenceError("bad matrix".to_string());
        assert_eq!(err.to_string(), "Inference error: bad matrix");
    }

    #[test]
    fn test_bundle_missing_display() {
        let err = BankmarkError::BundleMissing("models/bundle.json".to_string());
        assert_eq!(err.to_string(), "Model bundle not found at models/bundle.json");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BankmarkError = io_err.into();
        assert!(matches!(err, BankmarkError::IoError(_)));
    }
}

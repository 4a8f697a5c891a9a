//! # Error Types
//!
//! Structured error types for facade_core. The unchecked pipeline
//! ([`crate::calculations::analyze`]) never fails; these errors come from
//! the checked entry point, dataset I/O, and session profile lookups.
//!
//! ## Example
//!
//! ```rust
//! use facade_core::errors::{FacadeError, FacadeResult};
//!
//! fn validate_width(width: f64) -> FacadeResult<()> {
//!     if width <= 0.0 {
//!         return Err(FacadeError::invalid_input(
//!             "module_width",
//!             width.to_string(),
//!             "Module width must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for facade_core operations
pub type FacadeResult<T> = Result<T, FacadeError>;

/// Structured error type for pipeline and dataset operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum FacadeError {
    /// A parameter value is present but unusable (zero divisor, non-finite)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required parameter is absent or NaN
    #[error("Missing required parameter: {field}")]
    MissingField { field: String },

    /// Requested profile id is not in the dataset
    #[error("Profile not found: {profile_id}")]
    ProfileNotFound { profile_id: String },

    /// Dataset has no profiles to analyze
    #[error("Dataset contains no profiles")]
    EmptyDataset,

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl FacadeError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        FacadeError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        FacadeError::MissingField {
            field: field.into(),
        }
    }

    /// Create a ProfileNotFound error
    pub fn profile_not_found(profile_id: impl Into<String>) -> Self {
        FacadeError::ProfileNotFound {
            profile_id: profile_id.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        FacadeError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        FacadeError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            FacadeError::InvalidInput { .. } => "INVALID_INPUT",
            FacadeError::MissingField { .. } => "MISSING_FIELD",
            FacadeError::ProfileNotFound { .. } => "PROFILE_NOT_FOUND",
            FacadeError::EmptyDataset => "EMPTY_DATASET",
            FacadeError::FileError { .. } => "FILE_ERROR",
            FacadeError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = FacadeError::invalid_input("module_depth", "0", "Module depth must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: FacadeError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(FacadeError::missing_field("wind_speed").error_code(), "MISSING_FIELD");
        assert_eq!(FacadeError::profile_not_found("DX-09").error_code(), "PROFILE_NOT_FOUND");
        assert_eq!(FacadeError::EmptyDataset.error_code(), "EMPTY_DATASET");
    }

    #[test]
    fn test_display_message() {
        let error = FacadeError::missing_field("tilt_angle");
        assert_eq!(error.to_string(), "Missing required parameter: tilt_angle");
    }
}

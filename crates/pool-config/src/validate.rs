//! Configuration validation errors and semantic validation.

use crate::sweep::SweepConfig;
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }

    fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<ValidationError> for pool_common::Error {
    fn from(err: ValidationError) -> Self {
        pool_common::Error::Config(err.to_string())
    }
}

/// Validate a sweep configuration semantically.
pub fn validate_sweep_config(config: &SweepConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    if config.prevalence.is_nan() || !(0.0..=1.0).contains(&config.prevalence) {
        return Err(ValidationError::invalid(
            "prevalence",
            format!("must be in [0, 1], got {}", config.prevalence),
        ));
    }

    if config.group_count == 0 {
        return Err(ValidationError::invalid("group_count", "must be at least 1"));
    }

    if config.max_group_size < 2 {
        return Err(ValidationError::invalid(
            "max_group_size",
            format!("must be at least 2, got {}", config.max_group_size),
        ));
    }

    if config.trials == 0 {
        return Err(ValidationError::invalid("trials", "must be at least 1"));
    }

    Ok(())
}

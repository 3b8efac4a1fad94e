//! Error types for pooled testing.
//!
//! Every error carries:
//! - A stable error code for machine parsing
//! - A category for grouping
//! - A headline and remediation hint for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Invalid Argument
//!   Reason: invalid argument `prevalence`: must lie in [0, 1], got 1.5
//!   Fix: Check the numeric arguments: group sizes and counts must be positive, prevalence in [0, 1].
//! ```
//!
//! # Agent-Facing Output
//!
//! ```json
//! {
//!   "code": 11,
//!   "category": "argument",
//!   "message": "empty search space: d_max = 1, need at least 2",
//!   "context": { "d_max": 1 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for pooled testing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Caller supplied an out-of-domain parameter.
    Argument,
    /// Configuration file errors.
    Config,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Argument => write!(f, "argument"),
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for pooled testing.
#[derive(Error, Debug)]
pub enum Error {
    // Argument errors (10-19)
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("empty search space: d_max = {d_max}, need at least 2")]
    EmptySearchSpace { d_max: usize },

    // Configuration errors (20-29)
    #[error("configuration error: {0}")]
    Config(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for [`Error::InvalidArgument`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Argument errors
    /// - 20-29: Configuration errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidArgument { .. } => 10,
            Error::EmptySearchSpace { .. } => 11,
            Error::Config(_) => 20,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidArgument { .. } | Error::EmptySearchSpace { .. } => {
                ErrorCategory::Argument
            }
            Error::Config(_) => ErrorCategory::Config,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::InvalidArgument { .. } => {
                "Check the numeric arguments: group sizes and counts must be positive, prevalence in [0, 1]."
            }
            Error::EmptySearchSpace { .. } => {
                "Pass a maximum group size of at least 2 so the sweep has a candidate to evaluate."
            }
            Error::Config(_) => {
                "Run 'pooltest config show' to see which file was loaded, then fix or remove it."
            }
            Error::Io(_) => "Check that the path exists and is readable.",
            Error::Json(_) => "Report payload could not be serialized. This is a bug.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::InvalidArgument { .. } => "Invalid Argument",
            Error::EmptySearchSpace { .. } => "Empty Search Space",
            Error::Config(_) => "Configuration Error",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "Serialization Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Additional structured context (e.g., the offending argument).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::InvalidArgument { name, .. } => {
                context.insert("argument".to_string(), serde_json::json!(name));
            }
            Error::EmptySearchSpace { d_max } => {
                context.insert("d_max".to_string(), serde_json::json!(d_max));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            context,
        }
    }
}

impl StructuredError {
    /// Add additional context to the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(Error::invalid("prevalence", "NaN").code(), 10);
        assert_eq!(Error::EmptySearchSpace { d_max: 1 }.code(), 11);
        assert_eq!(Error::Config("bad".into()).code(), 20);
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            Error::invalid("group_size", "zero").category(),
            ErrorCategory::Argument
        );
        assert_eq!(
            Error::EmptySearchSpace { d_max: 0 }.category(),
            ErrorCategory::Argument
        );
        assert_eq!(Error::Config("x".into()).category(), ErrorCategory::Config);
    }

    #[test]
    fn test_error_message() {
        let err = Error::invalid("prevalence", "must lie in [0, 1], got 1.5");
        assert_eq!(
            err.to_string(),
            "invalid argument `prevalence`: must lie in [0, 1], got 1.5"
        );
        assert_eq!(
            Error::EmptySearchSpace { d_max: 1 }.to_string(),
            "empty search space: d_max = 1, need at least 2"
        );
    }

    #[test]
    fn test_structured_error_from_error() {
        let structured = StructuredError::from(&Error::EmptySearchSpace { d_max: 1 });

        assert_eq!(structured.code, 11);
        assert_eq!(structured.category, ErrorCategory::Argument);
        assert_eq!(structured.context.get("d_max"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn test_structured_error_json() {
        let structured = StructuredError::from(&Error::invalid("group_count", "must be positive"))
            .with_context("value", 0);
        let json = structured.to_json();

        assert!(json.contains(r#""code":10"#));
        assert!(json.contains(r#""category":"argument""#));
        assert!(json.contains(r#""argument":"group_count""#));
        assert!(json.contains(r#""value":0"#));
    }

    #[test]
    fn test_format_error_human() {
        let err = Error::EmptySearchSpace { d_max: 0 };
        let formatted = format_error_human(&err, false);

        assert!(formatted.starts_with("✗ Empty Search Space"));
        assert!(formatted.contains("Reason: empty search space: d_max = 0"));
        assert!(formatted.contains("Fix: Pass a maximum group size"));
        assert!(!formatted.contains("\x1b["));
    }

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Argument.to_string(), "argument");
        assert_eq!(ErrorCategory::Io.to_string(), "io");
    }
}

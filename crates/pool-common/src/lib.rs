//! Pooled testing common types and errors.
//!
//! This crate provides the pieces shared by every other crate in the workspace:
//! - The unified error taxonomy with stable codes
//! - Structured (JSON) and human renderings of errors
//! - Output format selection for the CLI

pub mod error;
pub mod output;

pub use error::{format_error_human, Error, ErrorCategory, Result, StructuredError};
pub use output::OutputFormat;

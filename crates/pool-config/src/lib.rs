//! Pooled testing configuration loading and validation.
//!
//! This crate provides:
//! - The typed `sweep.json` configuration
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation

pub mod resolve;
pub mod sweep;
pub mod validate;

pub use resolve::{load_sweep_config, resolve_config, ConfigSource, LoadedConfig};
pub use sweep::{SweepConfig, SweepMode};
pub use validate::{validate_sweep_config, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";

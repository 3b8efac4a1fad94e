//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI argument → environment variables → XDG path → defaults.

use crate::sweep::SweepConfig;
use crate::validate::{validate_sweep_config, ValidationError, ValidationResult};
use std::path::{Path, PathBuf};

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_CONFIG_PATH: &str = "POOLTEST_CONFIG";
pub const ENV_CONFIG_DIR: &str = "POOLTEST_CONFIG_DIR";

/// Standard config file name.
const SWEEP_FILENAME: &str = "sweep.json";

/// Application name for XDG directories.
const APP_NAME: &str = "pooltest";

/// A validated configuration together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: SweepConfig,
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

/// Resolve the sweep config path.
///
/// Resolution order:
/// 1. Explicit CLI path (must exist)
/// 2. `POOLTEST_CONFIG` (must exist)
/// 3. `POOLTEST_CONFIG_DIR` + `sweep.json`
/// 4. XDG config directory (`~/.config/pooltest/sweep.json`)
/// 5. Built-in defaults (`None`)
pub fn resolve_config(cli_path: Option<&Path>) -> ValidationResult<(Option<PathBuf>, ConfigSource)> {
    // 1. CLI argument
    if let Some(path) = cli_path {
        return Ok((Some(explicit_path(path)?), ConfigSource::CliArgument));
    }

    // 2. Environment variable (direct path)
    if let Ok(env_path) = std::env::var(ENV_CONFIG_PATH) {
        let path = explicit_path(Path::new(&env_path))?;
        return Ok((Some(path), ConfigSource::Environment));
    }

    // 3. Environment variable (config dir)
    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(SWEEP_FILENAME);
        if path.exists() {
            return Ok((Some(path), ConfigSource::Environment));
        }
    }

    // 4. XDG config directory
    if let Some(path) = xdg_config_dir().map(|d| d.join(SWEEP_FILENAME)) {
        if path.exists() {
            return Ok((Some(path), ConfigSource::XdgConfig));
        }
    }

    Ok((None, ConfigSource::BuiltinDefault))
}

/// A path the user named explicitly; a missing file is an error, never a fallback.
fn explicit_path(path: &Path) -> ValidationResult<PathBuf> {
    if !path.exists() {
        return Err(ValidationError::IoError(format!(
            "config file {} does not exist",
            path.display()
        )));
    }
    Ok(path.to_path_buf())
}

/// Resolve, read and validate the sweep config.
pub fn load_sweep_config(cli_path: Option<&Path>) -> ValidationResult<LoadedConfig> {
    let (path, source) = resolve_config(cli_path)?;

    let config = match &path {
        Some(path) => SweepConfig::from_file(path)?,
        None => SweepConfig::default(),
    };
    validate_sweep_config(&config)?;

    Ok(LoadedConfig {
        config,
        path,
        source,
    })
}

/// Get the XDG config directory for pooltest.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

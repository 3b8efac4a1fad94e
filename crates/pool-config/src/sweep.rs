//! Typed sweep configuration (`sweep.json`).

use serde::{Deserialize, Serialize};

/// Which efficiency source a sweep evaluates at each group size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepMode {
    /// One random trial (or the mean of `trials`) per group size.
    #[default]
    Simulated,
    /// Closed-form expected efficiency.
    Analytical,
}

impl std::fmt::Display for SweepMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SweepMode::Simulated => write!(f, "simulated"),
            SweepMode::Analytical => write!(f, "analytical"),
        }
    }
}

/// Parameters for a group-size sweep.
///
/// Every field has a default so a partial file is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub schema_version: String,

    /// Probability that a single individual is positive.
    pub prevalence: f64,

    /// Number of groups `n` drawn per simulated trial.
    pub group_count: usize,

    /// Largest group size `d_max`; the sweep covers `[2, d_max]`.
    pub max_group_size: usize,

    /// Trials averaged per group size. 1 keeps the single-trial behaviour.
    pub trials: usize,

    /// Seed for the simulator; `None` draws one from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    pub mode: SweepMode,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            prevalence: 0.01,
            group_count: 1000,
            max_group_size: 20,
            trials: 1,
            seed: None,
            mode: SweepMode::Simulated,
        }
    }
}

impl SweepConfig {
    /// Load a sweep config from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, crate::validate::ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::validate::ValidationError::IoError(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    /// Parse a sweep config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, crate::validate::ValidationError> {
        serde_json::from_str(json).map_err(|e| {
            crate::validate::ValidationError::ParseError(format!("Invalid JSON: {}", e))
        })
    }
}

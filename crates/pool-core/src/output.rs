//! Report payloads and their renderings.
//!
//! stdout carries exactly one rendered report per command; logs go to stderr.

use crate::search::{OptimalGroupSize, SweepPoint};
use crate::simulate::TrialOutcome;
use pool_common::{OutputFormat, Result};
use pool_config::SweepMode;
use serde::Serialize;

/// A payload the CLI can print in any [`OutputFormat`].
pub trait Report: Serialize {
    /// One line for quick checks.
    fn summary(&self) -> String;

    /// Markdown rendering.
    fn markdown(&self) -> String;
}

/// Render a report in the requested format.
pub fn render<R: Report>(report: &R, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Summary => Ok(report.summary()),
        OutputFormat::Md => Ok(report.markdown()),
    }
}

/// Output of `pooltest simulate`.
#[derive(Debug, Clone, Serialize)]
pub struct SimulateReport {
    pub run_id: String,
    pub prevalence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(flatten)]
    pub outcome: TrialOutcome,
    /// Mean of the test count over repeated trials.
    pub expected_tests: f64,
    pub tests_std_dev: f64,
}

impl Report for SimulateReport {
    fn summary(&self) -> String {
        format!(
            "d={} n={} p={}: {} tests ({} positive groups), efficiency {:.4} (expected {:.1} ± {:.1} tests)",
            self.outcome.group_size,
            self.outcome.group_count,
            self.prevalence,
            self.outcome.num_tests,
            self.outcome.positive_groups,
            self.outcome.efficiency,
            self.expected_tests,
            self.tests_std_dev,
        )
    }

    fn markdown(&self) -> String {
        let mut out = String::from("## Simulated trial\n\n| field | value |\n|---|---|\n");
        out.push_str(&format!("| group size | {} |\n", self.outcome.group_size));
        out.push_str(&format!("| groups | {} |\n", self.outcome.group_count));
        out.push_str(&format!("| prevalence | {} |\n", self.prevalence));
        out.push_str(&format!("| positive groups | {} |\n", self.outcome.positive_groups));
        out.push_str(&format!("| tests | {} |\n", self.outcome.num_tests));
        out.push_str(&format!("| efficiency | {:.4} |\n", self.outcome.efficiency));
        out.push_str(&format!(
            "| expected tests | {:.1} ± {:.1} |\n",
            self.expected_tests, self.tests_std_dev
        ));
        out
    }
}

/// Output of `pooltest analytical`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticalReport {
    pub run_id: String,
    pub group_size: usize,
    pub prevalence: f64,
    pub group_positive_probability: f64,
    pub efficiency: f64,
}

impl Report for AnalyticalReport {
    fn summary(&self) -> String {
        format!(
            "d={} p={}: P(group positive) {:.4}, expected efficiency {:.4}",
            self.group_size, self.prevalence, self.group_positive_probability, self.efficiency
        )
    }

    fn markdown(&self) -> String {
        format!(
            "## Expected efficiency\n\n| group size | prevalence | P(group positive) | efficiency |\n|---|---|---|---|\n| {} | {} | {:.4} | {:.4} |\n",
            self.group_size, self.prevalence, self.group_positive_probability, self.efficiency
        )
    }
}

/// Output of `pooltest optimize`.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizeReport {
    pub run_id: String,
    pub mode: SweepMode,
    pub prevalence: f64,
    pub max_group_size: usize,
    /// Absent for the analytical sweep, which has no finite population.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trials: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub best: OptimalGroupSize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<Vec<SweepPoint>>,
}

impl Report for OptimizeReport {
    fn summary(&self) -> String {
        format!(
            "{} sweep d=2..={} p={}: best group size {} with efficiency {:.4}",
            self.mode, self.max_group_size, self.prevalence, self.best.group_size, self.best.efficiency
        )
    }

    fn markdown(&self) -> String {
        let mut out = format!(
            "## Optimal group size ({})\n\nBest: **d = {}**, efficiency **{:.4}** (p = {}, d ≤ {})\n",
            self.mode, self.best.group_size, self.best.efficiency, self.prevalence, self.max_group_size
        );
        if let Some(curve) = &self.curve {
            out.push_str("\n| group size | efficiency |\n|---|---|\n");
            for point in curve {
                out.push_str(&format!("| {} | {:.4} |\n", point.group_size, point.efficiency));
            }
        }
        out
    }
}

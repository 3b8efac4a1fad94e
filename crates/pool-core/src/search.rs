//! Group-size sweeps.
//!
//! Every sweep walks `d = 2..=d_max` in ascending order and keeps the first
//! point with the largest efficiency. Arguments are validated before the first
//! point is evaluated; an empty range is [`Error::EmptySearchSpace`].
//!
//! The simulated sweep evaluates one noisy trial per group size, so its optimum
//! is itself random. [`find_max_mean_efficiency`] trades time for variance.

use crate::simulate::{simulate, simulate_mean};
use pool_common::{Error, Result};
use pool_math::params::{
    check_group_count, check_prevalence, check_sample_cells, check_search_space, check_trials,
    MIN_SWEEP_GROUP_SIZE,
};
use pool_math::analytical_efficiency;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Efficiency observed (or expected) at one group size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub group_size: usize,
    pub efficiency: f64,
}

/// Best point of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimalGroupSize {
    pub group_size: usize,
    pub efficiency: f64,
}

impl OptimalGroupSize {
    /// `(best_d, best_efficiency)`.
    pub fn as_pair(&self) -> (usize, f64) {
        (self.group_size, self.efficiency)
    }
}

/// First point with the strictly largest efficiency, or `None` for no points.
pub fn best_point(points: &[SweepPoint]) -> Option<OptimalGroupSize> {
    let mut best: Option<OptimalGroupSize> = None;
    for point in points {
        match best {
            Some(b) if point.efficiency <= b.efficiency => {}
            _ => {
                best = Some(OptimalGroupSize {
                    group_size: point.group_size,
                    efficiency: point.efficiency,
                })
            }
        }
    }
    best
}

/// One simulated trial per group size in `[2, d_max]`.
pub fn simulated_efficiency_curve<R: Rng + ?Sized>(
    d_max: usize,
    n: usize,
    p: f64,
    rng: &mut R,
) -> Result<Vec<SweepPoint>> {
    let d_max = check_search_space(d_max)?;
    let n = check_group_count(n)?;
    let p = check_prevalence(p)?;
    // The largest sample of the sweep must be drawable before any draw is made.
    check_sample_cells(d_max, n)?;

    let mut points = Vec::new();
    for d in MIN_SWEEP_GROUP_SIZE..=d_max {
        let efficiency = simulate(d, n, p, rng)?.efficiency;
        tracing::debug!(group_size = d, efficiency, "simulated sweep point");
        points.push(SweepPoint {
            group_size: d,
            efficiency,
        });
    }
    Ok(points)
}

/// Mean of `trials` simulated trials per group size in `[2, d_max]`.
pub fn mean_efficiency_curve<R: Rng + ?Sized>(
    d_max: usize,
    n: usize,
    p: f64,
    trials: usize,
    rng: &mut R,
) -> Result<Vec<SweepPoint>> {
    let d_max = check_search_space(d_max)?;
    let n = check_group_count(n)?;
    let p = check_prevalence(p)?;
    let trials = check_trials(trials)?;
    check_sample_cells(d_max, n)?;

    let mut points = Vec::new();
    for d in MIN_SWEEP_GROUP_SIZE..=d_max {
        let efficiency = simulate_mean(d, n, p, trials, rng)?;
        tracing::debug!(group_size = d, trials, efficiency, "mean sweep point");
        points.push(SweepPoint {
            group_size: d,
            efficiency,
        });
    }
    Ok(points)
}

/// Closed-form efficiency per group size in `[2, d_max]`.
pub fn analytical_efficiency_curve(d_max: usize, p: f64) -> Result<Vec<SweepPoint>> {
    let d_max = check_search_space(d_max)?;
    let p = check_prevalence(p)?;

    (MIN_SWEEP_GROUP_SIZE..=d_max)
        .map(|d| {
            Ok(SweepPoint {
                group_size: d,
                efficiency: analytical_efficiency(d, p)?,
            })
        })
        .collect()
}

/// Group size in `[2, d_max]` with the best single-trial simulated efficiency.
pub fn find_max_efficiency<R: Rng + ?Sized>(
    d_max: usize,
    n: usize,
    p: f64,
    rng: &mut R,
) -> Result<OptimalGroupSize> {
    let points = simulated_efficiency_curve(d_max, n, p, rng)?;
    select(&points, d_max, "simulated")
}

/// Group size in `[2, d_max]` with the best mean efficiency over `trials` trials.
pub fn find_max_mean_efficiency<R: Rng + ?Sized>(
    d_max: usize,
    n: usize,
    p: f64,
    trials: usize,
    rng: &mut R,
) -> Result<OptimalGroupSize> {
    let points = mean_efficiency_curve(d_max, n, p, trials, rng)?;
    select(&points, d_max, "mean")
}

/// Group size in `[2, d_max]` with the best expected efficiency. Deterministic.
///
/// # Example
/// ```
/// use pool_core::find_max_analytical_efficiency;
///
/// let best = find_max_analytical_efficiency(20, 0.01).unwrap();
/// assert_eq!(best.group_size, 11);
/// assert!(best.efficiency > 5.0);
/// ```
pub fn find_max_analytical_efficiency(d_max: usize, p: f64) -> Result<OptimalGroupSize> {
    let points = analytical_efficiency_curve(d_max, p)?;
    select(&points, d_max, "analytical")
}

fn select(points: &[SweepPoint], d_max: usize, sweep: &'static str) -> Result<OptimalGroupSize> {
    let best = best_point(points).ok_or(Error::EmptySearchSpace { d_max })?;
    tracing::info!(
        sweep,
        d_max,
        best_group_size = best.group_size,
        best_efficiency = best.efficiency,
        "optimal group size selected"
    );
    Ok(best)
}

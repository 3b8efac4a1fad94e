//! Random trials of one-round pooled testing.
//!
//! One trial draws a [`PopulationSample`], screens each of the `n` groups once
//! and retests every member of a positive group:
//!
//! - tests = `n + d · (positive groups)`
//! - efficiency = `d · n / tests`
//!
//! The random source is injected so callers control reproducibility.

use crate::sample::PopulationSample;
use pool_common::Result;
use pool_math::params::check_trials;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Result of a single simulated trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub group_size: usize,
    pub group_count: usize,
    pub positive_groups: usize,
    /// Screening plus retest count, in `[n, n + d·n]`.
    pub num_tests: usize,
    /// Individuals covered per test consumed, in `[d/(d+1), d]`.
    pub efficiency: f64,
}

impl TrialOutcome {
    /// Tally a drawn sample.
    pub fn from_sample(sample: &PopulationSample) -> Self {
        let d = sample.group_size();
        let n = sample.group_count();
        let num_tests = sample.tests_required();

        TrialOutcome {
            group_size: d,
            group_count: n,
            positive_groups: sample.positive_groups(),
            num_tests,
            efficiency: (d as f64 * n as f64) / num_tests as f64,
        }
    }

    /// `(num_tests, efficiency)`.
    pub fn as_pair(&self) -> (usize, f64) {
        (self.num_tests, self.efficiency)
    }
}

/// Run one random trial with `n` groups of `d` at prevalence `p`.
///
/// # Example
/// ```
/// use pool_core::{seeded_rng, simulate};
///
/// let mut rng = seeded_rng(Some(7));
/// let outcome = simulate(5, 200, 0.0, &mut rng).unwrap();
/// assert_eq!(outcome.as_pair(), (200, 5.0));
/// ```
pub fn simulate<R: Rng + ?Sized>(d: usize, n: usize, p: f64, rng: &mut R) -> Result<TrialOutcome> {
    let sample = PopulationSample::draw(d, n, p, rng)?;
    let outcome = TrialOutcome::from_sample(&sample);

    tracing::trace!(
        group_size = d,
        group_count = n,
        prevalence = p,
        positive_groups = outcome.positive_groups,
        num_tests = outcome.num_tests,
        efficiency = outcome.efficiency,
        "trial complete"
    );

    Ok(outcome)
}

/// Mean efficiency over `trials` independent trials.
///
/// Each trial draws a fresh sample from the same stream.
pub fn simulate_mean<R: Rng + ?Sized>(
    d: usize,
    n: usize,
    p: f64,
    trials: usize,
    rng: &mut R,
) -> Result<f64> {
    let trials = check_trials(trials)?;

    let mut total = 0.0;
    for _ in 0..trials {
        total += simulate(d, n, p, rng)?.efficiency;
    }

    Ok(total / trials as f64)
}

/// Reproducible RNG for a fixed seed, or one seeded from the OS.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_prevalence_uses_only_screening_tests() {
        let mut rng = seeded_rng(Some(11));
        let outcome = simulate(8, 125, 0.0, &mut rng).unwrap();
        assert_eq!(outcome.num_tests, 125);
        assert_eq!(outcome.efficiency, 8.0);
        assert_eq!(outcome.positive_groups, 0);
    }

    #[test]
    fn full_prevalence_retests_everyone() {
        let mut rng = seeded_rng(Some(12));
        let outcome = simulate(4, 50, 1.0, &mut rng).unwrap();
        assert_eq!(outcome.num_tests, 50 + 4 * 50);
        assert_eq!(outcome.efficiency, 4.0 / 5.0);
    }

    #[test]
    fn efficiency_is_cells_over_tests() {
        let mut rng = seeded_rng(Some(13));
        for _ in 0..50 {
            let outcome = simulate(6, 40, 0.1, &mut rng).unwrap();
            assert_eq!(outcome.efficiency, 240.0 / outcome.num_tests as f64);
            assert_eq!(outcome.num_tests, 40 + 6 * outcome.positive_groups);
        }
    }

    #[test]
    fn individual_testing_never_exceeds_one() {
        let mut rng = seeded_rng(Some(14));
        for _ in 0..50 {
            let (num_tests, efficiency) = simulate(1, 100, 0.3, &mut rng).unwrap().as_pair();
            assert!((100..=200).contains(&num_tests));
            assert!(efficiency <= 1.0);
            assert_eq!(efficiency, 100.0 / num_tests as f64);
        }
    }

    #[test]
    fn same_seed_same_outcome() {
        let a = simulate(5, 300, 0.05, &mut seeded_rng(Some(5))).unwrap();
        let b = simulate(5, 300, 0.05, &mut seeded_rng(Some(5))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn simulate_mean_single_trial_matches_simulate() {
        let single = simulate(5, 300, 0.05, &mut seeded_rng(Some(6))).unwrap();
        let mean = simulate_mean(5, 300, 0.05, 1, &mut seeded_rng(Some(6))).unwrap();
        assert_eq!(mean, single.efficiency);
    }

    #[test]
    fn simulate_mean_approaches_analytical() {
        let mut rng = seeded_rng(Some(21));
        let mean = simulate_mean(10, 2_000, 0.01, 20, &mut rng).unwrap();
        let expected = pool_math::analytical_efficiency(10, 0.01).unwrap();
        assert!((mean - expected).abs() < 0.05 * expected, "mean={mean} expected={expected}");
    }

    #[test]
    fn simulate_mean_rejects_zero_trials() {
        assert!(simulate_mean(5, 10, 0.1, 0, &mut seeded_rng(Some(1))).is_err());
    }

    #[test]
    fn invalid_arguments_are_rejected() {
        let mut rng = seeded_rng(Some(1));
        assert!(simulate(0, 10, 0.1, &mut rng).is_err());
        assert!(simulate(3, 0, 0.1, &mut rng).is_err());
        assert!(simulate(3, 10, -0.5, &mut rng).is_err());
        assert!(simulate(3, 10, f64::NAN, &mut rng).is_err());
    }
}

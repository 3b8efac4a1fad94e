//! Finite-population moments of the number of tests.
//!
//! With `n` groups of `d`, each group is positive independently with
//! probability `q = 1 - (1 - p)^d`, so the positive-group count is
//! `K ~ Binomial(n, q)` and the realised test count is `T = n + d·K`:
//!
//! - `E[T] = n + d·n·q`
//! - `Var[T] = d²·n·q·(1 - q)`
//!
//! These describe the spread a single simulated trial is drawn from.

use super::efficiency::group_positive_probability;
use super::params::check_group_count;
use super::stable::complement_pow;
use pool_common::Result;
use serde::{Deserialize, Serialize};

/// Mean and variance of the total test count for one trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestCountMoments {
    /// Expected number of tests.
    pub mean: f64,
    /// Variance of the number of tests.
    pub variance: f64,
}

impl TestCountMoments {
    /// Standard deviation of the number of tests.
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// Moments of the test count for `n` groups of `d` at prevalence `p`.
pub fn test_count_moments(d: usize, n: usize, p: f64) -> Result<TestCountMoments> {
    let n = check_group_count(n)?;
    let q = group_positive_probability(d, p)?;
    let (d, n) = (d as f64, n as f64);

    Ok(TestCountMoments {
        mean: n + d * n * q,
        variance: d * d * n * q * (1.0 - q),
    })
}

/// Expected number of tests `n + d·n·q`.
pub fn expected_tests(d: usize, n: usize, p: f64) -> Result<f64> {
    test_count_moments(d, n, p).map(|m| m.mean)
}

/// Probability that no group tests positive, i.e. the trial uses exactly
/// `n` tests and reaches efficiency `d`: `(1 - p)^(d·n)`.
pub fn prob_no_positive_groups(d: usize, n: usize, p: f64) -> Result<f64> {
    let n = check_group_count(n)?;
    // Validates d and p.
    group_positive_probability(d, p)?;
    Ok(complement_pow(p, d as f64 * n as f64))
}

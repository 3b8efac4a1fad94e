//! Closed-form expected efficiency of one-round pooled testing.
//!
//! A population is split into groups of `d`. Each group is tested once; every
//! member of a positive group is then retested individually. With independent
//! infection at prevalence `p`:
//!
//! - `P(group positive) = q = 1 - (1 - p)^d`
//! - expected tests per group = `1 + d·q`
//! - efficiency = individuals per test = `d / (1 + d·q)`
//!
//! This is the large-`n` limit of the simulated efficiency, so it carries no
//! dependency on the number of groups.

use super::params::{check_group_size, check_prevalence};
use super::stable::one_minus_complement_pow;
use pool_common::Result;

/// Probability that a group of `d` contains at least one positive sample.
///
/// # Example
/// ```
/// use pool_math::group_positive_probability;
///
/// let q = group_positive_probability(5, 0.1).unwrap();
/// assert!((q - 0.40951).abs() < 1e-9);
/// ```
pub fn group_positive_probability(d: usize, p: f64) -> Result<f64> {
    let d = check_group_size(d)?;
    let p = check_prevalence(p)?;
    Ok(one_minus_complement_pow(p, d as f64))
}

/// Expected number of tests consumed by one group of `d`: the screening test
/// plus `d` retests when the pool comes back positive.
pub fn expected_tests_per_group(d: usize, p: f64) -> Result<f64> {
    let q = group_positive_probability(d, p)?;
    Ok(1.0 + d as f64 * q)
}

/// Expected efficiency `d / (1 + d·(1 - (1 - p)^d))`.
///
/// Deterministic, and exact at the edges:
/// - `p = 0` gives `d` (every retest saved)
/// - `p = 1` gives `d / (d + 1)`
///
/// # Example
/// ```
/// use pool_math::analytical_efficiency;
///
/// let e = analytical_efficiency(5, 0.1).unwrap();
/// assert!((e - 1.6407).abs() < 1e-3);
/// assert_eq!(analytical_efficiency(8, 0.0).unwrap(), 8.0);
/// ```
pub fn analytical_efficiency(d: usize, p: f64) -> Result<f64> {
    let tests = expected_tests_per_group(d, p)?;
    Ok(d as f64 / tests)
}

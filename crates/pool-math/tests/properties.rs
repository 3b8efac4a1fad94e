//! Property-based tests for pool-math.
//!
//! Uses proptest to check the closed-form model across many random inputs.

use pool_math::binomial::test_count_moments;
use pool_math::{analytical_efficiency, group_positive_probability, one_minus_complement_pow};
use proptest::prelude::*;

/// Tolerance for floating point comparisons.
const TOL: f64 = 1e-10;

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol.max(tol * a.abs().max(b.abs()))
}

// ============================================================================
// analytical_efficiency properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// p = 0 saves every retest: efficiency is exactly d.
    #[test]
    fn zero_prevalence_is_exact(d in 1usize..10_000) {
        prop_assert_eq!(analytical_efficiency(d, 0.0).unwrap(), d as f64);
    }

    /// p = 1 makes every group positive: efficiency is d / (d + 1).
    #[test]
    fn full_prevalence_is_d_over_d_plus_one(d in 1usize..10_000) {
        let e = analytical_efficiency(d, 1.0).unwrap();
        let expected = d as f64 / (d as f64 + 1.0);
        prop_assert!(approx_eq(e, expected, TOL), "d={} e={} expected={}", d, e, expected);
    }

    /// Higher prevalence never improves expected efficiency.
    #[test]
    fn non_increasing_in_prevalence(d in 1usize..500, a in 0.0..=1.0f64, b in 0.0..=1.0f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let e_lo = analytical_efficiency(d, lo).unwrap();
        let e_hi = analytical_efficiency(d, hi).unwrap();
        prop_assert!(e_hi <= e_lo, "d={} e({})={} < e({})={}", d, lo, e_lo, hi, e_hi);
    }

    /// Efficiency stays within (0, d].
    #[test]
    fn bounded_by_group_size(d in 1usize..5_000, p in 0.0..=1.0f64) {
        let e = analytical_efficiency(d, p).unwrap();
        prop_assert!(e > 0.0);
        prop_assert!(e <= d as f64);
        prop_assert!(e >= d as f64 / (d as f64 + 1.0) - TOL);
    }

    /// Matches the textbook formula wherever the naive form is well conditioned.
    #[test]
    fn matches_naive_formula(d in 1i32..200, p in 1e-3..=1.0f64) {
        let naive = d as f64 / (1.0 + d as f64 * (1.0 - (1.0 - p).powi(d)));
        let e = analytical_efficiency(d as usize, p).unwrap();
        prop_assert!(approx_eq(e, naive, 1e-9), "d={} p={} e={} naive={}", d, p, e, naive);
    }

    /// Out-of-range prevalence is always rejected.
    #[test]
    fn rejects_out_of_range_prevalence(d in 1usize..100, p in prop_oneof![-10.0..-1e-9f64, (1.0 + 1e-9)..10.0f64]) {
        prop_assert!(analytical_efficiency(d, p).is_err());
    }
}

// ============================================================================
// Group positivity and moments
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Group positivity is a probability and grows with the group size.
    #[test]
    fn group_positive_probability_monotone_in_d(d in 1usize..1_000, p in 0.0..=1.0f64) {
        let q = group_positive_probability(d, p).unwrap();
        let q_next = group_positive_probability(d + 1, p).unwrap();
        prop_assert!((0.0..=1.0).contains(&q));
        prop_assert!(q_next >= q);
    }

    /// 1 - (1-p)^d never leaves [0, 1].
    #[test]
    fn one_minus_complement_pow_in_unit_interval(d in 0.0..1e6f64, p in 0.0..=1.0f64) {
        let q = one_minus_complement_pow(p, d);
        prop_assert!((0.0..=1.0).contains(&q), "p={} d={} q={}", p, d, q);
    }

    /// The test-count mean lies between n and n + d·n, and the variance is non-negative.
    #[test]
    fn test_count_moments_bounds(d in 1usize..200, n in 1usize..2_000, p in 0.0..=1.0f64) {
        let m = test_count_moments(d, n, p).unwrap();
        let lo = n as f64;
        let hi = n as f64 + (d * n) as f64;
        prop_assert!(m.mean >= lo - TOL && m.mean <= hi + TOL);
        prop_assert!(m.variance >= 0.0);
    }
}

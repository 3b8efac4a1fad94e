//! Property-based tests for the simulator and the sweeps.

use pool_core::{
    analytical_efficiency_curve, find_max_analytical_efficiency, find_max_efficiency, seeded_rng,
    simulate, simulated_efficiency_curve,
};
use pool_math::analytical_efficiency;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// n ≤ tests ≤ n + d·n and efficiency = d·n / tests exactly.
    #[test]
    fn trial_bounds(d in 1usize..40, n in 1usize..200, p in 0.0..=1.0f64, seed in any::<u64>()) {
        let outcome = simulate(d, n, p, &mut seeded_rng(Some(seed))).unwrap();
        prop_assert!(outcome.num_tests >= n);
        prop_assert!(outcome.num_tests <= n + d * n);
        prop_assert_eq!(outcome.num_tests, n + d * outcome.positive_groups);
        prop_assert_eq!(outcome.efficiency, (d * n) as f64 / outcome.num_tests as f64);
        prop_assert!(outcome.efficiency > 0.0);
        prop_assert!(outcome.efficiency <= d as f64);
        prop_assert!(outcome.efficiency >= d as f64 / (d as f64 + 1.0));
    }

    /// Individual testing (d = 1) never beats one test per person.
    #[test]
    fn individual_testing_efficiency_at_most_one(n in 1usize..500, p in 0.0..=1.0f64, seed in any::<u64>()) {
        let outcome = simulate(1, n, p, &mut seeded_rng(Some(seed))).unwrap();
        prop_assert!(outcome.efficiency <= 1.0);
    }

    /// A fixed seed reproduces the trial.
    #[test]
    fn seeded_trials_are_reproducible(d in 1usize..20, n in 1usize..100, p in 0.0..=1.0f64, seed in any::<u64>()) {
        let a = simulate(d, n, p, &mut seeded_rng(Some(seed))).unwrap();
        let b = simulate(d, n, p, &mut seeded_rng(Some(seed))).unwrap();
        prop_assert_eq!(a, b);
    }

    /// The analytical optimum lies in [2, d_max] and matches an independent recomputation.
    #[test]
    fn analytical_optimum_is_consistent(d_max in 2usize..200, p in 0.0..=1.0f64) {
        let best = find_max_analytical_efficiency(d_max, p).unwrap();
        prop_assert!((2..=d_max).contains(&best.group_size));
        prop_assert_eq!(best.efficiency, analytical_efficiency(best.group_size, p).unwrap());

        let curve = analytical_efficiency_curve(d_max, p).unwrap();
        prop_assert!(curve.iter().all(|pt| pt.efficiency <= best.efficiency));
        // First maximal point wins.
        let first = curve.iter().find(|pt| pt.efficiency == best.efficiency).unwrap();
        prop_assert_eq!(first.group_size, best.group_size);
    }

    /// The analytical sweep is bit-for-bit deterministic.
    #[test]
    fn analytical_optimum_is_deterministic(d_max in 2usize..100, p in 0.0..=1.0f64) {
        let a = find_max_analytical_efficiency(d_max, p).unwrap();
        let b = find_max_analytical_efficiency(d_max, p).unwrap();
        prop_assert_eq!(a.group_size, b.group_size);
        prop_assert_eq!(a.efficiency.to_bits(), b.efficiency.to_bits());
    }

    /// The simulated optimum lies in [2, d_max] and is the first maximum of the seeded curve.
    #[test]
    fn simulated_optimum_is_curve_argmax(d_max in 2usize..25, n in 1usize..60, p in 0.0..=1.0f64, seed in any::<u64>()) {
        let best = find_max_efficiency(d_max, n, p, &mut seeded_rng(Some(seed))).unwrap();
        let curve = simulated_efficiency_curve(d_max, n, p, &mut seeded_rng(Some(seed))).unwrap();
        prop_assert!((2..=d_max).contains(&best.group_size));
        prop_assert_eq!(curve.len(), d_max - 1);
        let first = curve.iter().find(|pt| pt.efficiency == best.efficiency).unwrap();
        prop_assert_eq!(first.group_size, best.group_size);
        prop_assert!(curve.iter().all(|pt| pt.efficiency <= best.efficiency));
    }

    /// d_max of 0 or 1 is always rejected.
    #[test]
    fn tiny_d_max_is_rejected(d_max in 0usize..2, n in 1usize..10, p in 0.0..=1.0f64) {
        prop_assert!(find_max_analytical_efficiency(d_max, p).is_err());
        prop_assert!(find_max_efficiency(d_max, n, p, &mut seeded_rng(Some(0))).is_err());
    }
}

//! Pooled testing core library.
//!
//! This library provides:
//! - Random trials of one-round pooled testing (`sample`, `simulate`)
//! - Group-size sweeps over simulated or closed-form efficiency (`search`)
//! - Report rendering for the CLI (`output`)
//! - Exit codes and structured logging
//!
//! The binary entry point is in `main.rs`.

pub mod exit_codes;
pub mod logging;
pub mod output;
pub mod sample;
pub mod search;
pub mod simulate;

pub use sample::PopulationSample;
pub use search::{
    analytical_efficiency_curve, best_point, find_max_analytical_efficiency,
    find_max_efficiency, find_max_mean_efficiency, mean_efficiency_curve,
    simulated_efficiency_curve, OptimalGroupSize, SweepPoint,
};
pub use simulate::{seeded_rng, simulate, simulate_mean, TrialOutcome};

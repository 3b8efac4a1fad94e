//! Argument validation shared by the closed-form model and the simulator.
//!
//! Nothing is clamped: an out-of-domain value is a caller bug and comes back
//! as [`Error::InvalidArgument`].

use pool_common::{Error, Result};

/// Smallest group size a sweep considers.
pub const MIN_SWEEP_GROUP_SIZE: usize = 2;

/// Group size `d` must be at least 1.
pub fn check_group_size(d: usize) -> Result<usize> {
    if d == 0 {
        return Err(Error::invalid("group_size", "must be a positive integer, got 0"));
    }
    Ok(d)
}

/// Number of groups `n` must be at least 1.
pub fn check_group_count(n: usize) -> Result<usize> {
    if n == 0 {
        return Err(Error::invalid("group_count", "must be a positive integer, got 0"));
    }
    Ok(n)
}

/// Prevalence `p` must be a real number in `[0, 1]`.
pub fn check_prevalence(p: f64) -> Result<f64> {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return Err(Error::invalid(
            "prevalence",
            format!("must lie in [0, 1], got {p}"),
        ));
    }
    Ok(p)
}

/// Largest `d × n` grid a sample can hold (one byte per individual).
pub const MAX_SAMPLE_CELLS: usize = isize::MAX as usize;

/// A `d × n` grid must fit in memory-addressable storage.
pub fn check_sample_cells(d: usize, n: usize) -> Result<usize> {
    match d.checked_mul(n) {
        Some(cells) if cells <= MAX_SAMPLE_CELLS => Ok(cells),
        _ => Err(Error::invalid(
            "group_count",
            format!("a {d} x {n} sample does not fit in memory"),
        )),
    }
}

/// The sweep range `[2, d_max]` must be non-empty.
pub fn check_search_space(d_max: usize) -> Result<usize> {
    if d_max < MIN_SWEEP_GROUP_SIZE {
        return Err(Error::EmptySearchSpace { d_max });
    }
    Ok(d_max)
}

/// Number of repeated trials must be at least 1.
pub fn check_trials(trials: usize) -> Result<usize> {
    if trials == 0 {
        return Err(Error::invalid("trials", "must be a positive integer, got 0"));
    }
    Ok(trials)
}

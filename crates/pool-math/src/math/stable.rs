//! Numerically stable primitives for powers of the negative-test probability.
//!
//! The quantity `(1 - p)^d` shows up everywhere in pooled testing: it is the
//! chance that a pool of `d` independent samples is entirely negative. For
//! small `p` and large `d` the naive `1.0 - (1.0 - p).powi(d)` cancels badly,
//! so everything here goes through `ln_1p` / `expm1`.
//!
//! These functions do not validate; NaN in gives NaN out.

/// Stable `ln((1 - p)^d)` = `d · ln(1 - p)`.
///
/// Returns `-inf` when `p == 1` and `d > 0`, and `0` whenever `d == 0`.
pub fn log_complement_pow(p: f64, d: f64) -> f64 {
    if p.is_nan() || d.is_nan() {
        return f64::NAN;
    }
    if d == 0.0 {
        return 0.0;
    }
    d * (-p).ln_1p()
}

/// Stable `(1 - p)^d`.
pub fn complement_pow(p: f64, d: f64) -> f64 {
    log_complement_pow(p, d).exp()
}

/// Stable `1 - (1 - p)^d`.
///
/// Exact at both ends: `0` for `p == 0` and `1` for `p == 1`.
pub fn one_minus_complement_pow(p: f64, d: f64) -> f64 {
    let log = log_complement_pow(p, d);
    if log.is_nan() {
        return f64::NAN;
    }
    -log.exp_m1()
}

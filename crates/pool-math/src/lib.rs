//! Pooled testing math utilities.

pub mod math;

pub use math::binomial;
pub use math::efficiency::*;
pub use math::params;
pub use math::stable::*;

//! Core math modules.

pub mod binomial;
pub mod efficiency;
pub mod params;
pub mod stable;

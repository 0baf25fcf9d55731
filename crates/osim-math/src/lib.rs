//! OS simulator math utilities.

pub mod math;

pub use math::round::*;
pub use math::stats::*;

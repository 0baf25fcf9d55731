//! Presentation rounding.
//!
//! Engines and the metric calculator keep full precision; reports round at
//! the edge with these helpers.

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Round to two decimal places, the precision used for times and ratios.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

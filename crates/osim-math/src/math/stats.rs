//! Division-safe summary statistics.
//!
//! Every helper here is total: empty inputs and zero denominators yield 0
//! instead of NaN or infinity, so degenerate-but-valid workloads (a single
//! process finishing at its arrival tick, an empty disk queue) still produce
//! finite metrics.

use serde::{Deserialize, Serialize};

/// `num / den`, or 0 when the quotient is undefined.
pub fn safe_ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 || !den.is_finite() || !num.is_finite() {
        return 0.0;
    }
    num / den
}

/// `part / whole * 100`, or 0 when `whole` is 0.
pub fn percentage(part: u64, whole: u64) -> f64 {
    safe_ratio(part as f64, whole as f64) * 100.0
}

/// Split `whole` into the percentage taken by `part` and its complement.
///
/// The complement is derived by subtraction so the pair sums to 100 whenever
/// `whole > 0`, independent of how `part` rounds.
pub fn complementary_percentages(part: u64, whole: u64) -> (f64, f64) {
    if whole == 0 {
        return (0.0, 0.0);
    }
    let share = percentage(part, whole);
    (share, 100.0 - share)
}

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    safe_ratio(values.iter().sum(), values.len() as f64)
}

/// Arithmetic mean of integer samples, 0 when there are none.
///
/// The running sum is 128-bit, so samples anywhere in the `u64` range
/// cannot overflow it.
pub fn mean_u64<I>(values: I) -> f64
where
    I: IntoIterator<Item = u64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0u128, 0u64), |(s, c), v| (s + u128::from(v), c + 1));
    safe_ratio(sum as f64, count as f64)
}

/// Total, count and extremes of a sequence of integer samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spread {
    pub total: u64,
    pub count: u64,
    /// Smallest sample, 0 when empty.
    pub min: u64,
    /// Largest sample, 0 when empty.
    pub max: u64,
}

impl Spread {
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        let mut spread = Spread::default();
        for sample in samples {
            if spread.count == 0 {
                spread.min = sample;
                spread.max = sample;
            } else {
                spread.min = spread.min.min(sample);
                spread.max = spread.max.max(sample);
            }
            spread.total = spread.total.saturating_add(sample);
            spread.count += 1;
        }
        spread
    }

    pub fn mean(&self) -> f64 {
        safe_ratio(self.total as f64, self.count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn safe_ratio_zero_denominator() {
        assert_eq!(safe_ratio(5.0, 0.0), 0.0);
        assert_eq!(safe_ratio(5.0, f64::INFINITY), 0.0);
        assert!(approx_eq(safe_ratio(1.0, 3.0), 0.333_333, 1e-6));
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean_u64(Vec::<u64>::new()), 0.0);
    }

    #[test]
    fn mean_u64_matches_float_mean() {
        assert!(approx_eq(mean_u64([0, 4, 6]), 10.0 / 3.0, 1e-12));
        assert!(approx_eq(mean(&[0.0, 4.0, 6.0]), 10.0 / 3.0, 1e-12));
    }

    #[test]
    fn mean_u64_near_the_type_maximum() {
        let max = u64::MAX as f64;
        assert!(approx_eq(mean_u64([u64::MAX, u64::MAX]), max, 1.0));
        assert!(approx_eq(mean_u64([u64::MAX, 1]), max / 2.0, 1.0));
    }

    #[test]
    fn spread_tracks_extremes() {
        let spread = Spread::from_samples([12, 2, 31, 146]);
        assert_eq!(spread.total, 191);
        assert_eq!(spread.count, 4);
        assert_eq!(spread.min, 2);
        assert_eq!(spread.max, 146);
        assert!(approx_eq(spread.mean(), 47.75, 1e-12));
    }

    #[test]
    fn spread_empty_is_all_zero() {
        let spread = Spread::from_samples(std::iter::empty());
        assert_eq!(spread, Spread::default());
        assert_eq!(spread.mean(), 0.0);
    }

    #[test]
    fn complementary_percentages_empty_whole() {
        assert_eq!(complementary_percentages(0, 0), (0.0, 0.0));
    }

    proptest! {
        #[test]
        fn complementary_percentages_sum_to_hundred(whole in 1u64..10_000, frac in 0.0f64..=1.0) {
            let part = ((whole as f64) * frac).floor() as u64;
            let (a, b) = complementary_percentages(part, whole);
            prop_assert!(a >= 0.0 && b >= 0.0);
            prop_assert!((a + b - 100.0).abs() < 1e-9);
        }
    }
}

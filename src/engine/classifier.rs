//! Qualitative banding of a conversion rate against a bookmaker threshold.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Half-width of the band treated as "near the minimum", in percent points.
pub const NEAR_BAND_PCT: Decimal = dec!(2.0);

/// How a computed rate compares to the bookmaker's expected minimum.
///
/// Ordered so that a higher rate never ranks lower:
/// `BelowMinimum < NearMinimum < AboveMinimum`. `Unrated` sits outside the
/// ordering and means no threshold was known for the bookmaker.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
pub enum RateBand {
    /// More than the tolerance below the expected minimum.
    #[strum(to_string = "below minimum")]
    BelowMinimum,
    /// Within ±[`NEAR_BAND_PCT`] of the expected minimum (inclusive).
    #[strum(to_string = "near minimum")]
    NearMinimum,
    /// More than the tolerance above the expected minimum.
    #[strum(to_string = "above minimum")]
    AboveMinimum,
    /// Unknown bookmaker, no threshold to compare against.
    #[strum(to_string = "unrated")]
    Unrated,
}

impl RateBand {
    /// Colour glyph used when rendering results.
    pub fn glyph(&self) -> &'static str {
        match self {
            RateBand::BelowMinimum => "\u{1F7E5}", // red
            RateBand::NearMinimum => "\u{1F7E7}",  // orange
            RateBand::AboveMinimum => "\u{1F7E9}", // green
            RateBand::Unrated => "\u{1F7E6}",      // blue
        }
    }
}

/// Band a rate against a minimum-expected threshold.
///
/// The ±[`NEAR_BAND_PCT`] band is inclusive: a difference of exactly ±2.0
/// is `NearMinimum`.
pub fn classify(rate_pct: Decimal, minimum_expected: Option<Decimal>) -> RateBand {
    let Some(minimum) = minimum_expected else {
        return RateBand::Unrated;
    };

    let difference = rate_pct - minimum;
    if difference.abs() <= NEAR_BAND_PCT {
        RateBand::NearMinimum
    } else if difference > NEAR_BAND_PCT {
        RateBand::AboveMinimum
    } else {
        RateBand::BelowMinimum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn unknown_bookmaker_is_unrated() {
        assert_eq!(classify(dec!(95), None), RateBand::Unrated);
    }

    #[test]
    fn bands_around_the_threshold() {
        let minimum = Some(dec!(88));
        assert_eq!(classify(dec!(80), minimum), RateBand::BelowMinimum);
        assert_eq!(classify(dec!(87.5), minimum), RateBand::NearMinimum);
        assert_eq!(classify(dec!(95), minimum), RateBand::AboveMinimum);
    }

    #[test]
    fn band_edges_are_inclusive() {
        let minimum = Some(dec!(88));
        assert_eq!(classify(dec!(90), minimum), RateBand::NearMinimum);
        assert_eq!(classify(dec!(86), minimum), RateBand::NearMinimum);
        assert_eq!(classify(dec!(90.01), minimum), RateBand::AboveMinimum);
        assert_eq!(classify(dec!(85.99), minimum), RateBand::BelowMinimum);
    }

    #[test]
    fn classification_is_monotonic_in_rate() {
        let minimum = Some(dec!(85));
        let mut rate = dec!(70);
        let mut previous = classify(rate, minimum);
        while rate <= dec!(100) {
            let band = classify(rate, minimum);
            assert!(band >= previous, "rate {rate} dropped from {previous:?} to {band:?}");
            previous = band;
            rate += dec!(0.25);
        }
    }

    #[test]
    fn worked_example_below_betclic_threshold() {
        // 49.24% against betclic's 88 minimum.
        assert_eq!(classify(dec!(49.24), Some(dec!(88))), RateBand::BelowMinimum);
    }
}

//! Bookmaker catalog: alias normalization and minimum-rate thresholds.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

/// Bookmakers with a configured minimum expected conversion rate.
///
/// The combined entries ("psel / zebet", "pmu / vbet") are broker pairs that
/// share one threshold; either single name resolves to the pair.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Bookmaker {
    /// Betclic.
    #[strum(to_string = "betclic")]
    #[serde(rename = "betclic")]
    Betclic,
    /// Winamax.
    #[strum(to_string = "winamax")]
    #[serde(rename = "winamax")]
    Winamax,
    /// Unibet.
    #[strum(to_string = "unibet")]
    #[serde(rename = "unibet")]
    Unibet,
    /// ParionsSport en Ligne / Zebet pair.
    #[strum(to_string = "psel / zebet", serialize = "psel", serialize = "zebet")]
    #[serde(rename = "psel / zebet")]
    PselZebet,
    /// PMU / Vbet pair.
    #[strum(to_string = "pmu / vbet", serialize = "pmu", serialize = "vbet")]
    #[serde(rename = "pmu / vbet")]
    PmuVbet,
}

impl Bookmaker {
    /// Minimum expected conversion rate for this bookmaker, in percent.
    pub fn minimum_rate(&self) -> Decimal {
        match self {
            Bookmaker::Betclic => dec!(88),
            Bookmaker::Winamax => dec!(90),
            Bookmaker::Unibet => dec!(85),
            Bookmaker::PselZebet => dec!(85),
            Bookmaker::PmuVbet => dec!(72),
        }
    }
}

/// Map raw user text to a catalog entry and its canonical display form.
///
/// Matching is case-insensitive over the alias table. Unrecognized input
/// passes through as `(None, raw)`: callers must treat it as an opaque
/// bookmaker name with no known threshold.
pub fn normalize(raw: &str) -> (Option<Bookmaker>, String) {
    let trimmed = raw.trim();
    match Bookmaker::from_str(trimmed) {
        Ok(bookmaker) => (Some(bookmaker), bookmaker.to_string()),
        Err(_) => (None, trimmed.to_string()),
    }
}

/// Minimum-rate threshold for a possibly-unrecognized bookmaker.
pub fn minimum_rate_for(bookmaker: Option<Bookmaker>) -> Option<Decimal> {
    bookmaker.map(|b| b.minimum_rate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn normalize_is_case_insensitive() {
        for raw in ["betclic", "Betclic", "BETCLIC"] {
            let (id, display) = normalize(raw);
            assert_eq!(id, Some(Bookmaker::Betclic));
            assert_eq!(display, "betclic");
        }
    }

    #[test]
    fn pair_aliases_resolve_to_the_pair() {
        for raw in ["psel", "Zebet", "PSEL / ZEBET"] {
            let (id, _) = normalize(raw);
            assert_eq!(id, Some(Bookmaker::PselZebet));
        }
        for raw in ["pmu", "Vbet", "pmu / vbet"] {
            let (id, _) = normalize(raw);
            assert_eq!(id, Some(Bookmaker::PmuVbet));
        }
    }

    #[test]
    fn every_canonical_name_round_trips() {
        for bookmaker in Bookmaker::iter() {
            let (id, display) = normalize(&bookmaker.to_string());
            assert_eq!(id, Some(bookmaker));
            assert_eq!(display, bookmaker.to_string());
        }
    }

    #[test]
    fn unknown_name_passes_through() {
        let (id, display) = normalize("  Bwin ");
        assert_eq!(id, None);
        assert_eq!(display, "Bwin");
        assert_eq!(minimum_rate_for(id), None);
    }

    #[test]
    fn thresholds_match_catalog() {
        use rust_decimal_macros::dec;
        assert_eq!(Bookmaker::Betclic.minimum_rate(), dec!(88));
        assert_eq!(Bookmaker::Winamax.minimum_rate(), dec!(90));
        assert_eq!(Bookmaker::Unibet.minimum_rate(), dec!(85));
        assert_eq!(Bookmaker::PselZebet.minimum_rate(), dec!(85));
        assert_eq!(Bookmaker::PmuVbet.minimum_rate(), dec!(72));
    }
}

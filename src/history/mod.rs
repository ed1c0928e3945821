//! Append-only log of computed conversions.
//!
//! Entries are immutable snapshots of a request and its result, persisted as
//! a flat JSON list with a `kind` discriminator and an RFC 3339 timestamp.
//! Records written by older versions may miss numeric fields; they load as
//! zero/absent instead of failing aggregation.

pub mod store;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::engine::{ConversionQuote, OddsPair, RateBand};

pub use store::{HistoryStore, DEFAULT_QUERY_LIMIT};

/// Which engine operation produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Standard conversion of a known freebet amount.
    Standard,
    /// Maximum-freebet calculation under a liability budget.
    MaxFreebet,
}

/// One recorded conversion. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Which operation produced this entry.
    pub kind: EntryKind,
    /// Canonical bookmaker id, or the raw name for unrecognized bookmakers.
    #[serde(default)]
    pub bookmaker: Option<String>,
    /// Odds on the promotional market.
    #[serde(default)]
    pub promo_odds: Decimal,
    /// Odds on the lay market.
    #[serde(default)]
    pub lay_odds: Decimal,
    /// Freebet amount staked (standard) or derived (max-freebet).
    #[serde(default)]
    pub freebet: Decimal,
    /// Stake placed on the lay market.
    #[serde(default)]
    pub lay_stake: Decimal,
    /// Lay liability required.
    #[serde(default)]
    pub liability: Decimal,
    /// Conversion rate, percent.
    #[serde(default)]
    pub rate_pct: Decimal,
    /// Lay cash the caller had available (max-freebet only).
    #[serde(default)]
    pub available_cash: Option<Decimal>,
    /// Whether the minimum lay stake was forced.
    #[serde(default)]
    pub minimum_stake_applied: bool,
    /// Band the rate fell into at computation time.
    #[serde(default)]
    pub classification: Option<RateBand>,
    /// When the computation completed.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl HistoryEntry {
    /// Snapshot a standard conversion.
    pub fn standard(
        odds: OddsPair,
        quote: &ConversionQuote,
        bookmaker: Option<String>,
        classification: RateBand,
    ) -> Self {
        Self {
            kind: EntryKind::Standard,
            bookmaker,
            promo_odds: odds.promo,
            lay_odds: odds.lay,
            freebet: quote.freebet_staked,
            lay_stake: quote.lay_stake,
            liability: quote.lay_liability,
            rate_pct: quote.rate_pct,
            available_cash: None,
            minimum_stake_applied: quote.minimum_stake_applied,
            classification: Some(classification),
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    /// Snapshot a maximum-freebet calculation.
    pub fn max_freebet(
        odds: OddsPair,
        available_cash: Decimal,
        quote: &ConversionQuote,
        bookmaker: Option<String>,
        classification: RateBand,
    ) -> Self {
        Self {
            kind: EntryKind::MaxFreebet,
            bookmaker,
            promo_odds: odds.promo,
            lay_odds: odds.lay,
            freebet: quote.freebet_staked,
            lay_stake: quote.lay_stake,
            liability: quote.lay_liability,
            rate_pct: quote.rate_pct,
            available_cash: Some(available_cash),
            minimum_stake_applied: quote.minimum_stake_applied,
            classification: Some(classification),
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}

/// Freebet-weighted average conversion rate over standard entries.
///
/// `Σ(freebet · rate) / Σ(freebet)`, `None` when no standard entry carries
/// freebet volume. Max-freebet entries are excluded: their freebet amount is
/// a derived output rather than a user commitment and would bias the weights.
pub fn weighted_average_rate(entries: &[HistoryEntry]) -> Option<Decimal> {
    let mut weighted_sum = Decimal::ZERO;
    let mut total_freebet = Decimal::ZERO;

    for entry in entries {
        if entry.kind != EntryKind::Standard {
            continue;
        }
        weighted_sum += entry.freebet * entry.rate_pct;
        total_freebet += entry.freebet;
    }

    if total_freebet.is_zero() {
        None
    } else {
        Some(weighted_sum / total_freebet)
    }
}

/// Aggregate statistics over the standard entries of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StandardSummary {
    /// Number of standard conversions.
    pub count: usize,
    /// Total freebet volume converted.
    pub total_freebet: Decimal,
    /// Freebet-weighted average rate, percent.
    pub average_rate_pct: Decimal,
}

/// Summarize the standard entries of a slice, `None` when there are none.
pub fn standard_summary(entries: &[HistoryEntry]) -> Option<StandardSummary> {
    let average_rate_pct = weighted_average_rate(entries)?;
    let standard: Vec<&HistoryEntry> = entries
        .iter()
        .filter(|e| e.kind == EntryKind::Standard)
        .collect();

    Some(StandardSummary {
        count: standard.len(),
        total_freebet: standard.iter().map(|e| e.freebet).sum(),
        average_rate_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{standard_conversion, RateBand};
    use rust_decimal_macros::dec;

    fn entry(kind: EntryKind, freebet: Decimal, rate_pct: Decimal) -> HistoryEntry {
        HistoryEntry {
            kind,
            bookmaker: Some("betclic".to_string()),
            promo_odds: dec!(2),
            lay_odds: dec!(2.1),
            freebet,
            lay_stake: Decimal::ZERO,
            liability: Decimal::ZERO,
            rate_pct,
            available_cash: None,
            minimum_stake_applied: false,
            classification: None,
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn weighted_average_weights_by_freebet() {
        let entries = vec![
            entry(EntryKind::Standard, dec!(100), dec!(80)),
            entry(EntryKind::Standard, dec!(50), dec!(92)),
        ];

        // (100*80 + 50*92) / 150 = 84
        assert_eq!(weighted_average_rate(&entries), Some(dec!(84)));
    }

    #[test]
    fn max_freebet_entries_are_excluded() {
        let entries = vec![
            entry(EntryKind::Standard, dec!(100), dec!(80)),
            entry(EntryKind::MaxFreebet, dec!(1000), dec!(99)),
        ];

        assert_eq!(weighted_average_rate(&entries), Some(dec!(80)));
    }

    #[test]
    fn no_standard_volume_means_no_data() {
        assert_eq!(weighted_average_rate(&[]), None);

        let only_maxfb = vec![entry(EntryKind::MaxFreebet, dec!(40), dec!(90))];
        assert_eq!(weighted_average_rate(&only_maxfb), None);

        // Legacy records missing the freebet field load as zero volume.
        let zero_volume = vec![entry(EntryKind::Standard, Decimal::ZERO, dec!(90))];
        assert_eq!(weighted_average_rate(&zero_volume), None);
    }

    #[test]
    fn summary_totals_standard_entries() {
        let entries = vec![
            entry(EntryKind::Standard, dec!(100), dec!(80)),
            entry(EntryKind::Standard, dec!(50), dec!(92)),
            entry(EntryKind::MaxFreebet, dec!(30), dec!(99)),
        ];

        let summary = standard_summary(&entries).unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_freebet, dec!(150));
        assert_eq!(summary.average_rate_pct, dec!(84));
    }

    #[test]
    fn entry_snapshots_quote_fields() {
        let odds = OddsPair::new(dec!(2.0), dec!(2.0));
        let quote = standard_conversion(odds, dec!(100)).unwrap();
        let entry = HistoryEntry::standard(
            odds,
            &quote,
            Some("betclic".to_string()),
            RateBand::BelowMinimum,
        );

        assert_eq!(entry.kind, EntryKind::Standard);
        assert_eq!(entry.freebet, dec!(100));
        assert_eq!(entry.lay_stake, quote.lay_stake);
        assert_eq!(entry.liability, quote.lay_liability);
        assert_eq!(entry.classification, Some(RateBand::BelowMinimum));
    }
}

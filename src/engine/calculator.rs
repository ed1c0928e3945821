//! Stake, liability and conversion-rate calculations.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::ConversionError;

/// Fee applied to the promotional (freebet) leg.
pub const PROMO_FEE_RATE: Decimal = dec!(0);

/// Commission charged on net winnings of the lay market.
pub const LAY_FEE_RATE: Decimal = dec!(0.03);

/// Smallest lay stake the exchange accepts, in currency units.
pub const MINIMUM_LAY_STAKE: Decimal = dec!(6);

/// Which leg of the hedge an odds value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum OddsSide {
    /// Promotional (freebet) market.
    #[strum(to_string = "promo")]
    Promo,
    /// Lay (exchange) market.
    #[strum(to_string = "lay")]
    Lay,
}

/// Decimal odds on both legs of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OddsPair {
    /// Odds on the promotional market.
    pub promo: Decimal,
    /// Odds on the lay market.
    pub lay: Decimal,
}

impl OddsPair {
    /// Build an odds pair without validating it.
    pub fn new(promo: Decimal, lay: Decimal) -> Self {
        Self { promo, lay }
    }

    /// Reject odds at or below 1 and the degenerate lay/commission collision.
    pub fn validate(&self) -> Result<(), ConversionError> {
        if self.promo <= Decimal::ONE {
            return Err(ConversionError::OddsOutOfRange {
                side: OddsSide::Promo,
                odds: self.promo,
            });
        }
        if self.lay <= Decimal::ONE {
            return Err(ConversionError::OddsOutOfRange {
                side: OddsSide::Lay,
                odds: self.lay,
            });
        }
        if (self.lay - LAY_FEE_RATE).is_zero() {
            return Err(ConversionError::DegenerateLayOdds {
                lay_odds: self.lay,
                fee: LAY_FEE_RATE,
            });
        }
        Ok(())
    }
}

/// Computed conversion: how much to lay, what it costs, what it locks in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionQuote {
    /// Freebet amount staked on the promotional leg.
    pub freebet_staked: Decimal,
    /// Stake to place on the lay market.
    pub lay_stake: Decimal,
    /// Cash tied up as lay liability (`lay_stake * (lay - 1)`).
    pub lay_liability: Decimal,
    /// Guaranteed conversion rate, percent of the freebet face value.
    pub rate_pct: Decimal,
    /// Whether the stake was forced up to [`MINIMUM_LAY_STAKE`].
    pub minimum_stake_applied: bool,
}

/// Guaranteed return as a percentage of the freebet face value.
///
/// Net cash if the back leg wins: the lay liability is paid out, the
/// promotional winnings come in. Both outcomes lock in the same net by
/// construction of the stake, so one branch suffices.
fn conversion_rate_pct(odds: &OddsPair, freebet: Decimal, lay_stake: Decimal) -> Decimal {
    let lay_payout_if_back_wins = -lay_stake * (odds.lay - Decimal::ONE);
    let back_payout_if_back_wins = freebet * (odds.promo - Decimal::ONE) * (Decimal::ONE - PROMO_FEE_RATE);
    let net = lay_payout_if_back_wins + back_payout_if_back_wins;
    net / freebet * Decimal::ONE_HUNDRED
}

/// Compute the lay stake and conversion rate for a known freebet amount.
pub fn standard_conversion(
    odds: OddsPair,
    freebet: Decimal,
) -> Result<ConversionQuote, ConversionError> {
    odds.validate()?;
    if freebet <= Decimal::ZERO {
        return Err(ConversionError::NonPositiveAmount { amount: freebet });
    }

    let lay_stake = freebet * (odds.promo - Decimal::ONE) * (Decimal::ONE - PROMO_FEE_RATE)
        / (odds.lay - LAY_FEE_RATE);
    let lay_liability = lay_stake * (odds.lay - Decimal::ONE);

    Ok(ConversionQuote {
        freebet_staked: freebet,
        lay_stake,
        lay_liability,
        rate_pct: conversion_rate_pct(&odds, freebet, lay_stake),
        minimum_stake_applied: false,
    })
}

/// Largest freebet convertible with a given lay-side liability budget.
///
/// Inverse of [`standard_conversion`]: the budget fixes the stake, the stake
/// fixes the freebet. When the derived stake falls below
/// [`MINIMUM_LAY_STAKE`] it is forced up to the minimum and the freebet and
/// liability are recomputed at the forced stake; a budget that cannot fund
/// that liability fails with [`ConversionError::InsufficientBudget`] carrying
/// the shortfall.
pub fn max_freebet_under_budget(
    odds: OddsPair,
    available_lay_cash: Decimal,
) -> Result<ConversionQuote, ConversionError> {
    odds.validate()?;
    if available_lay_cash <= Decimal::ZERO {
        return Err(ConversionError::NonPositiveAmount {
            amount: available_lay_cash,
        });
    }

    let derived_stake = available_lay_cash / (odds.lay - Decimal::ONE);
    let minimum_stake_applied = derived_stake < MINIMUM_LAY_STAKE;
    let lay_stake = if minimum_stake_applied {
        MINIMUM_LAY_STAKE
    } else {
        derived_stake
    };

    let freebet = lay_stake * (odds.lay - LAY_FEE_RATE)
        / ((odds.promo - Decimal::ONE) * (Decimal::ONE - PROMO_FEE_RATE));
    let lay_liability = lay_stake * (odds.lay - Decimal::ONE);

    if available_lay_cash < lay_liability {
        return Err(ConversionError::InsufficientBudget {
            required: lay_liability,
            available: available_lay_cash,
            shortfall: lay_liability - available_lay_cash,
        });
    }

    Ok(ConversionQuote {
        freebet_staked: freebet,
        lay_stake,
        lay_liability,
        rate_pct: conversion_rate_pct(&odds, freebet, lay_stake),
        minimum_stake_applied,
    })
}

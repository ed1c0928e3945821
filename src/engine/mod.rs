//! Conversion engine: pure arithmetic and rate classification.
//!
//! This module handles:
//! - Standard freebet-to-cash conversion for a known freebet amount
//! - The inverse maximum-freebet calculation under a liability budget
//! - Banding a computed rate against a bookmaker's minimum

pub mod calculator;
pub mod classifier;

pub use calculator::{
    max_freebet_under_budget, standard_conversion, ConversionQuote, OddsPair, OddsSide,
    LAY_FEE_RATE, MINIMUM_LAY_STAKE, PROMO_FEE_RATE,
};
pub use classifier::{classify, RateBand, NEAR_BAND_PCT};

//! Unified error types for the conversion engine.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::engine::calculator::OddsSide;

/// Unified error type for the crate.
#[derive(Error, Debug)]
pub enum ConverterError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Conversion calculation error.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// History persistence error.
    #[error("history error: {0}")]
    History(#[from] HistoryError),
}

/// Errors from validating inputs and computing conversions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Decimal odds at or below 1 carry no stake-able margin.
    #[error("invalid {side} odds {odds}: decimal odds must be greater than 1")]
    OddsOutOfRange {
        /// Which leg carried the bad odds.
        side: OddsSide,
        /// The rejected odds value.
        odds: Decimal,
    },

    /// Freebet amount or available cash must be strictly positive.
    #[error("invalid amount {amount}: must be greater than 0")]
    NonPositiveAmount {
        /// The rejected amount.
        amount: Decimal,
    },

    /// Lay odds equal to the lay commission leave the stake undefined.
    #[error("lay odds {lay_odds} cancel out against the {fee} commission: stake is undefined")]
    DegenerateLayOdds {
        /// The lay odds that triggered the degenerate case.
        lay_odds: Decimal,
        /// The commission rate they collided with.
        fee: Decimal,
    },

    /// Available lay cash cannot fund the liability at the minimum stake.
    #[error("insufficient lay cash: need {required} to cover liability, have {available} (short {shortfall})")]
    InsufficientBudget {
        /// Liability required at the (clamped) stake.
        required: Decimal,
        /// Cash the caller said was available.
        available: Decimal,
        /// How much more cash is needed.
        shortfall: Decimal,
    },

    /// Raw text could not be parsed as a number.
    #[error("could not parse {0:?} as a number")]
    InvalidNumber(String),
}

/// History log loading and persistence errors.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// Reading or writing the log file failed.
    #[error("history io error: {0}")]
    Io(#[from] std::io::Error),

    /// The log file contents could not be decoded.
    #[error("history decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ConverterError>;

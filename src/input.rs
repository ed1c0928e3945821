//! Parsing of user-supplied numeric text.
//!
//! Users type amounts and odds with either `.` or `,` as the decimal
//! separator; both are accepted transparently.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ConversionError;

/// Parse a raw string into a [`Decimal`], accepting `,` or `.` separators.
pub fn parse_decimal(raw: &str) -> Result<Decimal, ConversionError> {
    let trimmed = raw.trim();
    let normalized = trimmed.replace(',', ".");
    Decimal::from_str(&normalized)
        .map_err(|_| ConversionError::InvalidNumber(trimmed.to_string()))
}

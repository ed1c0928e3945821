//! Freebet-to-cash conversion engine for matched betting.
//!
//! A freebet only pays its winnings, so converting it to guaranteed cash
//! means laying the same outcome on an exchange. Given the odds on both
//! legs, the engine computes the lay stake that locks in the same net
//! return either way:
//!
//! ```text
//! Promo odds:  2.0   Lay odds: 2.0   Commission: 3%
//! Freebet:     100
//! ─────────────────────────────────────────────────
//! Lay stake:   100 * (2.0 - 1) / (2.0 - 0.03) ≈ 50.76
//! Guaranteed:  ≈ 49.24% of the freebet face value
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`input`]: Locale-tolerant numeric parsing
//! - [`bookmaker`]: Bookmaker aliases and minimum-rate thresholds
//! - [`engine`]: Conversion arithmetic and rate classification
//! - [`history`]: Append-only log of computed conversions
//! - [`api`]: HTTP keep-alive endpoints

pub mod api;
pub mod bookmaker;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod input;

pub use config::Config;
pub use error::{ConverterError, Result};

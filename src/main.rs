//! Command-line adapter around the conversion engine.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use freebet_arb::api::{create_router, AppState};
use freebet_arb::bookmaker::{minimum_rate_for, normalize, Bookmaker};
use freebet_arb::config::Config;
use freebet_arb::engine::{
    classify, max_freebet_under_budget, standard_conversion, ConversionQuote, OddsPair, RateBand,
};
use freebet_arb::error::ConversionError;
use freebet_arb::history::{standard_summary, EntryKind, HistoryEntry, HistoryStore};
use freebet_arb::input;

/// Freebet-to-cash conversion calculator for matched betting.
#[derive(Parser, Debug)]
#[command(name = "freebet-arb")]
#[command(about = "Computes lay stakes and guaranteed conversion rates for freebets")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a known freebet amount to guaranteed cash.
    Convert {
        /// Decimal odds on the promotional market (accepts ',' or '.').
        #[arg(value_parser = parse_decimal_arg)]
        promo_odds: Decimal,

        /// Decimal odds on the lay market.
        #[arg(value_parser = parse_decimal_arg)]
        lay_odds: Decimal,

        /// Freebet amount to convert.
        #[arg(value_parser = parse_decimal_arg)]
        freebet: Decimal,

        /// Bookmaker name (known names get a rate threshold).
        #[arg(short, long)]
        bookmaker: Option<String>,
    },

    /// Largest freebet convertible with the available lay cash.
    MaxFreebet {
        /// Decimal odds on the promotional market (accepts ',' or '.').
        #[arg(value_parser = parse_decimal_arg)]
        promo_odds: Decimal,

        /// Decimal odds on the lay market.
        #[arg(value_parser = parse_decimal_arg)]
        lay_odds: Decimal,

        /// Cash available as lay liability.
        #[arg(value_parser = parse_decimal_arg)]
        cash: Decimal,

        /// Bookmaker name (known names get a rate threshold).
        #[arg(short, long)]
        bookmaker: Option<String>,
    },

    /// Show recorded conversions, newest first.
    History {
        /// Only entries for this bookmaker.
        #[arg(short, long)]
        bookmaker: Option<String>,

        /// Number of entries to show.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Run the keep-alive HTTP server.
    Serve {
        /// Port to listen on (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn parse_decimal_arg(raw: &str) -> Result<Decimal, ConversionError> {
    input::parse_decimal(raw)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load()?;
    config.validate().map_err(anyhow::Error::msg)?;

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(log_filter(args.verbose, &config))
        .init();

    match args.command {
        Command::Convert {
            promo_odds,
            lay_odds,
            freebet,
            bookmaker,
        } => cmd_convert(&config, promo_odds, lay_odds, freebet, bookmaker),
        Command::MaxFreebet {
            promo_odds,
            lay_odds,
            cash,
            bookmaker,
        } => cmd_max_freebet(&config, promo_odds, lay_odds, cash, bookmaker),
        Command::History { bookmaker, limit } => cmd_history(&config, bookmaker, limit),
        Command::Serve { port } => cmd_serve(&config, port).await,
    }
}

/// Build the log filter from the verbose flag and configured level.
///
/// `config.rust_log` already reflects the RUST_LOG environment variable via
/// the envy loader.
fn log_filter(verbose: bool, config: &Config) -> EnvFilter {
    if verbose || config.verbose {
        EnvFilter::new("freebet_arb=debug,info")
    } else {
        EnvFilter::new(&config.rust_log)
    }
}

/// Resolve the raw bookmaker argument against the catalog.
fn resolve_bookmaker(raw: Option<&str>) -> (Option<Bookmaker>, Option<String>) {
    match raw {
        Some(name) => {
            let (id, display) = normalize(name);
            (id, Some(display))
        }
        None => (None, None),
    }
}

fn render_quote(quote: &ConversionQuote, band: RateBand, bookmaker: Option<&str>) {
    println!(
        "{} Conversion rate : {}% ({})",
        band.glyph(),
        quote.rate_pct.round_dp(2),
        band
    );
    println!("   Freebet staked  : {}", quote.freebet_staked.round_dp(2));
    println!("   Lay stake       : {}", quote.lay_stake.round_dp(2));
    println!("   Lay liability   : {}", quote.lay_liability.round_dp(2));
    if quote.minimum_stake_applied {
        println!("   Minimum lay stake was applied");
    }
    if let Some(name) = bookmaker {
        println!("   Bookmaker       : {name}");
    }
}

/// Convert a known freebet amount and record the result.
fn cmd_convert(
    config: &Config,
    promo_odds: Decimal,
    lay_odds: Decimal,
    freebet: Decimal,
    bookmaker: Option<String>,
) -> anyhow::Result<()> {
    let store = HistoryStore::open(&config.history_path)?;
    let (bookmaker_id, display_name) = resolve_bookmaker(bookmaker.as_deref());

    let odds = OddsPair::new(promo_odds, lay_odds);
    let quote = standard_conversion(odds, freebet)?;
    let band = classify(quote.rate_pct, minimum_rate_for(bookmaker_id));

    info!(
        rate_pct = %quote.rate_pct.round_dp(2),
        band = %band,
        bookmaker = display_name.as_deref().unwrap_or("-"),
        "Standard conversion computed"
    );

    render_quote(&quote, band, display_name.as_deref());
    store.add(HistoryEntry::standard(odds, &quote, display_name, band))?;
    Ok(())
}

/// Compute the largest fundable freebet and record the result.
fn cmd_max_freebet(
    config: &Config,
    promo_odds: Decimal,
    lay_odds: Decimal,
    cash: Decimal,
    bookmaker: Option<String>,
) -> anyhow::Result<()> {
    let store = HistoryStore::open(&config.history_path)?;
    let (bookmaker_id, display_name) = resolve_bookmaker(bookmaker.as_deref());

    let odds = OddsPair::new(promo_odds, lay_odds);
    let quote = max_freebet_under_budget(odds, cash)?;
    let band = classify(quote.rate_pct, minimum_rate_for(bookmaker_id));

    info!(
        freebet = %quote.freebet_staked.round_dp(2),
        rate_pct = %quote.rate_pct.round_dp(2),
        band = %band,
        "Max freebet computed"
    );

    println!(
        "With {} of lay cash you can convert up to {} of freebets.",
        cash.round_dp(2),
        quote.freebet_staked.round_dp(2)
    );
    render_quote(&quote, band, display_name.as_deref());
    store.add(HistoryEntry::max_freebet(odds, cash, &quote, display_name, band))?;
    Ok(())
}

/// Show recorded conversions and the weighted-rate summary.
fn cmd_history(
    config: &Config,
    bookmaker: Option<String>,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let store = HistoryStore::open(&config.history_path)?;
    let limit = limit.unwrap_or(config.history_limit);

    let (_, display_name) = resolve_bookmaker(bookmaker.as_deref());
    let entries = store.query(display_name.as_deref(), limit);

    if entries.is_empty() {
        println!("No conversions recorded.");
        return Ok(());
    }

    if let Some(summary) = standard_summary(&entries) {
        println!(
            "Totals: {} freebets converted over {} conversions, weighted rate {}%",
            summary.total_freebet.round_dp(2),
            summary.count,
            summary.average_rate_pct.round_dp(2)
        );
        println!();
    }

    for entry in &entries {
        let kind = match entry.kind {
            EntryKind::Standard => "conversion",
            EntryKind::MaxFreebet => "max freebet",
        };
        let glyph = entry
            .classification
            .map(|band| band.glyph())
            .unwrap_or(" ");
        println!(
            "{glyph} {kind} - {} | bookmaker: {} | freebet: {} | stake: {} | rate: {}%",
            entry
                .timestamp
                .format(&time::format_description::well_known::Rfc3339)?,
            entry.bookmaker.as_deref().unwrap_or("-"),
            entry.freebet.round_dp(2),
            entry.lay_stake.round_dp(2),
            entry.rate_pct.round_dp(2),
        );
    }

    Ok(())
}

/// Run the keep-alive HTTP server until ctrl-c.
async fn cmd_serve(config: &Config, port: Option<u16>) -> anyhow::Result<()> {
    let store = Arc::new(HistoryStore::open(&config.history_path)?);
    let state = AppState::new(store);

    let app = create_router(state.clone()).layer(TraceLayer::new_for_http());

    let port = port.unwrap_or(config.port);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    state.set_ready(true);

    info!(%addr, "Keep-alive server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolve when ctrl-c is received.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_config(dir: &tempfile::TempDir) -> Config {
        Config {
            history_path: dir
                .path()
                .join("history.json")
                .to_string_lossy()
                .into_owned(),
            ..Config::default()
        }
    }

    #[test]
    fn convert_command_records_the_normalized_bookmaker() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);

        cmd_convert(
            &config,
            dec!(2.0),
            dec!(2.0),
            dec!(100),
            Some("Betclic".to_string()),
        )
        .unwrap();

        let store = HistoryStore::open(&config.history_path).unwrap();
        let entries = store.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].bookmaker.as_deref(), Some("betclic"));
        assert_eq!(entries[0].classification, Some(RateBand::BelowMinimum));
    }

    #[test]
    fn max_freebet_command_accepts_an_exactly_funded_budget() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);

        // Stake 20 / 3 fully consumes the budget as liability.
        cmd_max_freebet(&config, dec!(2.0), dec!(4.0), dec!(20), None).unwrap();

        let store = HistoryStore::open(&config.history_path).unwrap();
        let entries = store.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].available_cash, Some(dec!(20)));
        assert!(!entries[0].minimum_stake_applied);
    }

    #[test]
    fn log_filter_uses_configured_level() {
        let config = Config {
            rust_log: "warn".to_string(),
            ..Config::default()
        };

        assert_eq!(log_filter(false, &config).to_string(), "warn");
    }

    #[test]
    fn log_filter_verbose_flag_enables_debug() {
        let config = Config::default();
        let filter = log_filter(true, &config).to_string();
        assert!(filter.contains("freebet_arb=debug"));
    }

    #[test]
    fn log_filter_verbose_config_enables_debug() {
        let config = Config {
            verbose: true,
            ..Config::default()
        };
        let filter = log_filter(false, &config).to_string();
        assert!(filter.contains("freebet_arb=debug"));
    }
}

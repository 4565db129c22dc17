//! CLI argument definitions for ndq.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `fetch` | Fetch every category for a symbol and write it to a file |
//! | `normalize` | Normalize a saved raw record |
//! | `quote` | Latest quote |
//! | `dividends` | Dividend summary and history |
//! | `ownership` | Institutional holders and insider trades |
//! | `analyst` | PEG, P/E and growth figures |
//! | `short-interest` | Latest short-interest settlement |
//! | `financials` | Annual or quarterly statements |
//! | `historical` | Daily price history |
//! | `news` | Recent news articles |
//! | `symbol` | Several data sets in one call |
//! | `screen` | Screener listing with optional filters |
//! | `tickers` | Ticker lists of every exchange |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--timeout-ms` | `30000` | Per-request timeout (`NDQ_TIMEOUT_MS`) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `-v` | off | Raise log verbosity (repeatable) |
//! | `--log-level` | `warn` | Explicit tracing filter |
//!
//! # Examples
//!
//! ```bash
//! ndq quote AAPL --pretty
//! ndq fetch AAPL aapl.json
//! ndq fetch AAPL aapl_raw.json --raw
//! ndq normalize aapl_raw.json aapl.json
//! ndq symbol MSFT --include quote,short-interest
//! ndq screen --exchange nasdaq --sector technology
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use ndq_core::{DataSet, Exchange, FinancialPeriod, HistoryPeriod};

/// NASDAQ market data, normalized.
#[derive(Debug, Parser)]
#[command(
    name = "ndq",
    author,
    version,
    about = "Fetch and normalize NASDAQ public market data",
    long_about = "ndq fetches the public NASDAQ market-data endpoints and prints the \
results as normalized JSON. Prices, percentages and ranges are parsed into numbers; \
unavailable data is reported as null or empty rather than as an error.\n\
\n\
Use 'ndq <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Request timeout in milliseconds. Overrides NDQ_TIMEOUT_MS.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Tracing filter directive, e.g. `info` or `ndq_core=debug`.
    ///
    /// Takes precedence over -v and RUST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch all 14 categories for a symbol and write the record to a file.
    ///
    /// The normalized record is written unless --raw is given.
    Fetch(FetchArgs),

    /// Normalize a raw record previously written by `fetch --raw`.
    Normalize(NormalizeArgs),

    /// Latest quote.
    Quote(SymbolArgs),

    /// Dividend summary and payment history.
    Dividends(SymbolArgs),

    /// Institutional holders and recent insider trades.
    Ownership(SymbolArgs),

    /// Analyst PEG ratio, P/E ratio and growth rate.
    Analyst(SymbolArgs),

    /// Most recent short-interest settlement.
    ShortInterest(SymbolArgs),

    /// Financial statements for one reporting period.
    Financials(FinancialsArgs),

    /// Daily price history.
    Historical(HistoricalArgs),

    /// Recent news articles.
    News(NewsArgs),

    /// Several data sets for one symbol, fetched concurrently.
    Symbol(SymbolDataArgs),

    /// Screener listing, optionally narrowed to an exchange and sector.
    Screen(ScreenArgs),

    /// Ticker lists of NASDAQ, NYSE and AMEX.
    Tickers(TickersArgs),
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Market symbol, e.g. AAPL.
    pub symbol: String,

    /// Output JSON file.
    pub output: PathBuf,

    /// Write the raw vendor payloads instead of the normalized record.
    #[arg(long, default_value_t = false)]
    pub raw: bool,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Raw record JSON file.
    pub input: PathBuf,

    /// Output JSON file.
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct SymbolArgs {
    /// Market symbol, e.g. AAPL.
    pub symbol: String,
}

#[derive(Debug, Args)]
pub struct FinancialsArgs {
    pub symbol: String,

    /// Reporting period: annual or quarterly.
    #[arg(long, default_value = "annual")]
    pub period: FinancialPeriod,
}

#[derive(Debug, Args)]
pub struct HistoricalArgs {
    pub symbol: String,

    /// First day, YYYY-MM-DD. Defaults to the start of --period.
    #[arg(long)]
    pub from: Option<String>,

    /// Last day, YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    pub to: Option<String>,

    /// Look-back window: 1day, 5day, 1month, 3month or 1year.
    #[arg(long, default_value = "1month")]
    pub period: HistoryPeriod,
}

#[derive(Debug, Args)]
pub struct NewsArgs {
    pub symbol: String,

    /// Number of articles, at most 50.
    #[arg(long, default_value_t = 20)]
    pub limit: u32,
}

#[derive(Debug, Args)]
pub struct SymbolDataArgs {
    pub symbol: String,

    /// Comma-separated data sets. Defaults to all of them.
    ///
    /// quote, financials, dividends, ownership, historical, news, analyst,
    /// short-interest
    #[arg(long, value_delimiter = ',')]
    pub include: Vec<DataSet>,
}

#[derive(Debug, Args)]
pub struct ScreenArgs {
    /// nasdaq, nyse or amex. Defaults to every exchange.
    #[arg(long)]
    pub exchange: Option<Exchange>,

    /// Case-insensitive sector name, e.g. technology.
    #[arg(long)]
    pub sector: Option<String>,
}

#[derive(Debug, Args)]
pub struct TickersArgs {
    /// Print distinct symbols only.
    #[arg(long, default_value_t = false)]
    pub unique: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["ndq", "quote", "AAPL", "--pretty", "-vv", "--timeout-ms", "5000"])
            .expect("valid arguments");

        assert!(cli.pretty);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.timeout_ms, Some(5000));
        assert!(matches!(cli.command, Command::Quote(SymbolArgs { ref symbol }) if symbol == "AAPL"));
    }

    #[test]
    fn include_accepts_comma_separated_sets() {
        let cli = Cli::try_parse_from(["ndq", "symbol", "MSFT", "--include", "quote,short-interest"])
            .expect("valid arguments");

        let Command::Symbol(args) = cli.command else {
            panic!("expected symbol command");
        };
        assert_eq!(args.include, vec![DataSet::Quote, DataSet::ShortInterest]);
    }

    #[test]
    fn typed_options_reject_unknown_values() {
        assert!(Cli::try_parse_from(["ndq", "financials", "AAPL", "--period", "monthly"]).is_err());
        assert!(Cli::try_parse_from(["ndq", "screen", "--exchange", "lse"]).is_err());
        assert!(Cli::try_parse_from(["ndq", "historical", "AAPL", "--period", "2week"]).is_err());
    }

    #[test]
    fn defaults_apply() {
        let cli = Cli::try_parse_from(["ndq", "financials", "AAPL"]).expect("valid arguments");
        assert_eq!(cli.timeout_ms, None);
        assert!(matches!(
            cli.command,
            Command::Financials(FinancialsArgs { period: FinancialPeriod::Annual, .. })
        ));

        let cli = Cli::try_parse_from(["ndq", "fetch", "AAPL", "out.json", "--raw"])
            .expect("valid arguments");
        let Command::Fetch(args) = cli.command else {
            panic!("expected fetch command");
        };
        assert!(args.raw);
        assert_eq!(args.output, PathBuf::from("out.json"));
    }
}

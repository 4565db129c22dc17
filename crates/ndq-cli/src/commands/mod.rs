mod record;
mod screen;
mod symbol;

use std::time::Duration;

use ndq_core::{ClientConfig, NasdaqClient};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Run the selected command and return the document to print.
pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let client = NasdaqClient::new(&client_config(cli.timeout_ms));
    dispatch(&cli.command, &client).await
}

pub(crate) async fn dispatch(command: &Command, client: &NasdaqClient) -> Result<Value, CliError> {
    match command {
        Command::Fetch(args) => record::fetch(args, client).await,
        Command::Normalize(args) => record::normalize(args),
        Command::Quote(args) => symbol::quote(args, client).await,
        Command::Dividends(args) => symbol::dividends(args, client).await,
        Command::Ownership(args) => symbol::ownership(args, client).await,
        Command::Analyst(args) => symbol::analyst(args, client).await,
        Command::ShortInterest(args) => symbol::short_interest(args, client).await,
        Command::Financials(args) => symbol::financials(args, client).await,
        Command::Historical(args) => symbol::historical(args, client).await,
        Command::News(args) => symbol::news(args, client).await,
        Command::Symbol(args) => symbol::symbol_data(args, client).await,
        Command::Screen(args) => screen::screen(args, client).await,
        Command::Tickers(args) => screen::tickers(args, client).await,
    }
}

/// Environment settings with the command-line timeout applied on top.
fn client_config(timeout_ms: Option<u64>) -> ClientConfig {
    let config = ClientConfig::from_env();
    match timeout_ms.filter(|ms| *ms > 0) {
        Some(ms) => config.with_timeout(Duration::from_millis(ms)),
        None => config,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_timeout_overrides_environment() {
        let config = client_config(Some(1500));
        assert_eq!(config.timeout, Duration::from_millis(1500));
    }

    #[test]
    fn zero_timeout_is_ignored() {
        let config = client_config(Some(0));
        assert!(config.timeout > Duration::ZERO);
    }
}

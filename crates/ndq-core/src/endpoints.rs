//! URL templates for the vendor endpoints.

use crate::config::ClientConfig;
use crate::Symbol;

/// Endpoint URLs rooted at the configured API and web bases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base: String,
    web_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl Endpoints {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            api_base: config.api_base.clone(),
            web_base: config.web_base.clone(),
        }
    }

    pub fn screener(&self) -> String {
        format!("{}/screener/stocks", self.api_base)
    }

    pub fn quote_info(&self, symbol: &Symbol) -> String {
        self.api_path("quote", symbol, "info")
    }

    pub fn dividends(&self, symbol: &Symbol) -> String {
        self.api_path("quote", symbol, "dividends")
    }

    pub fn historical(&self, symbol: &Symbol) -> String {
        self.api_path("quote", symbol, "historical")
    }

    pub fn historical_nocp(&self, symbol: &Symbol) -> String {
        self.api_path("company", symbol, "historical-nocp")
    }

    pub fn financials(&self, symbol: &Symbol) -> String {
        self.api_path("company", symbol, "financials")
    }

    pub fn peg_ratio(&self, symbol: &Symbol) -> String {
        self.api_path("analyst", symbol, "peg-ratio")
    }

    pub fn short_interest(&self, symbol: &Symbol) -> String {
        self.api_path("quote", symbol, "short-interest")
    }

    pub fn institutional_holdings(&self, symbol: &Symbol) -> String {
        self.api_path("company", symbol, "institutional-holdings")
    }

    pub fn insider_trades(&self, symbol: &Symbol) -> String {
        self.api_path("company", symbol, "insider-trades")
    }

    pub fn sec_filings(&self, symbol: &Symbol) -> String {
        self.api_path("company", symbol, "sec-filings")
    }

    /// Press releases are searched by query string, not by path.
    pub fn press_releases(&self) -> String {
        format!("{}/news/topic/press_release", self.web_base)
    }

    pub fn news_articles(&self) -> String {
        format!("{}/news/topic/articlebysymbol", self.web_base)
    }

    fn api_path(&self, group: &str, symbol: &Symbol, leaf: &str) -> String {
        format!(
            "{}/{group}/{}/{leaf}",
            self.api_base,
            urlencoding::encode(symbol.as_str())
        )
    }
}

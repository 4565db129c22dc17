//! Vendor data categories making up a raw symbol record.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// One vendor endpoint (plus fixed parameters) fetched per symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Info,
    Dividends,
    Historical,
    #[serde(rename = "historical_5d")]
    Historical5d,
    #[serde(rename = "historical_1m")]
    Historical1m,
    FinancialsAnnual,
    FinancialsQuarterly,
    PegRatio,
    ShortInterest,
    InstitutionalHoldings,
    InsiderTrades,
    SecFilings,
    PressReleases,
    NewsArticles,
}

impl Category {
    pub const ALL: [Category; 14] = [
        Self::Info,
        Self::Dividends,
        Self::Historical,
        Self::Historical5d,
        Self::Historical1m,
        Self::FinancialsAnnual,
        Self::FinancialsQuarterly,
        Self::PegRatio,
        Self::ShortInterest,
        Self::InstitutionalHoldings,
        Self::InsiderTrades,
        Self::SecFilings,
        Self::PressReleases,
        Self::NewsArticles,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Dividends => "dividends",
            Self::Historical => "historical",
            Self::Historical5d => "historical_5d",
            Self::Historical1m => "historical_1m",
            Self::FinancialsAnnual => "financials_annual",
            Self::FinancialsQuarterly => "financials_quarterly",
            Self::PegRatio => "peg_ratio",
            Self::ShortInterest => "short_interest",
            Self::InstitutionalHoldings => "institutional_holdings",
            Self::InsiderTrades => "insider_trades",
            Self::SecFilings => "sec_filings",
            Self::PressReleases => "press_releases",
            Self::NewsArticles => "news_articles",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == name)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

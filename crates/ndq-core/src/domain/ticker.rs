use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// US exchange covered by the stock screener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Exchange {
    Nasdaq,
    Nyse,
    Amex,
}

impl Exchange {
    pub const ALL: [Exchange; 3] = [Self::Nasdaq, Self::Nyse, Self::Amex];

    /// Lower-case form used in the screener query string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nasdaq => "nasdaq",
            Self::Nyse => "nyse",
            Self::Amex => "amex",
        }
    }

    /// Upper-case tag attached to screener rows.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nasdaq => "NASDAQ",
            Self::Nyse => "NYSE",
            Self::Amex => "AMEX",
        }
    }
}

impl Display for Exchange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Exchange {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "nasdaq" => Ok(Self::Nasdaq),
            "nyse" => Ok(Self::Nyse),
            "amex" => Ok(Self::Amex),
            _ => Err(ValidationError::InvalidExchange {
                value: value.to_owned(),
            }),
        }
    }
}

/// One screener row, tagged with the exchange it was listed under.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub symbol: String,
    pub name: Option<String>,
    pub last_sale: Option<f64>,
    pub net_change: Option<f64>,
    pub pct_change: Option<f64>,
    pub volume: Option<i64>,
    pub market_cap: Option<f64>,
    pub country: Option<String>,
    pub ipo_year: Option<String>,
    pub industry: Option<String>,
    pub sector: Option<String>,
    pub url: Option<String>,
    pub exchange: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exchange_names_case_insensitively() {
        assert_eq!("NYSE".parse::<Exchange>(), Ok(Exchange::Nyse));
        assert_eq!(" amex ".parse::<Exchange>(), Ok(Exchange::Amex));
        assert!(matches!(
            "lse".parse::<Exchange>(),
            Err(ValidationError::InvalidExchange { .. })
        ));
    }

    #[test]
    fn serializes_exchange_as_upper_case_tag() {
        let json = serde_json::to_string(&Exchange::Nasdaq).expect("serializable");
        assert_eq!(json, "\"NASDAQ\"");
    }
}

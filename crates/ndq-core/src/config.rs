//! Client configuration.
//!
//! # Environment Variables
//!
//! - `NDQ_TIMEOUT_MS`: per-request timeout in milliseconds (default: 30000)
//! - `NDQ_API_BASE`: general API base (default: `https://api.nasdaq.com/api`)
//! - `NDQ_WEB_BASE`: web front-end API base (default: `https://www.nasdaq.com/api`)
//! - `NDQ_USER_AGENT`: browser-like user agent sent with every request

use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.nasdaq.com/api";
pub const DEFAULT_WEB_BASE: &str = "https://www.nasdaq.com/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:85.0) Gecko/20100101 Firefox/85.0";

/// Settings shared by every request a client issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub user_agent: String,
    pub api_base: String,
    pub web_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            web_base: DEFAULT_WEB_BASE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by any `NDQ_*` variables that are set.
    ///
    /// Unparseable timeouts fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let timeout = lookup("NDQ_TIMEOUT_MS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.timeout);

        Self {
            timeout,
            user_agent: lookup("NDQ_USER_AGENT").unwrap_or(defaults.user_agent),
            api_base: lookup("NDQ_API_BASE").map(trim_base).unwrap_or(defaults.api_base),
            web_base: lookup("NDQ_WEB_BASE").map(trim_base).unwrap_or(defaults.web_base),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Point both bases at another host, e.g. a local fixture server.
    pub fn with_bases(mut self, api_base: impl Into<String>, web_base: impl Into<String>) -> Self {
        self.api_base = trim_base(api_base.into());
        self.web_base = trim_base(web_base.into());
        self
    }

    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

fn trim_base(base: String) -> String {
    base.trim_end_matches('/').to_string()
}

use thiserror::Error;

/// Caller-input errors exposed by `ndq-core`.
///
/// These are the only failures the library surfaces for a single symbol;
/// environmental failures degrade to absent payloads instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid exchange '{value}', expected one of nasdaq, nyse, amex")]
    InvalidExchange { value: String },
    #[error("invalid data set '{value}'")]
    InvalidDataSet { value: String },
    #[error("invalid history period '{value}', expected one of 1day, 5day, 1month, 3month, 1year")]
    InvalidHistoryPeriod { value: String },
    #[error("invalid financial period '{value}', expected annual or quarterly")]
    InvalidFinancialPeriod { value: String },

    #[error("date must be formatted YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
}

/// Failure inside a single section mapper.
///
/// The normalization orchestrator catches these per section, so one
/// malformed category never spoils the rest of the record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("expected {expected} at '{path}', found {found}")]
    UnexpectedShape {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Top-level error type for record (de)serialization helpers.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

use thiserror::Error;

use crate::domain::Symbol;
use crate::http_client::HttpError;

/// Validation and contract errors exposed by `quotes-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,

    #[error("timestamp must be RFC3339 or 'Www Mmm DD HH:MM:SS UTC+HH:MM YYYY': '{value}'")]
    InvalidTimestamp { value: String },

    #[error("{field} must contain the '{placeholder}' placeholder")]
    MissingPlaceholder {
        field: &'static str,
        placeholder: &'static str,
    },
    #[error("field '{field}' must be greater than zero")]
    ZeroValue { field: &'static str },
}

/// Top-level error type for configuration and other non-request operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Caller-visible lookup error.
///
/// Transport failures never surface here; they are absorbed into a fallback record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuoteError {
    #[error("Symbol not found: {symbol}")]
    SymbolNotFound { symbol: Symbol },
}

impl QuoteError {
    pub fn symbol_not_found(symbol: Symbol) -> Self {
        Self::SymbolNotFound { symbol }
    }
}

/// Failure of the primary remote call. Routed to the fallback and logged, never returned.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("request exceeded {timeout_ms}ms deadline")]
    Timeout { timeout_ms: u64 },

    #[error("upstream returned status {status}")]
    Status { status: u16 },

    #[error("failed to decode upstream body: {0}")]
    Decode(#[from] serde_json::Error),
}

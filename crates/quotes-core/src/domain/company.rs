use serde::{Deserialize, Serialize};

use super::quote::FALLBACK_MARKER;

/// Company lookup match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub symbol: String,
    pub exchange: String,
}

impl CompanyInfo {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        exchange: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            exchange: exchange.into(),
        }
    }

    /// Degraded entry returned in place of a failed lookup.
    pub fn fallback(name: &str) -> Self {
        Self::new(name, FALLBACK_MARKER, FALLBACK_MARKER)
    }

    /// Matches on the marker values, so an upstream entry whose symbol and exchange are both
    /// literally `"Error"` also reports `true`.
    pub fn is_fallback(&self) -> bool {
        self.symbol == FALLBACK_MARKER && self.exchange == FALLBACK_MARKER
    }
}

/// Lookup entry as sent by the upstream API.
#[derive(Debug, Deserialize)]
pub(crate) struct CompanyPayload {
    #[serde(rename = "Name", alias = "name", default)]
    name: Option<String>,
    #[serde(rename = "Symbol", alias = "symbol", default)]
    symbol: Option<String>,
    #[serde(rename = "Exchange", alias = "exchange", default)]
    exchange: Option<String>,
}

impl From<CompanyPayload> for CompanyInfo {
    fn from(value: CompanyPayload) -> Self {
        Self {
            name: value.name.unwrap_or_default(),
            symbol: value.symbol.unwrap_or_default(),
            exchange: value.exchange.unwrap_or_default(),
        }
    }
}

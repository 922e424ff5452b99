use std::collections::BTreeMap;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Symbol, UtcDateTime};

/// Literal written into every field of a degraded record.
pub const FALLBACK_MARKER: &str = "Error";

/// Latest quote for a single symbol.
///
/// Price fields are passed through from the upstream body untouched; fields the crate does not
/// model are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub status: String,
    pub timestamp: UtcDateTime,
    #[serde(default)]
    pub last_price: Option<f64>,
    #[serde(default)]
    pub change: Option<f64>,
    #[serde(default)]
    pub change_percent: Option<f64>,
    #[serde(default)]
    pub ms_date: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub volume: Option<u64>,
    #[serde(default)]
    pub change_ytd: Option<f64>,
    #[serde(default)]
    pub change_percent_ytd: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
    /// Set only by [`Quote::fallback`]; an upstream record named "Error" stays live data.
    #[serde(skip)]
    degraded: bool,
}

impl Quote {
    /// Degraded quote returned in place of a failed upstream call.
    pub fn fallback(symbol: &Symbol) -> Self {
        Self {
            symbol: symbol.as_str().to_owned(),
            name: String::from(FALLBACK_MARKER),
            status: String::from(FALLBACK_MARKER),
            timestamp: UtcDateTime::now(),
            last_price: None,
            change: None,
            change_percent: None,
            ms_date: None,
            market_cap: None,
            volume: None,
            change_ytd: None,
            change_percent_ytd: None,
            high: None,
            low: None,
            open: None,
            extra: BTreeMap::new(),
            degraded: true,
        }
    }

    /// Whether this record was produced locally because the upstream call failed.
    ///
    /// Not carried through serialization: a deserialized quote always reports `false`.
    pub fn is_fallback(&self) -> bool {
        self.degraded
    }
}

/// Quote body as sent by the upstream API.
///
/// Accepts the upstream PascalCase names and their lower/camel-case spellings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct QuotePayload {
    #[serde(rename = "Symbol", alias = "symbol")]
    symbol: Option<String>,
    #[serde(rename = "Name", alias = "name")]
    name: Option<String>,
    #[serde(rename = "Status", alias = "status")]
    status: Option<String>,
    #[serde(
        rename = "Timestamp",
        alias = "timestamp",
        deserialize_with = "deserialize_optional_timestamp"
    )]
    timestamp: Option<UtcDateTime>,
    #[serde(rename = "LastPrice", alias = "lastPrice")]
    last_price: Option<f64>,
    #[serde(rename = "Change", alias = "change")]
    change: Option<f64>,
    #[serde(rename = "ChangePercent", alias = "changePercent")]
    change_percent: Option<f64>,
    #[serde(rename = "MSDate", alias = "msDate")]
    ms_date: Option<f64>,
    #[serde(rename = "MarketCap", alias = "marketCap")]
    market_cap: Option<f64>,
    #[serde(rename = "Volume", alias = "volume")]
    volume: Option<u64>,
    #[serde(rename = "ChangeYTD", alias = "changeYTD")]
    change_ytd: Option<f64>,
    #[serde(rename = "ChangePercentYTD", alias = "changePercentYTD")]
    change_percent_ytd: Option<f64>,
    #[serde(rename = "High", alias = "high")]
    high: Option<f64>,
    #[serde(rename = "Low", alias = "low")]
    low: Option<f64>,
    #[serde(rename = "Open", alias = "open")]
    open: Option<f64>,
    #[serde(rename = "Message", alias = "message")]
    message: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl QuotePayload {
    /// Upstream diagnostic text, present on lookup misses.
    pub(crate) fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Converts into a [`Quote`], or `None` when the body carries no symbol.
    pub(crate) fn into_quote(self, received_at: UtcDateTime) -> Option<Quote> {
        let symbol = self.symbol.filter(|symbol| !symbol.trim().is_empty())?;

        Some(Quote {
            symbol,
            name: self.name.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            timestamp: self.timestamp.unwrap_or(received_at),
            last_price: self.last_price,
            change: self.change,
            change_percent: self.change_percent,
            ms_date: self.ms_date,
            market_cap: self.market_cap,
            volume: self.volume,
            change_ytd: self.change_ytd,
            change_percent_ytd: self.change_percent_ytd,
            high: self.high,
            low: self.low,
            open: self.open,
            extra: self.extra,
            degraded: false,
        })
    }
}

fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<UtcDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if !value.trim().is_empty() => UtcDateTime::parse(&value)
            .map(Some)
            .map_err(D::Error::custom),
        _ => Ok(None),
    }
}

//! Client configuration.
//!
//! Endpoint URLs are templates; `{symbol}` and `{name}` are replaced with the percent-encoded
//! lookup value. Deployments that discover endpoints at runtime can hand the client a JSON
//! document through [`QuoteClientConfig::from_json`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::circuit_breaker::CircuitBreakerConfig;
use crate::{CoreError, ValidationError};

pub const DEFAULT_QUOTE_URL: &str =
    "http://dev.markitondemand.com/Api/v2/Quote/json?symbol={symbol}";
pub const DEFAULT_COMPANY_URL: &str =
    "http://dev.markitondemand.com/Api/v2/Lookup/json?input={name}";

pub const SYMBOL_PLACEHOLDER: &str = "{symbol}";
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Settings for [`QuoteClient`](crate::QuoteClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteClientConfig {
    pub quote_url: String,
    pub company_url: String,
    /// Per-call deadline covering connect, response and body read.
    pub timeout_ms: u64,
    /// Consecutive failures before an endpoint's circuit opens.
    pub failure_threshold: u32,
    /// How long an open circuit short-circuits before letting a trial call through.
    pub open_timeout_ms: u64,
}

impl Default for QuoteClientConfig {
    fn default() -> Self {
        let breaker = CircuitBreakerConfig::default();
        Self {
            quote_url: String::from(DEFAULT_QUOTE_URL),
            company_url: String::from(DEFAULT_COMPANY_URL),
            timeout_ms: 1_000,
            failure_threshold: breaker.failure_threshold,
            open_timeout_ms: u64::try_from(breaker.open_timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl QuoteClientConfig {
    pub fn from_json(input: &str) -> Result<Self, CoreError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_quote_url(mut self, url: impl Into<String>) -> Self {
        self.quote_url = url.into();
        self
    }

    pub fn with_company_url(mut self, url: impl Into<String>) -> Self {
        self.company_url = url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_circuit_breaker(mut self, config: CircuitBreakerConfig) -> Self {
        self.failure_threshold = config.failure_threshold;
        self.open_timeout_ms = u64::try_from(config.open_timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.quote_url.contains(SYMBOL_PLACEHOLDER) {
            return Err(ValidationError::MissingPlaceholder {
                field: "quote_url",
                placeholder: SYMBOL_PLACEHOLDER,
            });
        }
        if !self.company_url.contains(NAME_PLACEHOLDER) {
            return Err(ValidationError::MissingPlaceholder {
                field: "company_url",
                placeholder: NAME_PLACEHOLDER,
            });
        }
        if self.timeout_ms == 0 {
            return Err(ValidationError::ZeroValue { field: "timeout_ms" });
        }
        if self.failure_threshold == 0 {
            return Err(ValidationError::ZeroValue {
                field: "failure_threshold",
            });
        }
        Ok(())
    }

    pub fn circuit_breaker(&self) -> CircuitBreakerConfig {
        CircuitBreakerConfig {
            failure_threshold: self.failure_threshold,
            open_timeout: Duration::from_millis(self.open_timeout_ms),
        }
    }

    pub fn quote_endpoint(&self, symbol: &str) -> String {
        expand(&self.quote_url, SYMBOL_PLACEHOLDER, symbol)
    }

    pub fn company_endpoint(&self, name: &str) -> String {
        expand(&self.company_url, NAME_PLACEHOLDER, name)
    }
}

fn expand(template: &str, placeholder: &str, value: &str) -> String {
    template.replace(placeholder, &urlencoding::encode(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_points_at_markit() {
        let config = QuoteClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.quote_endpoint("AAPL"),
            "http://dev.markitondemand.com/Api/v2/Quote/json?symbol=AAPL"
        );
    }

    #[test]
    fn company_search_text_is_percent_encoded() {
        let config = QuoteClientConfig::default();
        assert_eq!(
            config.company_endpoint("AT&T Inc"),
            "http://dev.markitondemand.com/Api/v2/Lookup/json?input=AT%26T%20Inc"
        );
    }

    #[test]
    fn rejects_template_without_placeholder() {
        let config = QuoteClientConfig::default().with_quote_url("http://quotes.test/quote");
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingPlaceholder {
                field: "quote_url",
                placeholder: "{symbol}",
            })
        );
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = QuoteClientConfig::default().with_timeout_ms(0);
        assert_eq!(
            config.validate(),
            Err(ValidationError::ZeroValue { field: "timeout_ms" })
        );
    }

    #[test]
    fn oversized_open_timeout_saturates() {
        let config = QuoteClientConfig::default().with_circuit_breaker(CircuitBreakerConfig {
            failure_threshold: 3,
            open_timeout: Duration::MAX,
        });

        assert_eq!(config.open_timeout_ms, u64::MAX);
        assert_eq!(
            config.circuit_breaker().open_timeout,
            Duration::from_millis(u64::MAX)
        );
    }

    #[test]
    fn from_json_fills_missing_fields_with_defaults() {
        let config = QuoteClientConfig::from_json(
            r#"{"quote_url":"http://quotes.internal/q?s={symbol}","failure_threshold":2}"#,
        )
        .expect("config should load");

        assert_eq!(config.quote_url, "http://quotes.internal/q?s={symbol}");
        assert_eq!(config.company_url, DEFAULT_COMPANY_URL);
        assert_eq!(config.circuit_breaker().failure_threshold, 2);
        assert_eq!(config.timeout_ms, 1_000);
    }

    #[test]
    fn from_json_reports_validation_failures() {
        let err = QuoteClientConfig::from_json(r#"{"failure_threshold":0}"#).expect_err("must fail");
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::ZeroValue {
                field: "failure_threshold"
            })
        ));
    }
}

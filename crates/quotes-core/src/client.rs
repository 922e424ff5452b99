//! Quote and company lookup with fallback.
//!
//! Every upstream call goes through the endpoint's [`CircuitBreaker`]. Any transport failure,
//! timeout, non-2xx status or undecodable body is absorbed: the caller receives a record whose
//! fields read `"Error"` instead of an error. The one exception is a quote body that decodes
//! but carries no symbol, which is reported as [`QuoteError::SymbolNotFound`].
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use quotes_core::{QuoteClient, QuoteClientConfig, QuoteSource, ReqwestHttpClient, Symbol};
//!
//! let client = QuoteClient::new(Arc::new(ReqwestHttpClient::new()), QuoteClientConfig::default())?;
//! let quote = client.quote(&Symbol::new("AAPL")?).await?;
//! if quote.is_fallback() {
//!     // upstream degraded
//! }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use crate::circuit_breaker::{CircuitBreaker, CircuitState};
use crate::config::QuoteClientConfig;
use crate::domain::{CompanyPayload, QuotePayload};
use crate::error::{FetchError, QuoteError};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{CompanyInfo, Quote, Symbol, UtcDateTime, ValidationError};

/// Lookup contract consumed by callers such as a web layer.
pub trait QuoteSource: Send + Sync {
    /// Latest quote for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::SymbolNotFound`] when the upstream answers without a symbol.
    /// Upstream failures are not errors; they yield [`Quote::fallback`].
    fn quote<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Quote, QuoteError>> + Send + 'a>>;

    /// Companies whose name or symbol match `name`, in upstream order.
    ///
    /// Upstream failures yield a single [`CompanyInfo::fallback`] entry.
    fn company_info<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Vec<CompanyInfo>> + Send + 'a>>;
}

/// HTTP-backed [`QuoteSource`].
pub struct QuoteClient {
    http_client: Arc<dyn HttpClient>,
    config: QuoteClientConfig,
    quote_circuit: CircuitBreaker,
    company_circuit: CircuitBreaker,
}

impl QuoteClient {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        config: QuoteClientConfig,
    ) -> Result<Self, ValidationError> {
        config.validate()?;
        let breaker = config.circuit_breaker();

        Ok(Self {
            http_client,
            quote_circuit: CircuitBreaker::new("quote", breaker),
            company_circuit: CircuitBreaker::new("company", breaker),
            config,
        })
    }

    pub fn config(&self) -> &QuoteClientConfig {
        &self.config
    }

    pub fn quote_circuit_state(&self) -> CircuitState {
        self.quote_circuit.state()
    }

    pub fn company_circuit_state(&self) -> CircuitState {
        self.company_circuit.state()
    }

    async fn fetch_quote(&self, symbol: &Symbol) -> Result<Option<Quote>, FetchError> {
        let body = self
            .get(self.config.quote_endpoint(symbol.as_str()))
            .await?;
        let payload: QuotePayload = serde_json::from_str(&body)?;
        if let Some(message) = payload.message() {
            debug!("quote upstream message for {symbol}: {message}");
        }
        Ok(payload.into_quote(UtcDateTime::now()))
    }

    async fn fetch_companies(&self, name: &str) -> Result<Vec<CompanyInfo>, FetchError> {
        let body = self.get(self.config.company_endpoint(name)).await?;
        let payloads: Vec<CompanyPayload> = serde_json::from_str(&body)?;
        Ok(payloads.into_iter().map(CompanyInfo::from).collect())
    }

    async fn get(&self, url: String) -> Result<String, FetchError> {
        let timeout_ms = self.config.timeout_ms;
        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout_ms(timeout_ms);

        // The transport timeout is advisory; the deadline also covers injected clients.
        let response = tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            self.http_client.execute(request),
        )
        .await
        .map_err(|_| FetchError::Timeout { timeout_ms })?
        .map_err(|error| {
            if error.is_timeout() {
                FetchError::Timeout { timeout_ms }
            } else {
                FetchError::Transport(error)
            }
        })?;

        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
            });
        }

        Ok(response.body)
    }
}

impl QuoteSource for QuoteClient {
    fn quote<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Quote, QuoteError>> + Send + 'a>> {
        Box::pin(async move {
            info!("retrieving quote for {symbol}");

            if !self.quote_circuit.allow_request() {
                warn!("invoked fallback on {symbol}: quote circuit is open");
                return Ok(Quote::fallback(symbol));
            }

            match self.fetch_quote(symbol).await {
                Ok(Some(quote)) => {
                    self.quote_circuit.record_success();
                    debug!("retrieved quote: {quote:?}");
                    Ok(quote)
                }
                Ok(None) => {
                    // The upstream answered; a miss says nothing about its health.
                    self.quote_circuit.record_success();
                    Err(QuoteError::symbol_not_found(symbol.clone()))
                }
                Err(error) => {
                    self.quote_circuit.record_failure();
                    warn!("invoked fallback on {symbol}: {error}");
                    Ok(Quote::fallback(symbol))
                }
            }
        })
    }

    fn company_info<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Vec<CompanyInfo>> + Send + 'a>> {
        Box::pin(async move {
            debug!("retrieving company info for {name}");

            if !self.company_circuit.allow_request() {
                warn!("invoked fallback on {name}: company circuit is open");
                return vec![CompanyInfo::fallback(name)];
            }

            match self.fetch_companies(name).await {
                Ok(companies) => {
                    self.company_circuit.record_success();
                    debug!("retrieved {} companies for {name}", companies.len());
                    companies
                }
                Err(error) => {
                    self.company_circuit.record_failure();
                    warn!("invoked fallback on {name}: {error}");
                    vec![CompanyInfo::fallback(name)]
                }
            }
        })
    }
}

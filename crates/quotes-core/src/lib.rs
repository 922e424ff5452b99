//! # Quotes Core
//!
//! Client for a remote stock quote API: latest quote by symbol and company lookup by name.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`QuoteSource`] trait and the HTTP-backed [`QuoteClient`] |
//! | [`circuit_breaker`] | Per-endpoint circuit breaker |
//! | [`config`] | Endpoint templates, timeout and breaker settings |
//! | [`domain`] | Domain models (Quote, CompanyInfo, Symbol) |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP client abstraction |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Caller         │
//! └────────┬────────┘
//!          │ QuoteSource
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  QuoteClient    │────▶│ Circuit Breaker  │
//! └────────┬────────┘     └──────────────────┘
//!          │  failure ──▶ "Error" fallback record
//!          ▼
//! ┌─────────────────┐
//! │ HTTP Client     │
//! │ (reqwest/mock)  │
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Only a symbol miss is an error. Everything else degrades to a fallback record:
//!
//! ```rust,ignore
//! match client.quote(&symbol).await {
//!     Ok(quote) if quote.is_fallback() => { /* upstream unavailable */ }
//!     Ok(quote) => { /* live data */ }
//!     Err(QuoteError::SymbolNotFound { symbol }) => { /* report to user */ }
//! }
//! ```

pub mod circuit_breaker;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};

pub use client::{QuoteClient, QuoteSource};

pub use config::{QuoteClientConfig, DEFAULT_COMPANY_URL, DEFAULT_QUOTE_URL};

pub use domain::{CompanyInfo, Quote, Symbol, UtcDateTime, FALLBACK_MARKER};

pub use error::{CoreError, FetchError, QuoteError, ValidationError};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

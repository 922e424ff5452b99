//! # Domain Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Quote`] | Latest quote with pass-through price fields |
//! | [`CompanyInfo`] | Company lookup match |
//! | [`Symbol`] | Validated ticker symbol |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! Both records have a `fallback` constructor producing the degraded `"Error"` record that
//! [`QuoteClient`](crate::QuoteClient) returns when the upstream call fails.

mod company;
mod quote;
mod symbol;
mod timestamp;

pub use company::CompanyInfo;
pub(crate) use company::CompanyPayload;
pub use quote::{Quote, FALLBACK_MARKER};
pub(crate) use quote::QuotePayload;
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;

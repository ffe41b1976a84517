//! Backend module
//!
//! Typed access to the external scraping service. This crate never scrapes
//! anything itself; it only forwards requests here.

mod client;
mod types;

pub use client::{build_http_client, BackendClient};
pub use types::{
    BackendQuote, QuotesPage, QuotesQuery, ScrapeProgress, ScrapeStats, ScrapeStatusReport,
    StartScrapeRequest,
};

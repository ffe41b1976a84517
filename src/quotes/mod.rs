//! Quote module
//!
//! Holds the client-side quote records and the store that owns them.
//!
//! # Components
//!
//! - `Quote`: a single scraped text/author/topic record
//! - `QuoteUpdate`: a partial update that can never touch the id
//! - `QuoteStore`: the ordered, id-keyed collection for one session

mod quote;
mod store;

pub use quote::{Quote, QuoteUpdate};
pub use store::QuoteStore;

/// Bucket used by `QuoteStore::by_topic` for quotes without a topic
pub const OTHER_TOPIC: &str = "other";

use crate::quotes::Quote;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Body of `POST /api/scrape/start` as the backend expects it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartScrapeRequest {
    pub topic: String,

    /// `None` is sent as JSON `null` (no limit), never dropped
    pub max_quotes: Option<u32>,

    pub include_images: bool,

    pub store_in_database: bool,
}

/// Progress counters reported by `GET /api/scrape/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapeProgress {
    #[serde(default)]
    pub current: u64,
    #[serde(default)]
    pub total: u64,
}

/// Extraction statistics reported by `GET /api/scrape/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapeStats {
    #[serde(default)]
    pub extracted: u64,
    #[serde(default)]
    pub images: u64,
    #[serde(default)]
    pub errors: u64,
    /// Seconds; whole values are written as integers
    #[serde(default, serialize_with = "serialize_seconds")]
    pub elapsed: f64,
}

fn serialize_seconds<S: Serializer>(seconds: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if seconds.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(seconds) {
        serializer.serialize_u64(*seconds as u64)
    } else {
        serializer.serialize_f64(*seconds)
    }
}

/// Status document returned by the backend
///
/// Only `status` is required; counters default to zero so partial reports
/// from older backends still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeStatusReport {
    pub status: String,
    #[serde(default)]
    pub progress: ScrapeProgress,
    #[serde(default)]
    pub stats: ScrapeStats,
}

impl ScrapeStatusReport {
    /// The report of a backend with no job running
    pub fn idle() -> Self {
        Self {
            status: "idle".to_string(),
            progress: ScrapeProgress::default(),
            stats: ScrapeStats::default(),
        }
    }
}

/// Query parameters for `GET /api/quotes`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotesQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// A quote as listed by the backend's `GET /api/quotes`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackendQuote {
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
    pub author: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// RFC 3339, or a naive timestamp taken as UTC
    #[serde(default)]
    pub created_at: Option<String>,
}

impl BackendQuote {
    /// Converts to a store quote tagged with `topic`
    ///
    /// Returns None for quotes the backend has not assigned an id yet.
    pub fn into_quote(self, topic: Option<&str>) -> Option<Quote> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let mut quote = Quote::new(id, self.text, self.author);
        quote.topic = topic.map(str::to_string);
        quote.image_url = self.image_url.filter(|url| !url.is_empty());
        quote.created_at = self.created_at.as_deref().and_then(parse_timestamp);
        Some(quote)
    }
}

/// Body of the backend's `GET /api/quotes`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QuotesPage {
    #[serde(default)]
    pub quotes: Vec<BackendQuote>,
    #[serde(default)]
    pub total: u64,
}

impl QuotesPage {
    /// Converts every quote that has an id
    pub fn into_quotes(self, topic: Option<&str>) -> Vec<Quote> {
        self.quotes
            .into_iter()
            .filter_map(|q| q.into_quote(topic))
            .collect()
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

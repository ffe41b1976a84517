use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single scraped quote held client-side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Unique key within a store
    pub id: String,

    pub text: String,

    pub author: String,

    /// Topic the quote was scraped for; grouped as "other" when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Stamped on insert when missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quote {
    /// Creates a quote with only the required fields set
    pub fn new(id: impl Into<String>, text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            author: author.into(),
            topic: None,
            image_url: None,
            created_at: None,
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Returns the grouping key used by `QuoteStore::by_topic`
    pub fn topic_key(&self) -> &str {
        match self.topic.as_deref() {
            Some(topic) if !topic.is_empty() => topic,
            _ => super::OTHER_TOPIC,
        }
    }

    /// Merges the fields present in `update`, leaving the id untouched
    pub fn apply(&mut self, update: QuoteUpdate) {
        if let Some(text) = update.text {
            self.text = text;
        }
        if let Some(author) = update.author {
            self.author = author;
        }
        if let Some(topic) = update.topic {
            self.topic = Some(topic);
        }
        if let Some(image_url) = update.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(created_at) = update.created_at {
            self.created_at = Some(created_at);
        }
    }
}

/// Partial update for a quote
///
/// There is no `id` field: ids are immutable once stored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteUpdate {
    pub text: Option<String>,
    pub author: Option<String>,
    pub topic: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl QuoteUpdate {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.author.is_none()
            && self.topic.is_none()
            && self.image_url.is_none()
            && self.created_at.is_none()
    }
}

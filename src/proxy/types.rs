use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Uniform response envelope of the client-facing routes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Failure detail; set by some backends alongside `success: false`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiEnvelope {
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Best available description of a failed envelope
    pub fn failure_reason(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// Upper bound on the number of quotes a scraping job should collect
///
/// Three states are kept apart on purpose: a missing field takes the
/// default limit, an explicit JSON `null` means no limit, and a number is
/// a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaxQuotes {
    #[default]
    Unset,
    Unlimited,
    Limit(u32),
}

impl MaxQuotes {
    /// Limit applied when the caller did not provide one
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Resolves to the value sent to the backend (`None` = no limit)
    pub fn resolve(self) -> Option<u32> {
        match self {
            Self::Unset => Some(Self::DEFAULT_LIMIT),
            Self::Unlimited => None,
            Self::Limit(n) => Some(n),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl From<Option<u32>> for MaxQuotes {
    fn from(value: Option<u32>) -> Self {
        match value {
            Some(n) => Self::Limit(n),
            None => Self::Unlimited,
        }
    }
}

impl Serialize for MaxQuotes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.resolve().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MaxQuotes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<u32>::deserialize(deserializer).map(Self::from)
    }
}

/// Body of the client-facing `POST /api/scrape/start`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
    pub topic: String,

    #[serde(default, skip_serializing_if = "MaxQuotes::is_unset")]
    pub max_quotes: MaxQuotes,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_images: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_in_database: Option<bool>,
}

impl StartRequest {
    /// Translates to the backend's snake_case body, filling defaults
    pub fn to_backend(&self) -> crate::backend::StartScrapeRequest {
        crate::backend::StartScrapeRequest {
            topic: self.topic.clone(),
            max_quotes: self.max_quotes.resolve(),
            include_images: self.include_images.unwrap_or(true),
            store_in_database: self.store_in_database.unwrap_or(true),
        }
    }
}

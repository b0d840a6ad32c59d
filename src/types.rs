use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One normalized news article from an RSS/Atom feed.
///
/// `link` is the identity key: within a fetch cycle, two entries with the
/// same link collapse into one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub published_at: DateTime<Utc>,
    pub source: String,
    pub snippet: String,
    pub image_url: Option<String>,
}

/// One normalized social post, either from the live search API or from the
/// local sample set.
///
/// `id` is the identity key. `timestamp` is a pre-formatted relative label
/// ("5分前", "3時間前", ...) computed at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub id: String,
    pub user_name: String,
    pub user_handle: String,
    pub user_image: String,
    pub content: String,
    pub timestamp: String,
    pub replies: u32,
    pub reposts: u32,
    pub likes: u32,
    pub link: String,
}

/// A feed item tagged by origin, as it appears in the combined view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum FeedItem {
    News(NewsItem),
    Social(SocialPost),
}

/// A feed item with its computed relevance score. Derived per request,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub item: FeedItem,
    pub score: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, HubError>;

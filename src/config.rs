use std::env;

/// HTTP fetch settings shared by both source adapters.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "ai-news-hub/1.0".to_string(),
            timeout_seconds: 10,
        }
    }
}

/// Credentials for the social search API.
///
/// A missing key is a supported configuration state, not an error: the
/// social adapter falls back to its local sample set.
#[derive(Debug, Clone)]
pub struct SocialApiConfig {
    pub api_key: Option<String>,
    pub api_host: String,
}

pub const DEFAULT_API_HOST: &str = "social-data-api.p.rapidapi.com";

impl SocialApiConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("X_API_KEY").ok().filter(|key| !key.is_empty()),
            api_host: env::var("X_API_HOST").unwrap_or_else(|_| DEFAULT_API_HOST.to_string()),
        }
    }
}

impl Default for SocialApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_host: DEFAULT_API_HOST.to_string(),
        }
    }
}

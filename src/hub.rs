use crate::config::{FetchConfig, SocialApiConfig};
use crate::sources::{NewsSource, SocialSource};
use crate::types::{NewsItem, SocialPost};
use crate::views::{build_views, DashboardViews};
use crate::vocab::Vocabulary;
use tracing::info;

/// Owns the two source adapters and the vocabulary, and produces
/// request-scoped snapshots.
pub struct ContentHub {
    news: NewsSource,
    social: SocialSource,
    vocab: Vocabulary,
}

impl ContentHub {
    pub fn new(fetch_config: &FetchConfig, api_config: SocialApiConfig, vocab: Vocabulary) -> Self {
        Self {
            news: NewsSource::new(fetch_config),
            social: SocialSource::new(fetch_config, api_config),
            vocab,
        }
    }

    /// Default configuration with social credentials from the environment.
    pub fn from_env() -> Self {
        Self::new(
            &FetchConfig::default(),
            SocialApiConfig::from_env(),
            Vocabulary::default(),
        )
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Fan out to both adapters in parallel and join once both settle.
    /// Each adapter already converts failure into an empty or fallback
    /// list, so the join itself cannot fail.
    pub async fn load(&self, query: &str) -> HubSnapshot {
        let (news, posts) = tokio::join!(
            self.news.fetch(query, &self.vocab),
            self.social.fetch(query)
        );

        info!(
            "Loaded snapshot for {:?}: {} news items, {} posts",
            query,
            news.len(),
            posts.len()
        );

        HubSnapshot {
            query: query.to_string(),
            news,
            posts,
        }
    }
}

/// The cached fetch results for one request. Threshold and view changes
/// recompute views from this snapshot without re-fetching.
#[derive(Debug, Clone)]
pub struct HubSnapshot {
    pub query: String,
    pub news: Vec<NewsItem>,
    pub posts: Vec<SocialPost>,
}

impl HubSnapshot {
    pub fn views(&self, threshold: u32, vocab: &Vocabulary) -> DashboardViews {
        build_views(&self.news, &self.posts, &self.query, threshold, vocab)
    }

    /// Re-score the cached lists under a different query, e.g. when the
    /// shell commits a new search without re-fetching.
    pub fn views_for_query(
        &self,
        query: &str,
        threshold: u32,
        vocab: &Vocabulary,
    ) -> DashboardViews {
        build_views(&self.news, &self.posts, query, threshold, vocab)
    }
}

pub mod config;
pub mod fetcher;
pub mod hub;
pub mod scoring;
pub mod sources;
pub mod state;
pub mod suggest;
pub mod types;
pub mod views;
pub mod vocab;

pub use config::{FetchConfig, SocialApiConfig};
pub use fetcher::Fetcher;
pub use hub::{ContentHub, HubSnapshot};
pub use scoring::{item_score, relevance_score};
pub use sources::{NewsSource, SocialSource};
pub use state::{DashboardState, Key, Tab};
pub use suggest::suggest;
pub use types::*;
pub use views::{build_views, DashboardViews, MAX_THRESHOLD};
pub use vocab::Vocabulary;

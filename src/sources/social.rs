use crate::config::{FetchConfig, SocialApiConfig};
use crate::fetcher::Fetcher;
use crate::types::{HubError, Result, SocialPost};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

/// Queries that match the whole sample set instead of filtering it.
const SAMPLE_MATCH_ALL: &[&str] = &["Artificial Intelligence", "AI", "人工知能"];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // The API exposes the post list under either of two top-level keys.
    #[serde(default, alias = "results")]
    tweets: Vec<RawPost>,
}

#[derive(Debug, Deserialize)]
struct RawPost {
    #[serde(default)]
    id_str: Option<String>,
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    user: Option<RawUser>,
    // Body text arrives under either of two field names.
    #[serde(default, alias = "text")]
    full_text: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    favorite_count: u32,
    #[serde(default)]
    retweet_count: u32,
    #[serde(default)]
    reply_count: u32,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    screen_name: Option<String>,
    #[serde(default)]
    profile_image_url_https: Option<String>,
}

/// Social adapter: live search when a credential is configured, sample
/// fallback otherwise.
///
/// As long as a sample set exists, this adapter never returns zero items:
/// an empty live result, any error, or a fruitless sample filter all fall
/// back to a non-empty list.
pub struct SocialSource {
    fetcher: Fetcher,
    config: SocialApiConfig,
    samples: Vec<SocialPost>,
}

impl SocialSource {
    pub fn new(fetch_config: &FetchConfig, config: SocialApiConfig) -> Self {
        Self {
            fetcher: Fetcher::new(fetch_config),
            config,
            samples: sample_posts(),
        }
    }

    /// Replace the fallback sample set, e.g. with fixtures in tests.
    pub fn with_samples(mut self, samples: Vec<SocialPost>) -> Self {
        self.samples = samples;
        self
    }

    pub async fn fetch(&self, query: &str) -> Vec<SocialPost> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            info!("X_API_KEY is not set, using sample posts");
            return self.filtered_samples(query);
        };

        match self.fetch_live(api_key, query).await {
            Ok(posts) if !posts.is_empty() => posts,
            Ok(_) => {
                info!("Live search returned no posts for {:?}, using samples", query);
                self.filtered_samples(query)
            }
            Err(e) => {
                warn!("Live search failed for {:?}: {}", query, e);
                self.filtered_samples(query)
            }
        }
    }

    async fn fetch_live(&self, api_key: &str, query: &str) -> Result<Vec<SocialPost>> {
        // Bias the search toward Japanese posts with a minimum engagement.
        let search_query = format!("{} lang:ja min_faves:10", query);
        let url = Url::parse_with_params(
            &format!("https://{}/status/search", self.config.api_host),
            &[("query", search_query.as_str()), ("type", "Top")],
        )?;

        debug!("Searching posts: {}", url);

        let response = self
            .fetcher
            .get(url.as_str())
            .header("x-rapidapi-key", api_key)
            .header("x-rapidapi-host", self.config.api_host.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HubError::General(format!(
                "Search API responded with status {}",
                status
            )));
        }

        let body: SearchResponse = response.json().await?;
        let fetched_at = Utc::now();

        Ok(body
            .tweets
            .into_iter()
            .map(|raw| normalize_post(raw, fetched_at))
            .collect())
    }

    fn filtered_samples(&self, query: &str) -> Vec<SocialPost> {
        let needle = query.to_lowercase();
        let match_all = SAMPLE_MATCH_ALL.contains(&query);

        let filtered: Vec<SocialPost> = self
            .samples
            .iter()
            .filter(|post| match_all || post.content.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        if filtered.is_empty() {
            self.samples.clone()
        } else {
            filtered
        }
    }
}

fn normalize_post(raw: RawPost, fetched_at: DateTime<Utc>) -> SocialPost {
    let id = raw
        .id_str
        .or_else(|| raw.id.map(|n| n.to_string()))
        .unwrap_or_default();

    let (user_name, screen_name, user_image) = match raw.user {
        Some(user) => (
            user.name.unwrap_or_else(|| "Unknown".to_string()),
            user.screen_name,
            user.profile_image_url_https.unwrap_or_default(),
        ),
        None => ("Unknown".to_string(), None, String::new()),
    };

    let user_handle = screen_name
        .as_deref()
        .map(|name| format!("@{}", name))
        .unwrap_or_else(|| "@unknown".to_string());
    let link = format!(
        "https://twitter.com/{}/status/{}",
        screen_name.as_deref().unwrap_or("unknown"),
        id
    );

    SocialPost {
        id,
        user_name,
        user_handle,
        user_image,
        content: raw.full_text.unwrap_or_default(),
        timestamp: relative_label(raw.created_at.as_deref(), fetched_at),
        replies: raw.reply_count,
        reposts: raw.retweet_count,
        likes: raw.favorite_count,
        link,
    }
}

/// Bucket elapsed time into a relative label: minutes below an hour, hours
/// below a day, days otherwise.
pub fn relative_label(created_at: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(parsed) = created_at.filter(|s| !s.is_empty()).and_then(parse_post_time) else {
        return "不明".to_string();
    };

    let elapsed = now.signed_duration_since(parsed);
    let minutes = elapsed.num_minutes().max(0);
    let hours = elapsed.num_hours().max(0);
    let days = elapsed.num_days().max(0);

    if minutes < 60 {
        format!("{}分前", minutes)
    } else if hours < 24 {
        format!("{}時間前", hours)
    } else {
        format!("{}日前", days)
    }
}

fn parse_post_time(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        // Classic API format: "Wed Oct 10 20:19:24 +0000 2018"
        .or_else(|_| DateTime::parse_from_str(value, "%a %b %d %H:%M:%S %z %Y"))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Fixed fallback posts shown when no live data is available.
pub fn sample_posts() -> Vec<SocialPost> {
    vec![
        SocialPost {
            id: "1".to_string(),
            user_name: "NTT 東日本 ニュース".to_string(),
            user_handle: "@NTTEast_PR".to_string(),
            user_image: "https://api.dicebear.com/7.x/avataaars/svg?seed=NTT".to_string(),
            content: "電話での特殊詐欺対策として、AIによる「偽音声検知アプリ」をNABLAS社と共同開発しました。深層学習を活用し、肉声とAI合成音声の微細な違いをリアルタイムで識別します。 #NTT #防犯 #AI #ディープフェイク".to_string(),
            timestamp: "1時間前".to_string(),
            replies: 45,
            reposts: 1100,
            likes: 3420,
            link: "https://twitter.com".to_string(),
        },
        SocialPost {
            id: "2".to_string(),
            user_name: "楽天グループ プレス".to_string(),
            user_handle: "@RakutenGroupPR".to_string(),
            user_image: "https://api.dicebear.com/7.x/avataaars/svg?seed=Rakuten".to_string(),
            content: "OpenAIとの協業をさらに強化。EC、金融、モバイルの各サービスに次世代LLMを統合し、ユーザー体験を革新します。日本市場に最適化されたAIモデルの共同開発も進行中です。 #楽天 #OpenAI #生成AI".to_string(),
            timestamp: "3時間前".to_string(),
            replies: 32,
            reposts: 580,
            likes: 2150,
            link: "https://twitter.com".to_string(),
        },
        SocialPost {
            id: "3".to_string(),
            user_name: "テック・インサイダー JP".to_string(),
            user_handle: "@tech_insider_jp".to_string(),
            user_image: "https://api.dicebear.com/7.x/avataaars/svg?seed=Tech".to_string(),
            content: "CES 2026で日本のスタートアップ「First Habit」が最高賞を受賞！AI搭載の学習支援ロボットとパーソナライズ学習が世界的に高く評価されました。日本のエドテックが熱い。 #CES2026 #スタートアップ #AI教育".to_string(),
            timestamp: "5時間前".to_string(),
            replies: 28,
            reposts: 420,
            likes: 1280,
            link: "https://twitter.com".to_string(),
        },
        SocialPost {
            id: "4".to_string(),
            user_name: "経済ニュース速報".to_string(),
            user_handle: "@biz_news_jp".to_string(),
            user_image: "https://api.dicebear.com/7.x/avataaars/svg?seed=Biz".to_string(),
            content: "ソフトバンクとアドバンテスト、東京エレクトロンなどのAI関連銘柄が堅調。2026年は「実用フェーズ」に入り、国内企業の労働生産性向上が本格的な投資テーマになっています。 #株価 #AI #経済".to_string(),
            timestamp: "8時間前".to_string(),
            replies: 12,
            reposts: 150,
            likes: 890,
            link: "https://twitter.com".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn relative_label_buckets() {
        let now = Utc::now();
        let at = |ago: Duration| (now - ago).to_rfc3339();

        assert_eq!(relative_label(Some(at(Duration::minutes(5)).as_str()), now), "5分前");
        assert_eq!(relative_label(Some(at(Duration::minutes(59)).as_str()), now), "59分前");
        assert_eq!(relative_label(Some(at(Duration::hours(23)).as_str()), now), "23時間前");
        assert_eq!(relative_label(Some(at(Duration::hours(49)).as_str()), now), "2日前");
    }

    #[test]
    fn relative_label_handles_missing_and_garbage() {
        let now = Utc::now();
        assert_eq!(relative_label(None, now), "不明");
        assert_eq!(relative_label(Some(""), now), "不明");
        assert_eq!(relative_label(Some("not a date"), now), "不明");
    }

    #[test]
    fn parses_classic_api_timestamp() {
        let parsed = parse_post_time("Wed Oct 10 20:19:24 +0000 2018").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2018-10-10T20:19:24+00:00");
    }

    #[test]
    fn decodes_alternative_response_keys() {
        let body = r#"{"results": [{"id": 42, "text": "こんにちは", "user": {"screen_name": "tester"}}]}"#;
        let decoded: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(decoded.tweets.len(), 1);

        let post = normalize_post(decoded.tweets.into_iter().next().unwrap(), Utc::now());
        assert_eq!(post.id, "42");
        assert_eq!(post.content, "こんにちは");
        assert_eq!(post.user_handle, "@tester");
        assert_eq!(post.user_name, "Unknown");
        assert_eq!(post.likes, 0);
        assert_eq!(post.timestamp, "不明");
        assert_eq!(post.link, "https://twitter.com/tester/status/42");
    }

    #[test]
    fn sample_filter_matches_substring() {
        let source = SocialSource::new(&FetchConfig::default(), SocialApiConfig::default());
        let posts = source.filtered_samples("ロボット");
        assert_eq!(posts.len(), 1);
        assert!(posts[0].content.contains("ロボット"));
    }

    #[test]
    fn sentinel_queries_match_everything() {
        let source = SocialSource::new(&FetchConfig::default(), SocialApiConfig::default());
        assert_eq!(source.filtered_samples("人工知能").len(), 4);
        assert_eq!(source.filtered_samples("AI").len(), 4);
    }

    #[test]
    fn fruitless_filter_falls_back_to_full_set() {
        let source = SocialSource::new(&FetchConfig::default(), SocialApiConfig::default());
        let posts = source.filtered_samples("存在しないトピック");
        assert_eq!(posts.len(), 4);
    }
}

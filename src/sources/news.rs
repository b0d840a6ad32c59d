use crate::config::FetchConfig;
use crate::fetcher::Fetcher;
use crate::types::{HubError, NewsItem, Result};
use crate::vocab::Vocabulary;
use chrono::Utc;
use feed_rs::model::Entry;
use futures::future::join_all;
use std::collections::HashMap;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

/// Sentinel query that gets broadened into an OR-expression before it is
/// embedded in the search feed request.
pub const DEFAULT_NEWS_QUERY: &str = "人工知能";
const BROADENED_DEFAULT_QUERY: &str = "(AI OR 人工知能 OR 機械学習)";

const SEARCH_FEED_BASE: &str = "https://news.google.com/rss/search";

/// Fixed category feeds fetched alongside the search feed. Entries from
/// these are admitted only when they match the topic vocabulary.
const CATEGORY_FEEDS: &[(&str, &str)] = &[(
    "https://news.yahoo.co.jp/rss/categories/it.xml",
    "Yahoo!ニュース",
)];

#[derive(Debug, Clone)]
pub enum FeedKind {
    /// Parametrized search feed; entry titles carry the source encoded as
    /// "Title - SourceName".
    Search,
    /// Fixed-URL category feed with a single known source label.
    Category { source_label: String },
}

#[derive(Debug, Clone)]
pub struct NewsFeed {
    pub id: Uuid,
    pub url: String,
    pub kind: FeedKind,
}

/// News adapter: fans out over one query-parametrized search feed plus the
/// fixed category feeds, normalizes entries, deduplicates by link, and
/// returns a timestamp-descending list.
///
/// Failures never escape this adapter: a failed feed contributes nothing,
/// and the result is empty only if every feed fails.
pub struct NewsSource {
    fetcher: Fetcher,
    category_feeds: Vec<NewsFeed>,
}

impl NewsSource {
    pub fn new(config: &FetchConfig) -> Self {
        let category_feeds = CATEGORY_FEEDS
            .iter()
            .map(|(url, label)| NewsFeed {
                id: Uuid::new_v4(),
                url: url.to_string(),
                kind: FeedKind::Category {
                    source_label: label.to_string(),
                },
            })
            .collect();

        Self {
            fetcher: Fetcher::new(config),
            category_feeds,
        }
    }

    /// Replace the fixed category feeds, e.g. with local fixtures in tests.
    pub fn with_category_feeds(mut self, feeds: Vec<NewsFeed>) -> Self {
        self.category_feeds = feeds;
        self
    }

    pub async fn fetch(&self, query: &str, vocab: &Vocabulary) -> Vec<NewsItem> {
        // Source order is fixed: search feed first, then category feeds.
        let mut feeds = Vec::with_capacity(self.category_feeds.len() + 1);
        match search_feed_url(query) {
            Ok(url) => feeds.push(NewsFeed {
                id: Uuid::new_v4(),
                url,
                kind: FeedKind::Search,
            }),
            Err(e) => warn!("Skipping search feed for {:?}: {}", query, e),
        }
        feeds.extend(self.category_feeds.iter().cloned());

        let bodies = join_all(feeds.iter().map(|feed| self.fetcher.fetch_text(&feed.url))).await;

        let mut items = Vec::new();
        for (feed, body) in feeds.iter().zip(bodies) {
            match body.and_then(|content| parse_feed_items(&content, &feed.kind, vocab)) {
                Ok(parsed) => {
                    debug!(
                        "Feed {} ({}) contributed {} items",
                        feed.id,
                        feed.url,
                        parsed.len()
                    );
                    items.extend(parsed);
                }
                Err(e) => warn!("Feed {} failed: {}", feed.url, e),
            }
        }

        merge_feed_items(items)
    }
}

fn search_feed_url(query: &str) -> Result<String> {
    let effective = if query == DEFAULT_NEWS_QUERY {
        BROADENED_DEFAULT_QUERY
    } else {
        query
    };

    let url = Url::parse_with_params(
        SEARCH_FEED_BASE,
        &[("q", effective), ("hl", "ja"), ("gl", "JP"), ("ceid", "JP:ja")],
    )?;
    Ok(url.into())
}

/// Parse one fetched feed document into normalized items.
pub fn parse_feed_items(content: &str, kind: &FeedKind, vocab: &Vocabulary) -> Result<Vec<NewsItem>> {
    let feed = feed_rs::parser::parse(content.as_bytes())
        .map_err(|e| HubError::Parse(format!("Failed to parse feed: {}", e)))?;

    let mut items = Vec::with_capacity(feed.entries.len());
    for entry in feed.entries {
        if let Some(item) = normalize_entry(entry, kind, vocab) {
            items.push(item);
        }
    }
    Ok(items)
}

fn normalize_entry(entry: Entry, kind: &FeedKind, vocab: &Vocabulary) -> Option<NewsItem> {
    let image_url = entry_image(&entry);
    let link = entry
        .links
        .first()
        .map(|l| l.href.clone())
        .unwrap_or_else(|| "#".to_string());
    let published_at = entry.published.or(entry.updated).unwrap_or_else(Utc::now);

    let raw_title = entry.title.map(|t| t.content).unwrap_or_default();
    let snippet = entry
        .summary
        .map(|s| strip_html(&s.content))
        .or_else(|| entry.content.and_then(|c| c.body).map(|b| strip_html(&b)))
        .unwrap_or_default();

    let (title, source) = match kind {
        FeedKind::Search => split_source_title(&raw_title),
        FeedKind::Category { source_label } => {
            // The search feed is already constrained by its query; broad
            // category feeds need the topic filter.
            if !matches_topic(&raw_title, &snippet, vocab) {
                return None;
            }
            (non_empty_or(raw_title, "Untitled"), source_label.clone())
        }
    };

    Some(NewsItem {
        title,
        link,
        published_at,
        source,
        snippet,
        image_url,
    })
}

/// Split a search-feed title of the form "Title - SourceName" on the last
/// " - " separator.
pub fn split_source_title(raw: &str) -> (String, String) {
    match raw.rfind(" - ") {
        Some(pos) => {
            let title = raw[..pos].trim().to_string();
            let source = raw[pos + 3..].trim().to_string();
            (non_empty_or(title, "Untitled"), non_empty_or(source, "Unknown"))
        }
        None => (
            non_empty_or(raw.to_string(), "Untitled"),
            "Unknown".to_string(),
        ),
    }
}

/// Case-insensitive keyword inclusion check over title + snippet.
pub fn matches_topic(title: &str, snippet: &str, vocab: &Vocabulary) -> bool {
    let haystack = format!("{} {}", title, snippet).to_lowercase();
    vocab
        .keywords
        .iter()
        .any(|kw| haystack.contains(&kw.to_lowercase()))
}

/// Dedup by link plus the final timestamp-descending ordering, applied to
/// the concatenated per-feed results.
pub fn merge_feed_items(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut merged = dedupe_by_link(items);
    // Vec::sort_by is stable: equal timestamps keep encounter order.
    merged.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    merged
}

/// The first occurrence of a link fixes its position; later duplicates
/// overwrite the stored value.
fn dedupe_by_link(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(items.len());
    let mut unique: Vec<NewsItem> = Vec::with_capacity(items.len());

    for item in items {
        match slots.get(&item.link) {
            Some(&slot) => unique[slot] = item,
            None => {
                slots.insert(item.link.clone(), unique.len());
                unique.push(item);
            }
        }
    }
    unique
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

fn entry_image(entry: &Entry) -> Option<String> {
    for media in &entry.media {
        if let Some(url) = media.content.iter().find_map(|c| c.url.as_ref()) {
            return Some(url.to_string());
        }
        if let Some(thumb) = media.thumbnails.first() {
            return Some(thumb.image.uri.clone());
        }
    }
    None
}

fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

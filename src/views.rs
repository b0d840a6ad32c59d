use crate::scoring::item_score;
use crate::types::{FeedItem, NewsItem, ScoredItem, SocialPost};
use crate::vocab::Vocabulary;
use serde::Serialize;

/// Upper bound of the user-facing relevance threshold.
pub const MAX_THRESHOLD: u32 = 3;

/// The three selectable renderings of one scored snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardViews {
    pub combined: Vec<ScoredItem>,
    pub news: Vec<ScoredItem>,
    pub social: Vec<ScoredItem>,
}

/// Pure aggregation: score both lists, filter by the threshold, and derive
/// the three views. Input ordering is preserved within each list; the
/// combined view alternates news and social items index by index.
pub fn build_views(
    news: &[NewsItem],
    posts: &[SocialPost],
    query: &str,
    threshold: u32,
    vocab: &Vocabulary,
) -> DashboardViews {
    let news: Vec<ScoredItem> = news
        .iter()
        .map(|item| score_item(FeedItem::News(item.clone()), query, vocab))
        .filter(|scored| scored.score >= threshold)
        .collect();

    let social: Vec<ScoredItem> = posts
        .iter()
        .map(|item| score_item(FeedItem::Social(item.clone()), query, vocab))
        .filter(|scored| scored.score >= threshold)
        .collect();

    let combined = interleave(&news, &social);

    DashboardViews {
        combined,
        news,
        social,
    }
}

fn score_item(item: FeedItem, query: &str, vocab: &Vocabulary) -> ScoredItem {
    let score = item_score(&item, query, vocab);
    ScoredItem { item, score }
}

/// Strict alternating merge: a[0], b[0], a[1], b[1], ...; once one side is
/// exhausted the other continues without gaps.
fn interleave(a: &[ScoredItem], b: &[ScoredItem]) -> Vec<ScoredItem> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    for i in 0..a.len().max(b.len()) {
        if let Some(item) = a.get(i) {
            merged.push(item.clone());
        }
        if let Some(item) = b.get(i) {
            merged.push(item.clone());
        }
    }
    merged
}

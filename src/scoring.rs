use crate::types::FeedItem;
use crate::vocab::Vocabulary;

/// Default queries that never earn the query-match bonus: they describe the
/// whole dashboard topic, so matching them says nothing extra.
const BONUS_EXEMPT_QUERIES: &[&str] = &["Artificial Intelligence", "AI"];

/// Integer relevance score for a text against the keyword vocabulary.
///
/// Each vocabulary keyword found as a case-insensitive substring adds 1
/// (at most once per keyword, regardless of occurrence count). A
/// non-default query found in the text adds a bonus of 2.
pub fn relevance_score(text: &str, query: &str, vocab: &Vocabulary) -> u32 {
    let haystack = text.to_lowercase();

    let mut score = vocab
        .keywords
        .iter()
        .filter(|kw| haystack.contains(&kw.to_lowercase()))
        .count() as u32;

    if !query.is_empty()
        && !BONUS_EXEMPT_QUERIES.contains(&query)
        && haystack.contains(&query.to_lowercase())
    {
        score += 2;
    }

    score
}

/// Score an item using its variant's text projection: title + snippet for
/// news, author name + body for social posts.
pub fn item_score(item: &FeedItem, query: &str, vocab: &Vocabulary) -> u32 {
    let text = match item {
        FeedItem::News(news) => format!("{} {}", news.title, news.snippet),
        FeedItem::Social(post) => format!("{} {}", post.user_name, post.content),
    };
    relevance_score(&text, query, vocab)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::new(
            vec!["AI".to_string(), "ロボット".to_string(), "機械学習".to_string()],
            Vec::new(),
        )
    }

    #[test]
    fn counts_each_keyword_once() {
        let vocab = vocab();
        assert_eq!(relevance_score("AIとAIとAI", "", &vocab), 1);
        assert_eq!(relevance_score("AIロボットの機械学習", "", &vocab), 3);
        assert_eq!(relevance_score("晴れのち曇り", "", &vocab), 0);
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let vocab = vocab();
        assert_eq!(relevance_score("the ai revolution", "", &vocab), 1);
    }

    #[test]
    fn default_queries_never_earn_the_bonus() {
        let vocab = vocab();
        let text = "AI is everywhere";
        assert_eq!(relevance_score(text, "AI", &vocab), 1);
        assert_eq!(
            relevance_score("Artificial Intelligence everywhere", "Artificial Intelligence", &vocab),
            1
        );
    }

    #[test]
    fn matching_query_adds_two() {
        let vocab = vocab();
        let base = relevance_score("ロボットが踊る", "", &vocab);
        assert_eq!(relevance_score("ロボットが踊る", "ロボット", &vocab), base + 2);
        // Case-insensitive on the query side too.
        assert_eq!(relevance_score("Tesla Bot debuts", "tesla", &vocab), 2);
    }

    #[test]
    fn non_matching_query_adds_nothing() {
        let vocab = vocab();
        assert_eq!(relevance_score("ロボットが踊る", "量子", &vocab), 1);
    }

    #[test]
    fn projections_differ_by_variant() {
        use crate::types::{NewsItem, SocialPost};
        use chrono::Utc;

        let vocab = vocab();
        let news = FeedItem::News(NewsItem {
            title: "ロボット展示会".to_string(),
            link: "https://example.com".to_string(),
            published_at: Utc::now(),
            source: "Example".to_string(),
            snippet: "機械学習デモも".to_string(),
            image_url: None,
        });
        assert_eq!(item_score(&news, "", &vocab), 2);

        let post = FeedItem::Social(SocialPost {
            id: "1".to_string(),
            user_name: "AI研究者".to_string(),
            user_handle: "@lab".to_string(),
            user_image: String::new(),
            content: "ロボットを作った".to_string(),
            timestamp: "1時間前".to_string(),
            replies: 0,
            reposts: 0,
            likes: 0,
            link: "https://example.com".to_string(),
        });
        assert_eq!(item_score(&post, "", &vocab), 2);
    }
}

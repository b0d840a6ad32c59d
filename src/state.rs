use crate::suggest::suggest;
use crate::types::ScoredItem;
use crate::views::{DashboardViews, MAX_THRESHOLD};
use crate::vocab::Vocabulary;
use url::form_urlencoded;

/// Which of the three views is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Tab {
    All,
    News,
    Social,
}

/// Keyboard events the search control reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Down,
    Up,
    Enter,
    Escape,
}

/// Mutable UI state owned by the presentation shell: selected tab,
/// relevance threshold, search input, and suggestion navigation.
///
/// The aggregation core stays a pure function of
/// (news, posts, query, threshold); this record only decides which query
/// and threshold to feed it and which view to show.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub active_tab: Tab,
    pub threshold: u32,
    pub query: String,
    pub input: String,
    pub suggestions: Vec<String>,
    pub selected: Option<usize>,
    pub suggestions_open: bool,
    vocab: Vocabulary,
}

impl DashboardState {
    pub fn new(query: &str, vocab: Vocabulary) -> Self {
        Self {
            active_tab: Tab::All,
            threshold: 0,
            query: query.to_string(),
            input: query.to_string(),
            suggestions: Vec::new(),
            selected: None,
            suggestions_open: false,
            vocab,
        }
    }

    /// Update the search input, recomputing the suggestion list. The
    /// dropdown opens only when there is something to show; any previous
    /// highlight is cleared.
    pub fn set_input(&mut self, value: &str) {
        self.input = value.to_string();
        self.selected = None;

        if value.trim().is_empty() {
            self.suggestions.clear();
            self.suggestions_open = false;
        } else {
            self.suggestions = suggest(value, &self.vocab);
            self.suggestions_open = !self.suggestions.is_empty();
        }
    }

    /// Handle a keyboard event. Returns the committed query when the event
    /// submits one.
    pub fn handle_key(&mut self, key: Key) -> Option<String> {
        match key {
            Key::Down => {
                if self.suggestions_open && !self.suggestions.is_empty() {
                    let last = self.suggestions.len() - 1;
                    self.selected = Some(match self.selected {
                        Some(i) => (i + 1).min(last),
                        None => 0,
                    });
                }
                None
            }
            Key::Up => {
                if self.suggestions_open {
                    self.selected = self.selected.map(|i| i.saturating_sub(1));
                }
                None
            }
            Key::Enter => {
                if self.suggestions_open {
                    if let Some(i) = self.selected {
                        if let Some(choice) = self.suggestions.get(i).cloned() {
                            self.input = choice.clone();
                            return self.commit(choice);
                        }
                    }
                }
                self.submit()
            }
            Key::Escape => {
                self.suggestions_open = false;
                None
            }
        }
    }

    /// Submit the current input as the query. Blank input is ignored.
    pub fn submit(&mut self) -> Option<String> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let query = trimmed.to_string();
        self.commit(query)
    }

    /// A click outside the suggestion dropdown dismisses it.
    pub fn click_outside(&mut self) {
        self.suggestions_open = false;
    }

    pub fn set_threshold(&mut self, threshold: u32) {
        self.threshold = threshold.min(MAX_THRESHOLD);
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Shareable query string for the active query, e.g. `?q=%E3%83%AD...`.
    pub fn query_param(&self) -> String {
        let encoded: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("q", &self.query)
            .finish();
        format!("?{}", encoded)
    }

    /// The slice of a computed view set selected by the active tab.
    pub fn view<'a>(&self, views: &'a DashboardViews) -> &'a [ScoredItem] {
        match self.active_tab {
            Tab::All => &views.combined,
            Tab::News => &views.news,
            Tab::Social => &views.social,
        }
    }

    fn commit(&mut self, query: String) -> Option<String> {
        self.query = query.clone();
        self.suggestions_open = false;
        Some(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> DashboardState {
        let vocab = Vocabulary::new(
            Vec::new(),
            vec![
                "AI倫理".to_string(),
                "エッジAI".to_string(),
                "AIエージェント".to_string(),
            ],
        );
        DashboardState::new("人工知能", vocab)
    }

    #[test]
    fn typing_opens_suggestions_and_clears_highlight() {
        let mut state = state();
        state.set_input("ai");
        assert!(state.suggestions_open);
        assert_eq!(state.suggestions.len(), 3);
        assert_eq!(state.selected, None);

        state.set_input("");
        assert!(!state.suggestions_open);
        assert!(state.suggestions.is_empty());
    }

    #[test]
    fn arrow_navigation_saturates_at_both_ends() {
        let mut state = state();
        state.set_input("ai");

        // Up with no highlight stays unselected.
        state.handle_key(Key::Up);
        assert_eq!(state.selected, None);

        state.handle_key(Key::Down);
        assert_eq!(state.selected, Some(0));
        state.handle_key(Key::Down);
        state.handle_key(Key::Down);
        state.handle_key(Key::Down);
        assert_eq!(state.selected, Some(2));

        state.handle_key(Key::Up);
        state.handle_key(Key::Up);
        state.handle_key(Key::Up);
        assert_eq!(state.selected, Some(0));
    }

    #[test]
    fn enter_commits_highlighted_suggestion() {
        let mut state = state();
        state.set_input("ai");
        state.handle_key(Key::Down);
        state.handle_key(Key::Down);

        let committed = state.handle_key(Key::Enter);
        assert_eq!(committed.as_deref(), Some("エッジAI"));
        assert_eq!(state.query, "エッジAI");
        assert_eq!(state.input, "エッジAI");
        assert!(!state.suggestions_open);
    }

    #[test]
    fn enter_without_highlight_submits_input() {
        let mut state = state();
        state.set_input("  ロボット  ");
        let committed = state.handle_key(Key::Enter);
        assert_eq!(committed.as_deref(), Some("ロボット"));
        assert_eq!(state.query, "ロボット");
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut state = state();
        state.set_input("   ");
        assert_eq!(state.submit(), None);
        assert_eq!(state.query, "人工知能");
    }

    #[test]
    fn escape_and_click_outside_close_the_dropdown() {
        let mut state = state();
        state.set_input("ai");
        state.handle_key(Key::Escape);
        assert!(!state.suggestions_open);

        state.set_input("ai");
        state.click_outside();
        assert!(!state.suggestions_open);
    }

    #[test]
    fn threshold_is_clamped() {
        let mut state = state();
        state.set_threshold(7);
        assert_eq!(state.threshold, MAX_THRESHOLD);
        state.set_threshold(2);
        assert_eq!(state.threshold, 2);
    }

    #[test]
    fn tab_selects_matching_view() {
        use crate::types::{FeedItem, SocialPost};

        let post = ScoredItem {
            item: FeedItem::Social(SocialPost {
                id: "1".to_string(),
                user_name: "tester".to_string(),
                user_handle: "@tester".to_string(),
                user_image: String::new(),
                content: "hello".to_string(),
                timestamp: "1時間前".to_string(),
                replies: 0,
                reposts: 0,
                likes: 0,
                link: "https://example.com".to_string(),
            }),
            score: 0,
        };
        let views = DashboardViews {
            combined: vec![post.clone()],
            news: Vec::new(),
            social: vec![post],
        };

        let mut state = state();
        assert_eq!(state.view(&views).len(), 1);
        state.set_tab(Tab::News);
        assert!(state.view(&views).is_empty());
        state.set_tab(Tab::Social);
        assert_eq!(state.view(&views).len(), 1);
    }

    #[test]
    fn query_param_is_url_encoded() {
        let mut state = state();
        state.set_input("生成 AI");
        state.submit();
        assert_eq!(state.query_param(), "?q=%E7%94%9F%E6%88%90+AI");
    }
}

/// AI-domain keywords used by the category-feed inclusion filter and the
/// relevance scorer. Matching is case-insensitive substring; each keyword
/// contributes at most one point per text.
pub const AI_KEYWORDS: &[&str] = &[
    "AI",
    "人工知能",
    "生成AI",
    "機械学習",
    "深層学習",
    "ディープラーニング",
    "LLM",
    "大規模言語モデル",
    "ChatGPT",
    "OpenAI",
    "Claude",
    "Gemini",
    "NVIDIA",
    "GPU",
    "半導体",
    "ロボット",
    "自動運転",
    "AIエージェント",
    "プロンプト",
    "量子コンピュータ",
];

/// Type-ahead candidates for the topic search box.
pub const SUGGEST_KEYWORDS: &[&str] = &[
    "AI", "人工知能", "生成AI", "機械学習", "深層学習", "ディープラーニング",
    "ChatGPT", "GPT-4", "OpenAI", "Claude", "Gemini", "Llama",
    "NVIDIA", "GPU", "半導体", "H100", "Blackwell",
    "ロボット", "ロボティクス", "ボストン・ダイナミクス",
    "自動運転", "テスラ", "Waymo",
    "量子コンピュータ", "AI倫理", "プロンプトエンジニアリング",
    "大規模言語モデル", "LLM", "エッジAI", "AIエージェント",
    "Google DeepMind", "Microsoft AI", "Anthropic", "Perplexity",
];

/// Shortcut topics offered when a view comes up empty.
pub const QUICK_TOPICS: &[&str] = &["AI", "ロボット", "機械学習", "ChatGPT", "自動運転"];

/// Immutable vocabulary injected into the scorer, the category-feed filter,
/// and the suggestion engine, so tests can substitute smaller fixtures.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Vocabulary {
    pub fn new(keywords: Vec<String>, suggestions: Vec<String>) -> Self {
        Self {
            keywords,
            suggestions,
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            keywords: AI_KEYWORDS.iter().map(|kw| kw.to_string()).collect(),
            suggestions: SUGGEST_KEYWORDS.iter().map(|kw| kw.to_string()).collect(),
        }
    }
}

use crate::vocab::Vocabulary;

/// Maximum number of type-ahead suggestions shown at once.
pub const MAX_SUGGESTIONS: usize = 6;

/// Suggestion candidates for a partial input: case-insensitive substring
/// matches from the suggestion vocabulary, excluding an exact match of the
/// input itself, in vocabulary order, capped at [`MAX_SUGGESTIONS`].
pub fn suggest(input: &str, vocab: &Vocabulary) -> Vec<String> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    let needle = input.to_lowercase();
    vocab
        .suggestions
        .iter()
        .filter(|candidate| {
            let lower = candidate.to_lowercase();
            lower.contains(&needle) && lower != needle
        })
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect()
}

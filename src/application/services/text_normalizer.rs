use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

pub const DEFAULT_KEYWORD_LIMIT: usize = 12;

static DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w'\-\s]").expect("valid regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "the", "and", "or", "but", "if", "so", "then", "than", "is", "am", "are",
        "was", "were", "be", "been", "being", "to", "of", "in", "on", "at", "for", "with", "by",
        "from", "as", "into", "about", "it", "its", "it's", "this", "that", "these", "those",
        "i", "you", "he", "she", "we", "they", "me", "him", "her", "us", "them", "my", "your",
        "his", "our", "their", "do", "does", "did", "have", "has", "had", "will", "would",
        "shall", "should", "can", "could", "may", "might", "just", "very", "really", "there",
        "here", "um", "uh", "oh", "like", "also", "too",
    ]
    .into_iter()
    .collect()
});

/// Lowercases, drops everything except word characters, apostrophes, hyphens and
/// whitespace, then collapses whitespace runs.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = DISALLOWED_CHARS.replace_all(&lowered, "");
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Ordered, deduplicated, stopword-filtered tokens of `normalize(text)`, at most `limit` long.
pub fn extract_keywords(text: &str, limit: usize) -> Vec<String> {
    let normalized = normalize(text);
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for token in normalized.split_whitespace() {
        if keywords.len() >= limit {
            break;
        }
        // a lone "-" or "'" survives normalization but is not a word
        if !token.chars().any(char::is_alphanumeric) || is_stopword(token) {
            continue;
        }
        if seen.insert(token) {
            keywords.push(token.to_string());
        }
    }

    keywords
}

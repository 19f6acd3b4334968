const MAX_VISIBLE_CHARS: usize = 100;

/// Shortens transcripts, prompts and model output for logging and masks credentials.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let sanitized = if total_chars > MAX_VISIBLE_CHARS {
        let visible: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", visible, total_chars)
    } else {
        trimmed.to_string()
    };

    redact_sensitive_patterns(&sanitized)
}

fn redact_sensitive_patterns(text: &str) -> String {
    let patterns = [
        "Bearer ",
        "x-goog-api-key: ",
        "api_key=",
        "key=",
        "password=",
        "token=",
    ];

    let mut result = text.to_string();
    for pattern in patterns {
        let mut search_from = 0;
        while let Some(found) = result[search_from..].find(pattern) {
            let start = search_from + found + pattern.len();
            let end = result[start..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| start + i)
                .unwrap_or(result.len());
            result.replace_range(start..end, "[REDACTED]");
            search_from = start + "[REDACTED]".len();
        }
    }

    result
}

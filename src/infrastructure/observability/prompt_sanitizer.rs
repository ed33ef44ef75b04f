const MAX_VISIBLE_CHARS: usize = 100;

const SENSITIVE_PATTERNS: [&str; 6] = [
    "Bearer ",
    "api_key=",
    "key=",
    "password=",
    "secret=",
    "token=",
];

/// Shortens user text and masks credential-looking values before logging.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = if total_chars > MAX_VISIBLE_CHARS {
        let head: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", head, total_chars)
    } else {
        trimmed.to_string()
    };

    SENSITIVE_PATTERNS
        .iter()
        .fold(visible, |text, pattern| redact_after(&text, pattern))
}

fn redact_after(text: &str, pattern: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find(pattern) {
        let value_start = idx + pattern.len();
        let value_end = rest[value_start..]
            .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
            .map(|i| value_start + i)
            .unwrap_or(rest.len());

        result.push_str(&rest[..value_start]);
        if rest[value_start..value_end].starts_with("[REDACTED]") || value_end == value_start {
            result.push_str(&rest[value_start..value_end]);
        } else {
            result.push_str("[REDACTED]");
        }
        rest = &rest[value_end..];
    }

    result.push_str(rest);
    result
}

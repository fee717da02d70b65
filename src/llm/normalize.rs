use std::sync::LazyLock;

use regex::Regex;

/// Matches a fenced block. The opening fence may carry a language tag, either
/// `json` or any tag terminated by a newline.
static FENCED_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:json\b|[\w+-]*[ \t]*\r?\n)?\s*([\s\S]*?)```").expect("valid regex")
});

/// Extract a structured payload (usually JSON) from a raw model response.
///
/// Returns the trimmed contents of the first fenced block if one exists,
/// otherwise the whole response trimmed.
pub fn extract_structured_payload(raw: &str) -> String {
    match FENCED_BLOCK_RE.captures(raw) {
        Some(caps) => caps[1].trim().to_string(),
        None => raw.trim().to_string(),
    }
}

/// Unwrap every fenced block in a plain-text response, keeping the enclosed
/// text, then trim.
pub fn normalize_plain_text(raw: &str) -> String {
    FENCED_BLOCK_RE.replace_all(raw, "$1").trim().to_string()
}

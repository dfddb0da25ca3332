//! Fenced code block extraction.
//!
//! The upstream agent sometimes wraps its JSON payloads in markdown code
//! fences, either tagged (```json) or untagged. Tagged fences are
//! authoritative: the untagged scan only runs when no tagged fence held a
//! parseable object.

use super::parse_object;
use super::types::{Extraction, Span};
use once_cell::sync::Lazy;
use regex::Regex;

// Pre-compiled fence patterns. The tag is matched case-insensitively and the
// body may span multiple lines.
static JSON_FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)```json\s*(.*?)```").unwrap()
});

static BARE_FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```\s*(\{.*?\})\s*```").unwrap()
});

/// Scan for fenced JSON blocks, in document order.
///
/// Each recorded span covers the full fence range including the backtick
/// markers, not just the inner JSON text. Fences whose contents fail to
/// parse as a JSON object are skipped silently.
pub fn extract_fenced(text: &str) -> Vec<Extraction> {
    let mut found = scan(&JSON_FENCE_REGEX, text);
    if found.is_empty() {
        found = scan(&BARE_FENCE_REGEX, text);
    }
    found
}

fn scan(pattern: &Regex, text: &str) -> Vec<Extraction> {
    let mut found = Vec::new();

    for caps in pattern.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if let Some(object) = parse_object(inner.as_str()) {
            found.push(Extraction {
                object,
                span: Span::new(whole.start(), whole.end()),
            });
        }
    }

    found
}

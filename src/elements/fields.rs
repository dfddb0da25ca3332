//! Field resolution and text normalization helpers.
//!
//! Upstream records name every attribute twice (an English and a Spanish
//! scheme) and pad missing values with sentinel strings. Each logical field
//! is read through an ordered fallback list with the English name first, so
//! the dual-naming contract stays visible and testable in one place.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// Default substituted for missing or sentinel field values.
pub const PLACEHOLDER: &str = "N/A";

static BULLET_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(\s*)•\s+").unwrap()
});

/// Render a JSON leaf as display text. Objects, arrays and null yield `None`.
fn leaf_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Blank and sentinel strings ("", "n/a", "none", "null") count as missing.
fn is_missing(text: &str) -> bool {
    text.is_empty() || matches!(text.to_lowercase().as_str(), "n/a" | "none" | "null")
}

/// Resolve a dual-named text field: the first key holding a non-missing
/// value wins, so listing the English name first gives it precedence.
/// Falls back to `default` when every candidate is absent or sentinel.
pub fn text_or(obj: &Map<String, Value>, keys: &[&str], default: &str) -> String {
    opt_text(obj, keys).unwrap_or_else(|| default.to_string())
}

/// Like [`text_or`] but without a placeholder: missing resolves to `None`.
pub fn opt_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .filter_map(leaf_text)
        .map(|s| s.trim().to_string())
        .find(|s| !is_missing(s))
}

/// Resolve a numeric field through the same ordered fallback. Numbers
/// wrapped in JSON strings are tolerated.
pub fn number(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().filter_map(|k| obj.get(*k)).find_map(value_number)
}

/// Coerce one JSON value to a number, accepting numeric strings.
pub(crate) fn value_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Normalize a timestamp to `YYYY-MM-DD` for display.
///
/// ISO strings with a time component are cut at the `T`; bare dates and
/// `YYYY-MM-DD HH:MM:SS` forms parse through chrono. Anything else passes
/// through unchanged, and blank input yields the placeholder.
pub fn format_date(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return PLACEHOLDER.to_string();
    }
    if let Some((date, _)) = s.split_once('T') {
        return date.to_string();
    }
    if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() {
        return s.to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return dt.date().format("%Y-%m-%d").to_string();
    }
    s.to_string()
}

/// Prepare a prose segment for a Markdown renderer: literal `\n` escape
/// sequences become real newlines and `•` bullet lines become list items.
///
/// The sequencer never applies this to ordered elements (prose stays
/// byte-exact apart from trimming); it is for display-side callers.
pub fn normalize_markdown(text: &str) -> String {
    let unescaped = text.replace("\\n", "\n");
    BULLET_REGEX.replace_all(&unescaped, "${1}- ").into_owned()
}

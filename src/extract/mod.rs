//! Embedded JSON discovery.
//!
//! Locates every JSON object literal embedded in a raw agent response and
//! records its byte span, trying two strategies in strict order:
//!
//! 1. fenced code blocks (```json first, untagged fences as a fallback)
//! 2. balanced-brace scanning over the raw text, only when no fence matched
//!
//! Malformed candidates are skipped silently; one bad fragment never aborts
//! the scan of the rest of the message.

pub mod balanced;
pub mod fenced;
pub mod types;

pub use balanced::extract_balanced;
pub use fenced::extract_fenced;
pub use types::{Extraction, Span};

use serde_json::{Map, Value};

/// Find all embedded JSON objects, ordered by position in the text.
///
/// The balanced-brace pass runs only when the fenced pass found nothing, so
/// an agent that fences its payloads never has the same object extracted
/// twice.
pub fn extract_objects(text: &str) -> Vec<Extraction> {
    let mut found = extract_fenced(text);
    if found.is_empty() {
        found = extract_balanced(text);
    }
    found.sort_by_key(|e| e.span.start);
    found
}

/// Parse one candidate substring, accepting only a top-level JSON object.
/// Anything else (malformed text, bare arrays, scalars) yields `None`.
pub(crate) fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate.trim()) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

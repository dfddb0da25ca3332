//! Balanced-brace fallback extraction.
//!
//! Runs only when no fenced block yielded an object. A single depth counter
//! over `char_indices` suffices: the scanner only needs to notice when
//! nesting returns to zero, and the byte offsets keep spans on `char`
//! boundaries. Braces inside string literals are not special-cased; a
//! candidate that turns out not to be valid JSON is skipped and scanning
//! continues past it.

use super::parse_object;
use super::types::{Extraction, Span};

/// Scan the raw text for balanced `{...}` regions that parse as JSON objects.
///
/// An unterminated `{` never produces a candidate, and a failed parse is
/// discarded without any attempt to recover partial content.
pub fn extract_balanced(text: &str) -> Vec<Extraction> {
    let mut found = Vec::new();
    let mut depth: usize = 0;
    let mut start: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        match ch {
            '{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some(s) = start.take() {
                        let end = i + 1;
                        if let Some(object) = parse_object(&text[s..end]) {
                            found.push(Extraction {
                                object,
                                span: Span::new(s, end),
                            });
                        }
                    }
                }
            }
            _ => {}
        }
    }

    found
}

//! Ordered reassembly of prose and structured elements.
//!
//! Walks the extraction spans left to right, emitting the prose between
//! them as `text` elements and the classified objects as typed elements,
//! while also building the flattened legacy view (all tickets, all
//! contacts, chart and metric collections, leading and trailing prose).

use super::classify::{classify, Classified};
use super::types::{OrderedElement, ParsedResponse};
use crate::extract::Extraction;

/// Interleave prose and classified elements in document order.
///
/// `extractions` must be ordered by span start with non-overlapping spans,
/// which is what [`crate::extract::extract_objects`] produces. Whitespace-only
/// gaps between spans are suppressed rather than emitted as empty text
/// elements; each emitted segment is trimmed at its own boundaries.
pub fn sequence(text: &str, extractions: &[Extraction]) -> ParsedResponse {
    let mut response = ParsedResponse::default();

    if extractions.is_empty() {
        let prose = text.trim();
        if !prose.is_empty() {
            response.conversational = prose.to_string();
            response
                .ordered_elements
                .push(OrderedElement::Text(prose.to_string()));
        }
        return response;
    }

    let mut cursor = 0usize;
    for extraction in extractions {
        let span = extraction.span;
        if cursor < span.start {
            push_text(&mut response.ordered_elements, &text[cursor..span.start]);
        }

        match classify(&extraction.object) {
            Classified::Chart(payload) => {
                response
                    .chart_data
                    .get_or_insert_with(Vec::new)
                    .push(payload.clone());
                response.ordered_elements.push(OrderedElement::Chart(payload));
            }
            Classified::Metric(payload) => {
                response
                    .big_number_data
                    .get_or_insert_with(Vec::new)
                    .push(payload.clone());
                response.ordered_elements.push(OrderedElement::Metric(payload));
            }
            Classified::Tickets(tickets) => {
                for ticket in tickets {
                    response.tickets.push(ticket.clone());
                    response.ordered_elements.push(OrderedElement::Ticket(ticket));
                }
            }
            Classified::Contacts(contacts) => {
                for contact in contacts {
                    response.contacts.push(contact.clone());
                    response.ordered_elements.push(OrderedElement::Contact(contact));
                }
            }
            Classified::Unrecognized => {}
        }

        cursor = span.end;
    }

    if cursor < text.len() {
        push_text(&mut response.ordered_elements, &text[cursor..]);
    }

    let first_start = extractions[0].span.start;
    let last_end = extractions[extractions.len() - 1].span.end;
    response.conversational = text[..first_start].trim().to_string();
    response.additional_text = text[last_end..].trim().to_string();

    response
}

/// Emit a prose segment unless it trims to nothing.
fn push_text(elements: &mut Vec<OrderedElement>, segment: &str) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        elements.push(OrderedElement::Text(trimmed.to_string()));
    }
}

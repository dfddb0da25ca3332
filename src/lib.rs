//! # Prism - agent response decomposition
//!
//! Deterministically decomposes one raw support-agent response — prose
//! freely interleaved with embedded JSON payloads — into an ordered
//! sequence of typed, renderable elements (text, ticket, contact, chart,
//! metric) plus flattened convenience collections.
//!
//! ## Modules
//!
//! - **extract**: find embedded JSON object literals and their byte spans
//!   (fenced code blocks first, balanced-brace scanning as a fallback)
//! - **elements**: classify each object by shape, resolve dual-named
//!   fields, and re-interleave everything in document order
//!
//! ## Quick Start
//!
//! ```rust
//! use prism::parse_response;
//!
//! let reply = "Este mes cerramos {\"total_closed\": 96, \"metric\": \"Cerrados\"} casos.";
//! let parsed = parse_response(reply);
//!
//! // [text, metric, text], plus the flattened legacy view
//! assert_eq!(parsed.ordered_elements.len(), 3);
//! assert_eq!(parsed.big_number_data.as_ref().map(Vec::len), Some(1));
//! assert_eq!(parsed.conversational, "Este mes cerramos");
//! assert_eq!(parsed.additional_text, "casos.");
//! ```
//!
//! The whole pipeline is a pure function of its input: no I/O, no shared
//! state, and no failure mode — malformed fragments degrade per element
//! instead of aborting the parse, so one bad payload in a long response
//! never prevents the rest from rendering.

pub mod elements;
pub mod extract;

// Re-export commonly used types for convenience
pub use elements::{
    classify, ChartMetadata, ChartPayload, ChartType, Classified, Contact, OrderedElement,
    ParsedResponse, Ticket,
};
pub use extract::{extract_objects, Extraction, Span};

/// Main entry point: decompose one raw agent response.
///
/// Runs extraction, classification and sequencing and returns both the
/// ordered element sequence and the flattened legacy collections. Identical
/// input always yields an identical result.
pub fn parse_response(text: &str) -> ParsedResponse {
    let extractions = extract::extract_objects(text);
    elements::sequence(text, &extractions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fenced_ticket_scenario() {
        let reply = "Aquí tienes: ```json\n{\"id\":\"T1\",\"subject\":\"Vuelo\"}\n``` gracias";
        let parsed = parse_response(reply);

        let kinds: Vec<_> = parsed.ordered_elements.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec!["text", "ticket", "text"]);

        match &parsed.ordered_elements[0] {
            OrderedElement::Text(t) => assert_eq!(t, "Aquí tienes:"),
            other => panic!("expected text, got {:?}", other),
        }
        match &parsed.ordered_elements[1] {
            OrderedElement::Ticket(t) => {
                assert_eq!(t.id, "T1");
                assert_eq!(t.subject, "Vuelo");
            }
            other => panic!("expected ticket, got {:?}", other),
        }
        match &parsed.ordered_elements[2] {
            OrderedElement::Text(t) => assert_eq!(t, "gracias"),
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_metric_scenario() {
        let parsed = parse_response("{\"total_closed\": 96, \"metric\": \"Cerrados\"}");

        assert_eq!(parsed.ordered_elements.len(), 1);
        assert_eq!(parsed.ordered_elements[0].kind(), "metric");
        assert!(parsed.chart_data.is_none());
        assert_eq!(parsed.big_number_data.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_empty_input() {
        let parsed = parse_response("");

        assert!(parsed.ordered_elements.is_empty());
        assert_eq!(parsed.conversational, "");
        assert_eq!(parsed.additional_text, "");
        assert!(parsed.tickets.is_empty());
        assert!(parsed.contacts.is_empty());
        assert!(parsed.chart_data.is_none());
        assert!(parsed.big_number_data.is_none());
    }

    #[test]
    fn test_unterminated_brace_is_plain_text() {
        let reply = "esto queda abierto {\"id\": \"T1\"";
        let parsed = parse_response(reply);

        assert_eq!(parsed.ordered_elements.len(), 1);
        assert_eq!(parsed.ordered_elements[0].kind(), "text");
        assert_eq!(parsed.conversational, reply.trim());
    }

    #[test]
    fn test_tagged_fence_suppresses_untagged() {
        let reply = "```json\n{\"id\": \"T1\", \"subject\": \"a\"}\n```\n```\n{\"id\": \"T2\", \"subject\": \"b\"}\n```";
        let parsed = parse_response(reply);

        assert_eq!(parsed.tickets.len(), 1);
        assert_eq!(parsed.tickets[0].id, "T1");
    }

    #[test]
    fn test_classification_idempotent_on_reserialized_ticket() {
        let parsed = parse_response("{\"hubspot_ticket_id\": \"T9\", \"asunto\": \"Cambio\"}");
        assert_eq!(parsed.tickets.len(), 1);

        // Re-serialize the recovered ticket and run it through again
        let rewrapped = serde_json::to_string(&parsed.tickets[0]).unwrap();
        let reparsed = parse_response(&rewrapped);

        assert_eq!(reparsed.tickets.len(), 1);
        assert_eq!(reparsed.tickets[0].id, "T9");
        assert_eq!(reparsed.tickets[0].subject, "Cambio");
    }

    #[test]
    fn test_mixed_full_response() {
        let reply = concat!(
            "Resumen del día:\n\n",
            "```json\n",
            "{\"tickets\": [{\"id\": \"HT-1\", \"subject\": \"Vuelo cancelado\"},",
            " {\"id\": \"HT-2\", \"asunto\": \"Equipaje\"}]}\n",
            "```\n",
            "y la métrica:\n",
            "```json\n",
            "{\"chartType\": \"bigNumber\", \"metric\": \"Cerrados\", \"total_closed\": 12}\n",
            "```\n",
            "¿Algo más?"
        );
        let parsed = parse_response(reply);

        let kinds: Vec<_> = parsed.ordered_elements.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec!["text", "ticket", "ticket", "text", "metric", "text"]);
        assert_eq!(parsed.conversational, "Resumen del día:");
        assert_eq!(parsed.additional_text, "¿Algo más?");
        assert_eq!(parsed.tickets.len(), 2);
        assert_eq!(parsed.tickets[1].subject, "Equipaje");
        assert!(parsed.chart_data.is_none());
    }

    #[test]
    fn test_output_record_shape() {
        let parsed = parse_response("hola {\"id\": \"C1\", \"name\": \"Ana\", \"email\": \"ana@x.com\"}");
        let out = serde_json::to_value(&parsed).unwrap();

        assert_eq!(out["orderedElements"][0]["kind"], json!("text"));
        assert_eq!(out["orderedElements"][1]["kind"], json!("contact"));
        assert_eq!(out["orderedElements"][1]["data"]["name"], json!("Ana"));
        assert_eq!(out["conversational"], json!("hola"));
        assert!(out.get("chartData").is_none());
    }
}

//! Shape-based classification of extracted objects.
//!
//! Rules run top to bottom; the first match wins and later rules are never
//! consulted. Chart/metric outranks ticket, ticket outranks contact, so an
//! object that satisfies several families resolves by this order — a
//! documented tie-break for untrusted input, not a detected error.

use super::types::{ChartPayload, ChartType, Contact, Ticket};
use serde_json::{Map, Value};

/// Outcome of classifying one extracted object. Wrapper collections
/// (`{"tickets": [...]}`) arrive already flattened into their items.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Chart(ChartPayload),
    Metric(ChartPayload),
    Tickets(Vec<Ticket>),
    Contacts(Vec<Contact>),
    /// Well-formed JSON matching no known shape. The sequencer still drops
    /// its span from prose but emits no element for it.
    Unrecognized,
}

/// Classify one extracted object by structural shape.
pub fn classify(obj: &Map<String, Value>) -> Classified {
    if is_chart_family(obj) {
        let payload = ChartPayload::from_object(obj);
        return if is_metric(obj, &payload) {
            Classified::Metric(payload)
        } else {
            Classified::Chart(payload)
        };
    }

    if is_single_ticket(obj) {
        return Classified::Tickets(vec![Ticket::from_object(obj)]);
    }
    if let Some(items) = wrapped_objects(obj, "tickets") {
        return Classified::Tickets(items.iter().map(|o| Ticket::from_object(o)).collect());
    }

    if is_single_contact(obj) {
        return Classified::Contacts(vec![Contact::from_object(obj)]);
    }
    if let Some(items) = wrapped_objects(obj, "contacts") {
        return Classified::Contacts(items.iter().map(|o| Contact::from_object(o)).collect());
    }

    Classified::Unrecognized
}

/// Rule 1 trigger: a chart discriminant, a legacy chart spec, or a headline
/// metric field.
fn is_chart_family(obj: &Map<String, Value>) -> bool {
    obj.contains_key("chartType")
        || obj.contains_key("chartSpec")
        || obj.contains_key("total_closed")
        || obj.contains_key("avg_hours_business")
}

/// Within the chart family, single-number payloads classify as `metric`:
/// the discriminant names the big-number variant, the legacy spec uses the
/// text mark, or a headline field stands alone without a plotted data array
/// and without a discriminant.
fn is_metric(obj: &Map<String, Value>, payload: &ChartPayload) -> bool {
    if payload.chart_type == Some(ChartType::BigNumber) {
        return true;
    }
    if payload.has_text_mark() {
        return true;
    }
    let has_headline =
        obj.contains_key("total_closed") || obj.contains_key("avg_hours_business");
    has_headline && !has_data_array(obj) && !obj.contains_key("chartType")
}

fn has_data_array(obj: &Map<String, Value>) -> bool {
    matches!(obj.get("data"), Some(Value::Array(_)))
}

/// Rule 2, single form: a ticket names itself with id + subject in either
/// naming scheme.
fn is_single_ticket(obj: &Map<String, Value>) -> bool {
    (has_field(obj, "id") && has_field(obj, "subject"))
        || (has_field(obj, "hubspot_ticket_id") && has_field(obj, "asunto"))
}

/// Rule 3, single form: id + name in either naming scheme.
fn is_single_contact(obj: &Map<String, Value>) -> bool {
    (has_field(obj, "id") && has_field(obj, "name"))
        || (has_field(obj, "hubspot_contact_id") && has_field(obj, "nombre"))
}

/// Items of a wrapper object like `{"tickets": [...]}`. Only JSON objects
/// in the array count; other item types are skipped.
fn wrapped_objects<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
) -> Option<Vec<&'a Map<String, Value>>> {
    let items = obj.get(key)?.as_array()?;
    Some(items.iter().filter_map(Value::as_object).collect())
}

/// Present, non-null, and not an empty string.
fn has_field(obj: &Map<String, Value>, key: &str) -> bool {
    match obj.get(key) {
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Null) | None => false,
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify_json(value: Value) -> Classified {
        match value {
            Value::Object(map) => classify(&map),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_single_ticket_english() {
        let result = classify_json(json!({"id": "T1", "subject": "Vuelo"}));
        match result {
            Classified::Tickets(tickets) => {
                assert_eq!(tickets.len(), 1);
                assert_eq!(tickets[0].subject, "Vuelo");
            }
            other => panic!("expected tickets, got {:?}", other),
        }
    }

    #[test]
    fn test_single_ticket_spanish() {
        let result = classify_json(json!({"hubspot_ticket_id": "T2", "asunto": "Hotel"}));
        assert!(matches!(result, Classified::Tickets(_)));
    }

    #[test]
    fn test_ticket_wrapper_flattens() {
        let result = classify_json(json!({"tickets": [
            {"id": "A", "subject": "uno"},
            {"id": "B", "subject": "dos"}
        ]}));
        match result {
            Classified::Tickets(tickets) => {
                assert_eq!(tickets.len(), 2);
                assert_eq!(tickets[0].id, "A");
                assert_eq!(tickets[1].id, "B");
            }
            other => panic!("expected tickets, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_wrapper_still_claims_span() {
        let result = classify_json(json!({"tickets": []}));
        match result {
            Classified::Tickets(tickets) => assert!(tickets.is_empty()),
            other => panic!("expected tickets, got {:?}", other),
        }
    }

    #[test]
    fn test_single_contact() {
        let result = classify_json(json!({"id": "C1", "name": "Ana"}));
        assert!(matches!(result, Classified::Contacts(_)));
    }

    #[test]
    fn test_contact_wrapper() {
        let result = classify_json(json!({"contacts": [{"id": "C1", "nombre": "Ana"}]}));
        match result {
            Classified::Contacts(contacts) => assert_eq!(contacts[0].name, "Ana"),
            other => panic!("expected contacts, got {:?}", other),
        }
    }

    #[test]
    fn test_chart_with_discriminant() {
        let result = classify_json(json!({
            "chartType": "bar",
            "data": [{"category": "x", "count": 1}]
        }));
        assert!(matches!(result, Classified::Chart(_)));
    }

    #[test]
    fn test_big_number_discriminant_is_metric() {
        let result = classify_json(json!({"chartType": "bigNumber", "data": [{"v": 1}]}));
        assert!(matches!(result, Classified::Metric(_)));
    }

    #[test]
    fn test_headline_without_data_is_metric() {
        let result = classify_json(json!({"total_closed": 96, "metric": "Cerrados"}));
        assert!(matches!(result, Classified::Metric(_)));
    }

    #[test]
    fn test_average_only_is_metric() {
        let result = classify_json(json!({"avg_hours_business": 5.2, "metric": "Promedio"}));
        assert!(matches!(result, Classified::Metric(_)));
    }

    #[test]
    fn test_headline_with_data_and_discriminant_is_chart() {
        let result = classify_json(json!({
            "chartType": "line",
            "total_closed": 96,
            "data": [{"date": "2024-01-01", "count": 3}]
        }));
        assert!(matches!(result, Classified::Chart(_)));
    }

    #[test]
    fn test_legacy_text_mark_is_metric() {
        let result = classify_json(json!({
            "chartSpec": {"mark": {"type": "text"}, "data": {"values": [{"hours": 3.5}]}}
        }));
        assert!(matches!(result, Classified::Metric(_)));
    }

    #[test]
    fn test_legacy_bar_mark_is_chart() {
        let result = classify_json(json!({
            "chartSpec": {"mark": {"type": "bar"}, "data": {"values": []}}
        }));
        assert!(matches!(result, Classified::Chart(_)));
    }

    #[test]
    fn test_chart_outranks_ticket() {
        // Satisfies both families; the chart/metric rule runs first
        let result = classify_json(json!({
            "id": "T1",
            "subject": "Vuelo",
            "chartType": "bar",
            "data": [{"x": 1}]
        }));
        assert!(matches!(result, Classified::Chart(_)));
    }

    #[test]
    fn test_ticket_outranks_contact() {
        let result = classify_json(json!({
            "id": "X1",
            "subject": "asunto",
            "name": "Ana"
        }));
        assert!(matches!(result, Classified::Tickets(_)));
    }

    #[test]
    fn test_unrecognized() {
        let result = classify_json(json!({"foo": 1, "bar": [2, 3]}));
        assert!(matches!(result, Classified::Unrecognized));
    }

    #[test]
    fn test_empty_id_is_not_a_ticket() {
        let result = classify_json(json!({"id": "", "subject": "Vuelo"}));
        assert!(matches!(result, Classified::Unrecognized));
    }
}

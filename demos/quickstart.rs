/// Quickstart demo - the simplest possible usage
use prism::parse_response;

fn main() {
    let reply = r#"Encontré estos tickets abiertos:

```json
{"tickets": [
  {"id": "HT-1001", "subject": "Vuelo cancelado", "status": "open", "priority": "high"},
  {"id": "HT-1002", "asunto": "Cambio de itinerario", "estado": "waiting"}
]}
```

¿Quieres que abra alguno en detalle?"#;

    println!("=== Prism Quick Start ===\n");

    let parsed = parse_response(reply);

    println!("Elements in order:");
    for element in &parsed.ordered_elements {
        println!("  - {}", element.kind());
    }

    println!("\nTickets found: {}", parsed.tickets.len());
    for ticket in &parsed.tickets {
        println!("  {} - {} [{}]", ticket.id, ticket.subject, ticket.status);
    }

    println!("\nLeading prose:  {}", parsed.conversational);
    println!("Trailing prose: {}", parsed.additional_text);
}

/// Decompose a response carrying chart and metric payloads and print the
/// full output record as JSON
use prism::parse_response;

fn main() -> anyhow::Result<()> {
    let reply = concat!(
        "Distribución por canal:\n",
        "{\"chartType\": \"pie\", ",
        "\"metric\": \"Tickets por canal\", ",
        "\"data\": [{\"source\": \"email\", \"count\": 40}, {\"source\": \"chat\", \"count\": 25}], ",
        "\"metadata\": {\"yField\": \"source\", \"valueField\": \"count\"}}\n",
        "y el tiempo medio de resolución:\n",
        "{\"avg_hours_business\": 5.25, \"metric\": \"Horas hábiles\"}\n",
        "Eso es todo."
    );

    let parsed = parse_response(reply);

    println!("{}", serde_json::to_string_pretty(&parsed)?);

    if let Some(metrics) = &parsed.big_number_data {
        for metric in metrics {
            println!(
                "\nheadline: {} = {}",
                metric.metric.as_deref().unwrap_or("?"),
                metric.formatted_value()
            );
        }
    }

    Ok(())
}

use super::fields::{self, format_date, PLACEHOLDER};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A support ticket in canonical form.
///
/// Field values are resolved from the raw extracted object at construction:
/// dual-named attributes prefer the English key, and missing or sentinel
/// values degrade to documented placeholders instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticket {
    pub id: String,
    pub subject: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    pub created_at: String,
    pub closed_at: String,
    pub priority: String,
    pub source: String,
    pub category: String,
    pub subcategory: String,
    pub status: String,
    pub itinerary_number: String,
    pub owner: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resolution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
}

impl Ticket {
    pub fn from_object(obj: &Map<String, Value>) -> Self {
        Ticket {
            id: fields::text_or(obj, &["id", "hubspot_ticket_id"], PLACEHOLDER),
            subject: fields::text_or(obj, &["subject", "asunto"], "Sin asunto"),
            content: fields::text_or(obj, &["content", "descripcion"], ""),
            created_at: fields::text_or(obj, &["created_at", "creado"], PLACEHOLDER),
            closed_at: fields::text_or(obj, &["closed_at", "cerrado"], PLACEHOLDER),
            priority: fields::text_or(obj, &["priority", "prioridad"], PLACEHOLDER),
            source: fields::text_or(obj, &["source", "origen"], PLACEHOLDER),
            category: fields::text_or(obj, &["category", "categoria"], PLACEHOLDER),
            subcategory: fields::text_or(obj, &["subcategory", "subcategoria"], PLACEHOLDER),
            status: fields::text_or(obj, &["status", "estado"], PLACEHOLDER),
            itinerary_number: fields::text_or(obj, &["itinerary_number", "itinerario"], PLACEHOLDER),
            owner: fields::text_or(obj, &["owner", "propietario", "owner_name"], PLACEHOLDER),
            resolution: fields::text_or(obj, &["resolution", "resolucion"], ""),
            ticket_url: safe_url(obj, "ticket_url"),
        }
    }

    /// Creation timestamp normalized to `YYYY-MM-DD`.
    pub fn created_date(&self) -> String {
        format_date(&self.created_at)
    }

    /// Close timestamp normalized to `YYYY-MM-DD`.
    pub fn closed_date(&self) -> String {
        format_date(&self.closed_at)
    }
}

/// A contact record, resolved the same way as [`Ticket`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: String,
    pub owner: String,
}

impl Contact {
    pub fn from_object(obj: &Map<String, Value>) -> Self {
        Contact {
            id: fields::text_or(obj, &["id", "hubspot_contact_id"], PLACEHOLDER),
            name: fields::text_or(obj, &["name", "nombre"], "Sin nombre"),
            email: fields::text_or(obj, &["email"], PLACEHOLDER),
            phone: fields::text_or(obj, &["phone", "telefono"], PLACEHOLDER),
            created_at: fields::text_or(obj, &["created_at", "creado"], PLACEHOLDER),
            owner: fields::text_or(obj, &["owner", "propietario", "owner_name"], PLACEHOLDER),
        }
    }

    /// Creation timestamp normalized to `YYYY-MM-DD`.
    pub fn created_date(&self) -> String {
        format_date(&self.created_at)
    }
}

/// Only http/https URLs survive; anything else resolves to absent.
fn safe_url(obj: &Map<String, Value>, key: &str) -> Option<String> {
    let url = fields::opt_text(obj, &[key])?;
    (url.starts_with("http://") || url.starts_with("https://")).then_some(url)
}

/// Chart discriminant carried by modern payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartType {
    #[serde(rename = "bar")]
    Bar,
    #[serde(rename = "line")]
    Line,
    #[serde(rename = "pie")]
    Pie,
    #[serde(rename = "bigNumber")]
    BigNumber,
}

impl ChartType {
    /// Parse the discriminant leniently; unknown names yield `None`.
    pub fn from_value(value: &Value) -> Option<ChartType> {
        match value.as_str()? {
            "bar" => Some(ChartType::Bar),
            "line" => Some(ChartType::Line),
            "pie" => Some(ChartType::Pie),
            "bigNumber" => Some(ChartType::BigNumber),
            _ => None,
        }
    }
}

/// Axis and field hints attached to modern chart payloads. Unrecognized
/// hints ride along in `extra` so nothing the agent sent is dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_height: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A chart or big-number payload.
///
/// Known fields are typed; everything else is preserved verbatim in `extra`
/// so the payload re-serializes for the rendering layer intact. Values that
/// fail to coerce (an unknown `chartType`, a non-array `data`) fall back to
/// `extra` rather than being lost. The legacy `chartSpec` block stays
/// opaque: the engine classifies on it but never interprets chart semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ChartMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_spec: Option<Value>,
    #[serde(rename = "total_closed", skip_serializing_if = "Option::is_none")]
    pub total_closed: Option<f64>,
    #[serde(rename = "avg_hours_business", skip_serializing_if = "Option::is_none")]
    pub avg_hours_business: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChartPayload {
    pub fn from_object(obj: &Map<String, Value>) -> Self {
        let mut payload = ChartPayload::default();
        let mut extra = Map::new();

        for (key, value) in obj {
            match key.as_str() {
                "chartType" => match ChartType::from_value(value) {
                    Some(t) => payload.chart_type = Some(t),
                    None => {
                        extra.insert(key.clone(), value.clone());
                    }
                },
                "data" => match value.as_array() {
                    Some(rows) => payload.data = Some(rows.clone()),
                    None => {
                        extra.insert(key.clone(), value.clone());
                    }
                },
                "metadata" => match serde_json::from_value(value.clone()) {
                    Ok(meta) => payload.metadata = Some(meta),
                    Err(_) => {
                        extra.insert(key.clone(), value.clone());
                    }
                },
                "metric" => match value.as_str() {
                    Some(s) => payload.metric = Some(s.to_string()),
                    None => {
                        extra.insert(key.clone(), value.clone());
                    }
                },
                "summary" => match value.as_str() {
                    Some(s) => payload.summary = Some(s.to_string()),
                    None => {
                        extra.insert(key.clone(), value.clone());
                    }
                },
                "chartSpec" => payload.chart_spec = Some(value.clone()),
                "total_closed" => match fields::value_number(value) {
                    Some(n) => payload.total_closed = Some(n),
                    None => {
                        extra.insert(key.clone(), value.clone());
                    }
                },
                "avg_hours_business" => match fields::value_number(value) {
                    Some(n) => payload.avg_hours_business = Some(n),
                    None => {
                        extra.insert(key.clone(), value.clone());
                    }
                },
                _ => {
                    extra.insert(key.clone(), value.clone());
                }
            }
        }

        payload.extra = extra;
        payload
    }

    /// `true` when the legacy chart spec uses the text mark, the shape the
    /// upstream emits for single-number cards.
    pub fn has_text_mark(&self) -> bool {
        match self.chart_spec.as_ref().and_then(|spec| spec.get("mark")) {
            Some(Value::String(kind)) => kind == "text",
            Some(mark) => mark.get("type").and_then(Value::as_str) == Some("text"),
            None => false,
        }
    }

    /// Resolve the headline number for a big-number card.
    ///
    /// Precedence: a numeric `hours` value in the first row of the legacy
    /// `chartSpec` data, then `avg_hours_business`, then `total_closed`.
    /// Missing or non-numeric values degrade to zero rather than failing.
    pub fn metric_value(&self) -> f64 {
        if let Some(hours) = self.spec_first_row_hours() {
            return hours;
        }
        self.avg_hours_business.or(self.total_closed).unwrap_or(0.0)
    }

    /// Render the headline number: ticket counts as integers, durations
    /// with two decimals.
    pub fn formatted_value(&self) -> String {
        let value = self.metric_value();
        if self.total_closed.is_some() && self.avg_hours_business.is_none() {
            format!("{}", value.round() as i64)
        } else {
            format!("{:.2}", value)
        }
    }

    fn spec_first_row_hours(&self) -> Option<f64> {
        let rows = self
            .chart_spec
            .as_ref()?
            .get("data")?
            .get("values")?
            .as_array()?;
        fields::value_number(rows.first()?.get("hours")?)
    }
}

/// One renderable unit of a decomposed response, in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum OrderedElement {
    Text(String),
    Ticket(Ticket),
    Contact(Contact),
    Chart(ChartPayload),
    Metric(ChartPayload),
}

impl OrderedElement {
    /// The discriminant name used in serialized output.
    pub fn kind(&self) -> &'static str {
        match self {
            OrderedElement::Text(_) => "text",
            OrderedElement::Ticket(_) => "ticket",
            OrderedElement::Contact(_) => "contact",
            OrderedElement::Chart(_) => "chart",
            OrderedElement::Metric(_) => "metric",
        }
    }
}

/// Everything recovered from one agent response.
///
/// `ordered_elements` preserves document order; the remaining fields are the
/// flattened legacy view for callers that do not need positional fidelity.
/// The two chart collections are `None` (absent in JSON output) when the
/// response carried none, never an empty array.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResponse {
    pub ordered_elements: Vec<OrderedElement>,
    pub conversational: String,
    pub additional_text: String,
    pub tickets: Vec<Ticket>,
    pub contacts: Vec<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<Vec<ChartPayload>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub big_number_data: Option<Vec<ChartPayload>>,
}

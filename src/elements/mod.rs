//! Classification, field resolution, and ordered reassembly.
//!
//! Takes the `(object, span)` pairs the extraction pass found and turns
//! them into renderable typed elements: each object is classified by shape
//! (ticket, contact, chart, metric), wrapper collections are flattened, and
//! the prose between spans is re-interleaved in document order.

pub mod classify;
pub mod fields;
pub mod sequencer;
pub mod types;

pub use classify::{classify, Classified};
pub use fields::{format_date, normalize_markdown};
pub use sequencer::sequence;
pub use types::{
    ChartMetadata, ChartPayload, ChartType, Contact, OrderedElement, ParsedResponse, Ticket,
};

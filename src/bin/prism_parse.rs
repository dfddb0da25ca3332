//! prism-parse: decompose agent chat responses into structured JSON
//!
//! Usage:
//!   # Parse a saved response, pretty JSON record to stdout
//!   prism-parse response.txt
//!
//!   # Read from stdin
//!   cat response.txt | prism-parse
//!
//!   # Decompose every assistant message in a chat export (one envelope per line)
//!   prism-parse --jsonl conversation.jsonl
//!
//!   # Human-readable preview instead of JSON
//!   prism-parse response.txt --text

// MiMalloc keeps bulk JSONL decoding fast (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Result;
use clap::Parser;
use prism::elements::normalize_markdown;
use prism::{parse_response, OrderedElement, ParsedResponse};
use serde::Deserialize;
use std::fs::File;
use std::io::{stdin, Read};

#[derive(Parser, Debug)]
#[command(name = "prism-parse")]
#[command(about = "Decompose agent responses into ordered, typed elements", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Input is a chat export with one JSON envelope per line
    #[arg(long)]
    jsonl: bool,

    /// Compact output (no pretty-printing)
    #[arg(long)]
    compact: bool,

    /// Print a human-readable preview instead of JSON
    #[arg(long, conflicts_with = "compact")]
    text: bool,
}

/// One line of a chat export.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    role: String,
    #[serde(default)]
    content: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut content = String::new();
    if let Some(path) = &args.input {
        File::open(path)?.read_to_string(&mut content)?;
    } else {
        stdin().read_to_string(&mut content)?;
    }

    if args.jsonl {
        process_export(&content, args.text)?;
    } else {
        let parsed = parse_response(&content);
        if args.text {
            print_preview(&parsed);
        } else if args.compact {
            println!("{}", serde_json::to_string(&parsed)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
    }

    Ok(())
}

/// Decompose every assistant message in a JSONL chat export, one record per
/// line. Undecodable lines are reported to stderr and skipped.
fn process_export(content: &str, text: bool) -> Result<()> {
    let mut skipped = 0;

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut bytes = line.as_bytes().to_vec();
        let envelope: Envelope = match simd_json::from_slice(&mut bytes) {
            Ok(env) => env,
            Err(err) => {
                eprintln!("Warning: skipping line {}: {}", lineno + 1, err);
                skipped += 1;
                continue;
            }
        };

        if envelope.role != "assistant" {
            continue;
        }

        let parsed = parse_response(&envelope.content);
        if text {
            print_preview(&parsed);
        } else {
            println!("{}", serde_json::to_string(&parsed)?);
        }
    }

    if skipped > 0 {
        eprintln!("Warning: {} undecodable lines skipped", skipped);
    }

    Ok(())
}

/// One line per element: normalized prose, or a summary of the structured
/// payload.
fn print_preview(parsed: &ParsedResponse) {
    for element in &parsed.ordered_elements {
        match element {
            OrderedElement::Text(prose) => println!("{}", normalize_markdown(prose)),
            OrderedElement::Ticket(ticket) => println!(
                "[ticket {}] {} ({})",
                ticket.id, ticket.subject, ticket.status
            ),
            OrderedElement::Contact(contact) => println!(
                "[contact {}] {} <{}>",
                contact.id, contact.name, contact.email
            ),
            OrderedElement::Chart(chart) => println!(
                "[chart] {}",
                chart.metric.as_deref().unwrap_or("visualización")
            ),
            OrderedElement::Metric(metric) => println!(
                "[metric] {}: {}",
                metric.metric.as_deref().unwrap_or("Métrica"),
                metric.formatted_value()
            ),
        }
    }
}

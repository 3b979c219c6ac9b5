//! `stencil` CLI — drive the template-data conversion core from the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # Encode JSON into a document tree and back (stdin → stdout)
//! echo '{"name":"Alice","scores":[95,87]}' | stencil encode
//!
//! # Encode from file to file
//! stencil encode -i data.json -o data.out
//!
//! # Show the raw document tree instead of re-materialized JSON
//! stencil encode --tree -i data.json
//!
//! # Render an epoch timestamp with the dateFormat tag
//! stencil date-format 1609459200
//! stencil date-format 1609459200 '%Y-%m-%d'
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};

use stencil_core::{encode, Document};
use stencil_tags::{DateFormat, TagContext, TagRenderer};

#[derive(Parser)]
#[command(name = "stencil", version, about = "stencil template-data CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode JSON into a document tree
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Print the raw document tree instead of pretty JSON
        #[arg(long)]
        tree: bool,
    },
    /// Render an epoch-seconds timestamp with the dateFormat tag
    DateFormat {
        /// Seconds since the Unix epoch (fractions allowed)
        timestamp: f64,
        /// Optional strftime pattern (defaults to "%Y-%m-%d %H:%M:%S")
        pattern: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            output,
            tree,
        } => {
            let json = read_input(input.as_deref())?;
            let value: serde_json::Value =
                serde_json::from_str(&json).context("Failed to parse input as JSON")?;
            let document = encode(&value).context("Failed to encode value as a document")?;

            let rendered = if tree {
                format!("{:#?}\n", document)
            } else {
                let mut pretty = serde_json::to_string_pretty(&document_to_json(&document))?;
                pretty.push('\n');
                pretty
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::DateFormat { timestamp, pattern } => {
            let mut parameters = vec![Document::Double(timestamp)];
            if let Some(pattern) = pattern {
                parameters.push(Document::String(pattern));
            }
            let deferred = DateFormat::new()
                .render(TagContext::new("dateFormat", parameters))
                .context("dateFormat tag failed")?;

            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .context("Failed to start a runtime")?;
            let document = runtime
                .block_on(deferred.resolve())
                .context("dateFormat resolution failed")?;

            match document.as_string() {
                Some(rendered) => println!("{}", rendered),
                None => println!("null"),
            }
        }
    }

    Ok(())
}

/// Re-materialize a document as JSON for display. Deferred leaves cannot
/// arise from JSON input and render as null.
fn document_to_json(document: &Document) -> serde_json::Value {
    match document {
        Document::Null => serde_json::Value::Null,
        Document::Bool(value) => serde_json::Value::Bool(*value),
        Document::Int(value) => serde_json::Value::from(*value),
        Document::Double(value) => serde_json::Number::from_f64(*value)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Document::String(value) => serde_json::Value::String(value.clone()),
        Document::Array(elements) => {
            serde_json::Value::Array(elements.iter().map(document_to_json).collect())
        }
        Document::Dictionary(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), document_to_json(value)))
                .collect(),
        ),
        Document::Future(_) => serde_json::Value::Null,
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

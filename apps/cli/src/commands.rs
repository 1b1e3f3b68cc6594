//! Subcommands of `fhir-primconv`

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ferrum_primitives::{
    parse_time_literal, to_document, to_wire, DocumentPrimitive, SemanticKind, WirePrimitive,
};

use crate::config::OutputConfig;

#[derive(Debug, Parser)]
#[command(
    name = "fhir-primconv",
    version,
    about = "Convert FHIR primitive values between the document and wire models"
)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert a document literal into its wire JSON
    ToWire {
        /// FHIR primitive type, e.g. dateTime or positiveInt
        #[arg(long = "type", value_parser = parse_kind)]
        kind: SemanticKind,
        literal: String,
    },
    /// Convert wire JSON into a document literal
    ToDocument {
        #[arg(long = "type", value_parser = parse_kind)]
        kind: SemanticKind,
        wire_json: String,
    },
    /// Convert a document literal to the wire model and back
    RoundTrip {
        #[arg(long = "type", value_parser = parse_kind)]
        kind: SemanticKind,
        literal: String,
    },
}

fn parse_kind(name: &str) -> Result<SemanticKind, String> {
    SemanticKind::from_fhir_type(name).map_err(|e| e.to_string())
}

/// Text to print and whether the command succeeded.
#[derive(Debug)]
pub struct Outcome {
    pub output: String,
    pub success: bool,
}

pub fn run(command: &Command, output: &OutputConfig) -> anyhow::Result<Outcome> {
    match command {
        Command::ToWire { kind, literal } => {
            let document = DocumentPrimitive::from_literal(*kind, literal)?;
            let wire = to_wire(&document, *kind)
                .with_context(|| format!("Failed to convert {kind} '{literal}' to wire"))?;
            Ok(Outcome {
                output: render(&wire, output)?,
                success: true,
            })
        }
        Command::ToDocument { kind, wire_json } => {
            let wire: WirePrimitive =
                serde_json::from_str(wire_json).context("Failed to parse wire JSON")?;
            let document = to_document(&wire, *kind)
                .with_context(|| format!("Failed to convert wire value to {kind}"))?;
            Ok(Outcome {
                output: document.to_literal()?,
                success: true,
            })
        }
        Command::RoundTrip { kind, literal } => {
            let document = DocumentPrimitive::from_literal(*kind, literal)?;
            let wire = to_wire(&document, *kind)
                .with_context(|| format!("Failed to convert {kind} '{literal}' to wire"))?;
            let back = to_document(&wire, *kind).context("Failed to convert back to document")?;

            let success = same_semantics(&document, &back)?;
            if !success {
                tracing::warn!(kind = %kind, literal = %literal, "round trip changed the value");
            }

            let back_literal = back.to_literal()?;
            Ok(Outcome {
                output: format!("{}\n{}", render(&wire, output)?, back_literal),
                success,
            })
        }
    }
}

/// Time-of-day values compare by instant; their literal form is not preserved.
fn same_semantics(before: &DocumentPrimitive, after: &DocumentPrimitive) -> anyhow::Result<bool> {
    match (before, after) {
        (DocumentPrimitive::Time(a), DocumentPrimitive::Time(b)) => {
            Ok(parse_time_literal(a)?.0 == parse_time_literal(b)?.0)
        }
        _ => Ok(before == after),
    }
}

fn render(wire: &WirePrimitive, output: &OutputConfig) -> anyhow::Result<String> {
    let text = if output.pretty {
        serde_json::to_string_pretty(wire)?
    } else {
        serde_json::to_string(wire)?
    };
    Ok(text)
}

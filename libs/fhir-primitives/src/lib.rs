//! FHIR primitive conversion between the document and wire models
//!
//! The document model is string-oriented: temporal values are formatted text with an
//! attached precision and timezone. The wire model is binary-oriented: temporal
//! values are microsecond offsets with a precision code and an optional timezone
//! string. This crate converts single primitive values between the two without
//! losing value, timezone or precision.
//!
//! # Module Organization
//!
//! - `kind`: the closed set of semantic kinds and the FHIR type vocabulary
//! - `classify`: kind compatibility check run before every conversion
//! - `engine`: forward and backward transforms
//! - `model`: document and wire value types
//! - `precision`: precision enumerations and wire codes
//! - `temporal` / `time`: FHIR temporal literals and the time-of-day codec
//! - `provider`: construct-once handle for the storage engine collaborator
//!
//! # Example
//!
//! ```rust
//! use ferrum_primitives::{
//!     to_document, to_wire, DocumentPrimitive, SemanticKind, TemporalKind, TemporalValue,
//!     WirePrimitive,
//! };
//!
//! let kind = SemanticKind::from_fhir_type("dateTime").unwrap();
//! let doc = DocumentPrimitive::Temporal {
//!     kind: TemporalKind::DateTime,
//!     value: TemporalValue::parse(TemporalKind::DateTime, "2020-03-14T09:26:53+01:00").unwrap(),
//! };
//!
//! let wire = to_wire(&doc, kind).unwrap();
//! if let WirePrimitive::Temporal { value, .. } = &wire {
//!     assert_eq!(value.timezone.as_deref(), Some("+01:00"));
//!     assert_eq!(value.precision, 4);
//! }
//! assert_eq!(to_document(&wire, kind).unwrap(), doc);
//! ```

pub mod classify;
pub mod engine;
pub mod error;
pub mod kind;
pub mod model;
pub mod precision;
pub mod provider;
pub mod temporal;
pub mod time;

pub use classify::classify;
pub use engine::{convert, to_document, to_wire};
pub use error::{Error, Result};
pub use kind::{IntegerType, SemanticKind, StringType, TemporalKind};
pub use model::{Direction, DocumentPrimitive, Primitive, WirePrimitive, WireTemporal, WireTime};
pub use precision::{Precision, TimePrecision, INSTANT_CODE_SHIFT};
pub use provider::EngineProvider;
pub use temporal::{TemporalValue, TimeZoneId};
pub use time::{format_time_of_day, parse_time_literal};

//! Conversion engine
//!
//! Forward (document → wire) and backward (wire → document) transforms, one rule per
//! [`SemanticKind`]:
//! - boolean, integer and string-like values are copied unchanged.
//! - decimal text is copied verbatim, never through a numeric type.
//! - base64Binary text is reinterpreted as its UTF-8 bytes (not base64-decoded).
//! - date, dateTime and instant become an epoch offset in microseconds, a
//!   precision code and an optional timezone identifier.
//! - time literals become microseconds since midnight and a precision code.
//!
//! Every function classifies first, so a kind mismatch fails before any payload
//! is read. No function returns a partially populated value.

use std::sync::OnceLock;

use regex::Regex;

use crate::classify::classify;
use crate::error::{Error, Result};
use crate::kind::{SemanticKind, TemporalKind};
use crate::model::{DocumentPrimitive, Primitive, WirePrimitive, WireTemporal, WireTime};
use crate::precision::{Precision, TimePrecision};
use crate::temporal::{TemporalValue, TimeZoneId};
use crate::time::{format_time_of_day, parse_time_literal};

/// Convert a document value into the wire shape `target`.
pub fn to_wire(value: &DocumentPrimitive, target: SemanticKind) -> Result<WirePrimitive> {
    let kind = classify(value.kind(), target)?;

    let wire = match value {
        DocumentPrimitive::Boolean(b) => WirePrimitive::Boolean(*b),
        DocumentPrimitive::Integer { ty, value } => WirePrimitive::Integer {
            ty: *ty,
            value: *value,
        },
        DocumentPrimitive::String { ty, value } => WirePrimitive::String {
            ty: *ty,
            value: value.clone(),
        },
        DocumentPrimitive::Decimal(text) => {
            check_decimal(text)?;
            WirePrimitive::Decimal(text.clone())
        }
        DocumentPrimitive::Base64Binary(text) => WirePrimitive::Base64Binary(text.as_bytes().to_vec()),
        DocumentPrimitive::Temporal { kind, value } => WirePrimitive::Temporal {
            kind: *kind,
            value: temporal_to_wire(*kind, value)?,
        },
        DocumentPrimitive::Time(literal) => {
            let (value_us, precision) = parse_time_literal(literal)?;
            WirePrimitive::Time(WireTime {
                value_us,
                precision: precision.code(),
            })
        }
    };

    tracing::trace!(kind = %kind, "converted document primitive to wire");
    Ok(wire)
}

/// Convert a wire value into the document shape `target`.
pub fn to_document(value: &WirePrimitive, target: SemanticKind) -> Result<DocumentPrimitive> {
    let kind = classify(value.kind(), target)?;

    let document = match value {
        WirePrimitive::Boolean(b) => DocumentPrimitive::Boolean(*b),
        WirePrimitive::Integer { ty, value } => DocumentPrimitive::Integer {
            ty: *ty,
            value: *value,
        },
        WirePrimitive::String { ty, value } => DocumentPrimitive::String {
            ty: *ty,
            value: value.clone(),
        },
        WirePrimitive::Decimal(text) => {
            check_decimal(text)?;
            DocumentPrimitive::Decimal(text.clone())
        }
        WirePrimitive::Base64Binary(bytes) => {
            DocumentPrimitive::Base64Binary(String::from_utf8(bytes.clone())?)
        }
        WirePrimitive::Temporal { kind, value } => DocumentPrimitive::Temporal {
            kind: *kind,
            value: temporal_from_wire(*kind, value)?,
        },
        // Only checked for validity; formatting is fixed.
        WirePrimitive::Time(time) => {
            TimePrecision::from_code(time.precision)
                .ok_or(Error::InvalidTimePrecisionCode(time.precision))?;
            DocumentPrimitive::Time(format_time_of_day(time.value_us)?)
        }
    };

    tracing::trace!(kind = %kind, "converted wire primitive to document");
    Ok(document)
}

/// Convert whichever side `value` holds into the opposite model.
pub fn convert(value: &Primitive, target: SemanticKind) -> Result<Primitive> {
    match value {
        Primitive::Document(document) => to_wire(document, target).map(Primitive::Wire),
        Primitive::Wire(wire) => to_document(wire, target).map(Primitive::Document),
    }
}

fn temporal_to_wire(kind: TemporalKind, value: &TemporalValue) -> Result<WireTemporal> {
    let precision = value.precision().to_wire_code(kind)?;
    Ok(WireTemporal {
        value_us: value.epoch_micros(),
        timezone: value.timezone().map(TimeZoneId::canonical_id),
        precision,
    })
}

fn temporal_from_wire(kind: TemporalKind, value: &WireTemporal) -> Result<TemporalValue> {
    let precision = Precision::from_wire_code(value.precision, kind)?;
    let timezone = value.timezone.as_deref().and_then(TimeZoneId::parse);
    TemporalValue::from_epoch_micros(value.value_us, precision, timezone)
}

fn check_decimal(text: &str) -> Result<()> {
    static DECIMAL_RE: OnceLock<Regex> = OnceLock::new();
    let re = DECIMAL_RE.get_or_init(|| {
        Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?$")
            .expect("decimal regex must compile")
    });

    if re.is_match(text) {
        Ok(())
    } else {
        Err(Error::MalformedDecimal(text.to_string()))
    }
}

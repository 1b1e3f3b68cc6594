//! Error types for primitive conversion

use thiserror::Error;

use crate::kind::{SemanticKind, TemporalKind};
use crate::precision::Precision;

/// Conversion errors.
///
/// Every error is terminal for the call that produced it: no conversion
/// returns a partially populated value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Cannot convert {source_kind} to {target_kind}")]
    KindMismatch {
        source_kind: SemanticKind,
        target_kind: SemanticKind,
    },

    #[error("Precision {precision:?} is not supported for {kind}")]
    UnsupportedPrecision {
        kind: TemporalKind,
        precision: Precision,
    },

    #[error("Invalid precision code {code} for {kind}")]
    InvalidPrecisionCode { kind: TemporalKind, code: i32 },

    #[error("Invalid time precision code {0}")]
    InvalidTimePrecisionCode(i32),

    #[error("Malformed time literal '{literal}': {reason}")]
    MalformedTimeLiteral {
        literal: String,
        reason: &'static str,
    },

    #[error("Time of day out of range: {0}us")]
    TimeOfDayOutOfRange(i64),

    #[error("Malformed {kind} literal: '{literal}'")]
    MalformedTemporalLiteral { kind: TemporalKind, literal: String },

    #[error("Timestamp out of range: {0}us")]
    TimestampOutOfRange(i64),

    #[error("Malformed {kind} literal: '{literal}'")]
    MalformedLiteral { kind: SemanticKind, literal: String },

    #[error("Malformed decimal: '{0}'")]
    MalformedDecimal(String),

    #[error("Binary payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Unknown primitive type: {0}")]
    UnknownType(String),
}

pub type Result<T> = std::result::Result<T, Error>;

//! Semantic kinds shared by the document and wire models
//!
//! Every primitive value carries exactly one [`SemanticKind`]. The kind drives all
//! dispatch in the engine, and two kinds only compare equal when they denote the
//! same FHIR type (`code` and `string` are both string-like but are distinct kinds).
//!
//! The discriminator vocabulary (`"boolean"`, `"dateTime"`, ...) is resolved through
//! a compile-time perfect hash map.

use std::fmt;

use phf::phf_map;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Integer-valued FHIR types. All are carried as 32-bit signed integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntegerType {
    Integer,
    PositiveInt,
    UnsignedInt,
}

/// String-valued FHIR types whose payload is copied unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StringType {
    String,
    Id,
    Code,
    Uri,
    Url,
    Canonical,
    Oid,
    Markdown,
    Uuid,
}

/// Calendar types stored as an epoch offset plus precision and timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemporalKind {
    Date,
    DateTime,
    Instant,
}

/// The closed set of primitive categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticKind {
    Boolean,
    Integer(IntegerType),
    StringLike(StringType),
    Decimal,
    Base64Binary,
    Temporal(TemporalKind),
    TimeOfDay,
}

static KINDS_BY_FHIR_TYPE: phf::Map<&'static str, SemanticKind> = phf_map! {
    "boolean" => SemanticKind::Boolean,

    "integer" => SemanticKind::Integer(IntegerType::Integer),
    "positiveInt" => SemanticKind::Integer(IntegerType::PositiveInt),
    "unsignedInt" => SemanticKind::Integer(IntegerType::UnsignedInt),

    "string" => SemanticKind::StringLike(StringType::String),
    "id" => SemanticKind::StringLike(StringType::Id),
    "code" => SemanticKind::StringLike(StringType::Code),
    "uri" => SemanticKind::StringLike(StringType::Uri),
    "url" => SemanticKind::StringLike(StringType::Url),
    "canonical" => SemanticKind::StringLike(StringType::Canonical),
    "oid" => SemanticKind::StringLike(StringType::Oid),
    "markdown" => SemanticKind::StringLike(StringType::Markdown),
    "uuid" => SemanticKind::StringLike(StringType::Uuid),

    "decimal" => SemanticKind::Decimal,
    "base64Binary" => SemanticKind::Base64Binary,

    "date" => SemanticKind::Temporal(TemporalKind::Date),
    "dateTime" => SemanticKind::Temporal(TemporalKind::DateTime),
    "instant" => SemanticKind::Temporal(TemporalKind::Instant),

    "time" => SemanticKind::TimeOfDay,
};

/// Suffix some document models append to their primitive type names
/// (`StringType` for the wire model's `String`).
const DOCUMENT_TYPE_SUFFIX: &str = "Type";

impl IntegerType {
    pub fn fhir_type(self) -> &'static str {
        match self {
            IntegerType::Integer => "integer",
            IntegerType::PositiveInt => "positiveInt",
            IntegerType::UnsignedInt => "unsignedInt",
        }
    }
}

impl StringType {
    pub fn fhir_type(self) -> &'static str {
        match self {
            StringType::String => "string",
            StringType::Id => "id",
            StringType::Code => "code",
            StringType::Uri => "uri",
            StringType::Url => "url",
            StringType::Canonical => "canonical",
            StringType::Oid => "oid",
            StringType::Markdown => "markdown",
            StringType::Uuid => "uuid",
        }
    }
}

impl TemporalKind {
    pub fn fhir_type(self) -> &'static str {
        match self {
            TemporalKind::Date => "date",
            TemporalKind::DateTime => "dateTime",
            TemporalKind::Instant => "instant",
        }
    }
}

impl SemanticKind {
    /// Resolve a FHIR type discriminator such as `"dateTime"` or `"positiveInt"`.
    pub fn from_fhir_type(name: &str) -> Result<SemanticKind> {
        KINDS_BY_FHIR_TYPE
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownType(name.to_string()))
    }

    /// Resolve a model type name, with or without the document `Type` suffix.
    ///
    /// `"DateTimeType"`, `"DateTime"` and `"dateTime"` all resolve to the same kind.
    pub fn from_type_name(name: &str) -> Result<SemanticKind> {
        let bare = name.strip_suffix(DOCUMENT_TYPE_SUFFIX).unwrap_or(name);
        let mut chars = bare.chars();
        let fhir_type = match chars.next() {
            Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
            None => return Err(Error::UnknownType(name.to_string())),
        };
        SemanticKind::from_fhir_type(&fhir_type).map_err(|_| Error::UnknownType(name.to_string()))
    }

    pub fn fhir_type(self) -> &'static str {
        match self {
            SemanticKind::Boolean => "boolean",
            SemanticKind::Integer(ty) => ty.fhir_type(),
            SemanticKind::StringLike(ty) => ty.fhir_type(),
            SemanticKind::Decimal => "decimal",
            SemanticKind::Base64Binary => "base64Binary",
            SemanticKind::Temporal(kind) => kind.fhir_type(),
            SemanticKind::TimeOfDay => "time",
        }
    }

    /// Every kind, in vocabulary order.
    pub fn all() -> impl Iterator<Item = SemanticKind> {
        const ORDER: [&str; 19] = [
            "boolean",
            "integer",
            "positiveInt",
            "unsignedInt",
            "string",
            "id",
            "code",
            "uri",
            "url",
            "canonical",
            "oid",
            "markdown",
            "uuid",
            "decimal",
            "base64Binary",
            "date",
            "dateTime",
            "instant",
            "time",
        ];
        ORDER
            .into_iter()
            .filter_map(|name| KINDS_BY_FHIR_TYPE.get(name).copied())
    }
}

impl fmt::Display for SemanticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fhir_type())
    }
}

impl fmt::Display for TemporalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fhir_type())
    }
}

impl std::str::FromStr for SemanticKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SemanticKind::from_fhir_type(s)
    }
}

impl From<TemporalKind> for SemanticKind {
    fn from(kind: TemporalKind) -> Self {
        SemanticKind::Temporal(kind)
    }
}

impl Serialize for SemanticKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.fhir_type())
    }
}

impl<'de> Deserialize<'de> for SemanticKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        SemanticKind::from_fhir_type(&name).map_err(serde::de::Error::custom)
    }
}

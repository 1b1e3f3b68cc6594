//! Document and wire representations of a primitive value
//!
//! Both models are tagged unions: the variant fixes the [`SemanticKind`], so a value
//! can never carry a payload of the wrong shape for its kind.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::kind::{IntegerType, SemanticKind, StringType, TemporalKind};
use crate::temporal::TemporalValue;

/// The string-oriented document model, used for interchange and editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentPrimitive {
    Boolean(bool),
    Integer {
        #[serde(rename = "type")]
        ty: IntegerType,
        value: i32,
    },
    String {
        #[serde(rename = "type")]
        ty: StringType,
        value: String,
    },
    /// Exact decimal text, never normalised.
    Decimal(String),
    /// Base64 text as written in the document.
    Base64Binary(String),
    Temporal {
        kind: TemporalKind,
        #[serde(flatten)]
        value: TemporalValue,
    },
    /// Time-of-day literal; its precision is implied by its formatting.
    Time(String),
}

/// Wire payload for date, dateTime and instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTemporal {
    /// Microseconds since the Unix epoch.
    pub value_us: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub precision: i32,
}

/// Wire payload for time-of-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTime {
    /// Microseconds since midnight.
    pub value_us: i64,
    pub precision: i32,
}

/// The strictly-typed wire model, used for compact storage and transmission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WirePrimitive {
    Boolean(bool),
    Integer {
        #[serde(rename = "type")]
        ty: IntegerType,
        value: i32,
    },
    String {
        #[serde(rename = "type")]
        ty: StringType,
        value: String,
    },
    Decimal(String),
    Base64Binary(#[serde(with = "base64_bytes")] Vec<u8>),
    Temporal {
        kind: TemporalKind,
        #[serde(flatten)]
        value: WireTemporal,
    },
    Time(WireTime),
}

impl DocumentPrimitive {
    pub fn kind(&self) -> SemanticKind {
        match self {
            DocumentPrimitive::Boolean(_) => SemanticKind::Boolean,
            DocumentPrimitive::Integer { ty, .. } => SemanticKind::Integer(*ty),
            DocumentPrimitive::String { ty, .. } => SemanticKind::StringLike(*ty),
            DocumentPrimitive::Decimal(_) => SemanticKind::Decimal,
            DocumentPrimitive::Base64Binary(_) => SemanticKind::Base64Binary,
            DocumentPrimitive::Temporal { kind, .. } => SemanticKind::Temporal(*kind),
            DocumentPrimitive::Time(_) => SemanticKind::TimeOfDay,
        }
    }

    /// Build a document value of `kind` from its FHIR literal.
    ///
    /// Decimal and time text is taken as written; it is validated when converted.
    pub fn from_literal(kind: SemanticKind, literal: &str) -> Result<Self> {
        let malformed = || Error::MalformedLiteral {
            kind,
            literal: literal.to_string(),
        };
        Ok(match kind {
            SemanticKind::Boolean => match literal {
                "true" => DocumentPrimitive::Boolean(true),
                "false" => DocumentPrimitive::Boolean(false),
                _ => return Err(malformed()),
            },
            SemanticKind::Integer(ty) => DocumentPrimitive::Integer {
                ty,
                value: literal.parse().map_err(|_| malformed())?,
            },
            SemanticKind::StringLike(ty) => DocumentPrimitive::String {
                ty,
                value: literal.to_string(),
            },
            SemanticKind::Decimal => DocumentPrimitive::Decimal(literal.to_string()),
            SemanticKind::Base64Binary => DocumentPrimitive::Base64Binary(literal.to_string()),
            SemanticKind::Temporal(kind) => DocumentPrimitive::Temporal {
                kind,
                value: TemporalValue::parse(kind, literal)?,
            },
            SemanticKind::TimeOfDay => DocumentPrimitive::Time(literal.to_string()),
        })
    }

    /// The FHIR literal for this value.
    pub fn to_literal(&self) -> Result<String> {
        Ok(match self {
            DocumentPrimitive::Boolean(b) => b.to_string(),
            DocumentPrimitive::Integer { value, .. } => value.to_string(),
            DocumentPrimitive::String { value, .. } => value.clone(),
            DocumentPrimitive::Decimal(text)
            | DocumentPrimitive::Base64Binary(text)
            | DocumentPrimitive::Time(text) => text.clone(),
            DocumentPrimitive::Temporal { kind, value } => value.to_literal(*kind)?,
        })
    }
}

impl WirePrimitive {
    pub fn kind(&self) -> SemanticKind {
        match self {
            WirePrimitive::Boolean(_) => SemanticKind::Boolean,
            WirePrimitive::Integer { ty, .. } => SemanticKind::Integer(*ty),
            WirePrimitive::String { ty, .. } => SemanticKind::StringLike(*ty),
            WirePrimitive::Decimal(_) => SemanticKind::Decimal,
            WirePrimitive::Base64Binary(_) => SemanticKind::Base64Binary,
            WirePrimitive::Temporal { kind, .. } => SemanticKind::Temporal(*kind),
            WirePrimitive::Time(_) => SemanticKind::TimeOfDay,
        }
    }
}

/// Which way a conversion runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    ToWire,
    ToDocument,
}

/// One side of a value, as held by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Primitive {
    Document(DocumentPrimitive),
    Wire(WirePrimitive),
}

impl Primitive {
    pub fn kind(&self) -> SemanticKind {
        match self {
            Primitive::Document(value) => value.kind(),
            Primitive::Wire(value) => value.kind(),
        }
    }

    /// The direction a conversion of this value runs in.
    pub fn direction(&self) -> Direction {
        match self {
            Primitive::Document(_) => Direction::ToWire,
            Primitive::Wire(_) => Direction::ToDocument,
        }
    }
}

impl From<DocumentPrimitive> for Primitive {
    fn from(value: DocumentPrimitive) -> Self {
        Primitive::Document(value)
    }
}

impl From<WirePrimitive> for Primitive {
    fn from(value: WirePrimitive) -> Self {
        Primitive::Wire(value)
    }
}

/// Wire bytes as standard base64 text in JSON.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn variants_fix_their_kind() {
        let doc = DocumentPrimitive::String {
            ty: StringType::Code,
            value: "final".into(),
        };
        assert_eq!(doc.kind(), SemanticKind::StringLike(StringType::Code));

        let wire = WirePrimitive::Time(WireTime {
            value_us: 0,
            precision: 1,
        });
        assert_eq!(wire.kind(), SemanticKind::TimeOfDay);
        assert_eq!(Primitive::from(wire).direction(), Direction::ToDocument);
    }

    #[test]
    fn literals_parse_per_kind() {
        let kind = SemanticKind::from_fhir_type("positiveInt").unwrap();
        assert_eq!(
            DocumentPrimitive::from_literal(kind, "12").unwrap(),
            DocumentPrimitive::Integer {
                ty: IntegerType::PositiveInt,
                value: 12
            }
        );
        assert_eq!(
            DocumentPrimitive::from_literal(SemanticKind::Boolean, "yes"),
            Err(Error::MalformedLiteral {
                kind: SemanticKind::Boolean,
                literal: "yes".into()
            })
        );
        assert!(DocumentPrimitive::from_literal(kind, "99999999999").is_err());

        let date = DocumentPrimitive::from_literal(
            SemanticKind::Temporal(TemporalKind::Date),
            "2021-07",
        )
        .unwrap();
        assert_eq!(date.to_literal().unwrap(), "2021-07");
    }

    #[test]
    fn wire_json_shape() {
        let wire = WirePrimitive::Temporal {
            kind: TemporalKind::DateTime,
            value: WireTemporal {
                value_us: 1_000_000,
                timezone: Some("+05:00".into()),
                precision: 4,
            },
        };
        assert_eq!(
            serde_json::to_value(&wire).unwrap(),
            json!({
                "temporal": {
                    "kind": "dateTime",
                    "valueUs": 1_000_000,
                    "timezone": "+05:00",
                    "precision": 4
                }
            })
        );

        let integer = WirePrimitive::Integer {
            ty: IntegerType::PositiveInt,
            value: 7,
        };
        assert_eq!(
            serde_json::to_value(&integer).unwrap(),
            json!({ "integer": { "type": "positiveInt", "value": 7 } })
        );
    }

    #[test]
    fn wire_bytes_are_base64_in_json() {
        let wire = WirePrimitive::Base64Binary(b"abc".to_vec());
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json, json!({ "base64Binary": "YWJj" }));
        let back: WirePrimitive = serde_json::from_value(json).unwrap();
        assert_eq!(back, wire);
    }
}

//! Tagged values flowing out of field generators.
//!
//! A [`GenValue`] pairs a rendering kind with a raw textual payload. The kind
//! decides how the payload lands in an output document (scalar, number,
//! sequence, mapping); the generator core treats the payload as opaque text.
//! [`ValueKind::Nil`] is reserved for the exhaustion sentinel: no generator
//! may be configured to produce it as a legitimate value.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a payload renders into the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    /// Reserved for the exhaustion sentinel.
    Nil,
    /// Plain string scalar.
    String,
    /// Signed 64-bit integer scalar.
    Integer,
    /// JSON array payload, rendered as a sequence.
    List,
    /// JSON object payload, rendered as a mapping.
    Struct,
    /// Arbitrary JSON payload, rendered as the equivalent YAML.
    Json,
    /// An address drawn from a network range.
    IpPrefix,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::List => write!(f, "list"),
            Self::Struct => write!(f, "struct"),
            Self::Json => write!(f, "json"),
            Self::IpPrefix => write!(f, "ip-prefix"),
        }
    }
}

/// A single generated datum — a kind tag plus raw textual payload.
///
/// Equality is structural: two values are equal iff kind and payload both
/// match. The exhaustion sentinel is the one `Nil`-kinded value; compare
/// against it with [`GenValue::is_nil`] rather than against an empty payload,
/// which a legitimate string value may also carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenValue {
    /// Rendering kind.
    pub kind: ValueKind,

    /// Raw textual payload, interpreted per `kind` at render time.
    pub payload: String,
}

impl GenValue {
    /// The exhaustion sentinel.
    pub fn nil() -> Self {
        Self {
            kind: ValueKind::Nil,
            payload: String::new(),
        }
    }

    /// A value of the given kind. The reserved `Nil` kind is rejected.
    pub fn new(kind: ValueKind, payload: impl Into<String>) -> Result<Self, String> {
        if kind == ValueKind::Nil {
            return Err("kind 'nil' is reserved for the exhaustion sentinel".to_string());
        }
        Ok(Self {
            kind,
            payload: payload.into(),
        })
    }

    /// A plain string value.
    pub fn string(payload: impl Into<String>) -> Self {
        Self {
            kind: ValueKind::String,
            payload: payload.into(),
        }
    }

    /// An address value.
    pub fn ip_prefix(payload: impl Into<String>) -> Self {
        Self {
            kind: ValueKind::IpPrefix,
            payload: payload.into(),
        }
    }

    /// True when this value is the exhaustion sentinel.
    pub fn is_nil(&self) -> bool {
        self.kind == ValueKind::Nil
    }
}

//! Configuration types for crisol.yaml.
//!
//! Defines the YAML schema for the target resource identity, the per-field
//! generator declarations, and the output policy. All types derive
//! Serialize/Deserialize for YAML roundtripping and JsonSchema for the
//! `crisol schema` command.

use super::value::ValueKind;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Top-level crisol.yaml
// ============================================================================

/// Root configuration — the target resource plus one generator per field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CrisolConfig {
    /// Schema version (must be "1.0")
    pub version: String,

    /// Identity of the custom resources the generated manifests instantiate
    pub target: TargetSpec,

    /// Field generators, keyed by spec field name (order-preserving)
    #[serde(default)]
    pub fields: IndexMap<String, FieldSpec>,

    /// Output policy
    #[serde(default)]
    pub output: OutputSpec,
}

// ============================================================================
// Target
// ============================================================================

/// Identity stamped into every generated manifest.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TargetSpec {
    /// apiVersion of the generated manifests (e.g. "node.example.com/v1")
    pub api_version: String,

    /// Kind of the generated manifests
    pub kind: String,

    /// Namespace stamped into metadata
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Optional CRD document (path relative to the config file); when set,
    /// configured fields the schema does not recognize are dropped
    #[serde(default)]
    pub schema: Option<String>,

    /// CRD version to read the schema from (required when schema is set)
    #[serde(default)]
    pub schema_version: Option<String>,
}

fn default_namespace() -> String {
    "default".to_string()
}

// ============================================================================
// Fields
// ============================================================================

/// One field's generator declaration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FieldSpec {
    /// Generator type
    #[serde(rename = "type")]
    pub generator: GeneratorType,

    // -- Repeat fields --
    /// Literal payload
    #[serde(default)]
    pub value: Option<String>,

    /// Rendering kind for the payload
    #[serde(default = "default_kind")]
    pub kind: ValueKind,

    /// Values per cycle
    #[serde(default = "default_count")]
    pub count: u32,

    // -- Cidr fields --
    /// CIDR block to enumerate
    #[serde(default)]
    pub subnet: Option<String>,
}

fn default_kind() -> ValueKind {
    ValueKind::String
}

fn default_count() -> u32 {
    1
}

/// Generator type enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorType {
    Repeat,
    Cidr,
}

impl fmt::Display for GeneratorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repeat => write!(f, "repeat"),
            Self::Cidr => write!(f, "cidr"),
        }
    }
}

// ============================================================================
// Output
// ============================================================================

/// Where manifests are written.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OutputSpec {
    /// Directory manifests are written into
    #[serde(default = "default_dir")]
    pub dir: String,
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}

fn default_dir() -> String {
    "manifests".to_string()
}

// ============================================================================
// Tests
// ============================================================================

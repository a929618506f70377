//! Render records into custom-resource manifests.
//!
//! Each record becomes one manifest: the target identity plus a spec
//! mapping with every field's value rendered per its kind.

use crate::core::composer::Record;
use crate::core::types::TargetSpec;
use crate::core::value::{GenValue, ValueKind};
use indexmap::IndexMap;
use serde::Serialize;

/// A generated custom-resource manifest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
    pub spec: IndexMap<String, serde_yaml_ng::Value>,
}

/// Manifest metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub name: String,
    pub namespace: String,
}

/// The manifest name for the `seq`-th record (1-based).
pub fn manifest_name(kind: &str, seq: u64) -> String {
    format!("{}-crisol-{}", kind.to_lowercase(), seq)
}

/// Render one record as a manifest.
pub fn render_record(target: &TargetSpec, record: &Record, seq: u64) -> Result<Manifest, String> {
    let mut spec = IndexMap::with_capacity(record.len());
    for (name, value) in record {
        spec.insert(name.clone(), render_value(name, value)?);
    }
    Ok(Manifest {
        api_version: target.api_version.clone(),
        kind: target.kind.clone(),
        metadata: Metadata {
            name: manifest_name(&target.kind, seq),
            namespace: target.namespace.clone(),
        },
        spec,
    })
}

/// Render a single value per its kind.
///
/// A sentinel slot renders as null: a record seeded from an already-empty
/// generator keeps its degenerate slot rather than dropping the field.
pub fn render_value(field: &str, value: &GenValue) -> Result<serde_yaml_ng::Value, String> {
    match value.kind {
        ValueKind::Nil => Ok(serde_yaml_ng::Value::Null),
        ValueKind::String | ValueKind::IpPrefix => {
            Ok(serde_yaml_ng::Value::String(value.payload.clone()))
        }
        ValueKind::Integer => {
            let n: i64 = value.payload.parse().map_err(|e| {
                format!(
                    "field '{}': integer payload '{}': {}",
                    field, value.payload, e
                )
            })?;
            Ok(serde_yaml_ng::Value::Number(n.into()))
        }
        ValueKind::List | ValueKind::Struct | ValueKind::Json => {
            let json: serde_json::Value = serde_json::from_str(&value.payload)
                .map_err(|e| format!("field '{}': payload is not valid JSON: {}", field, e))?;
            serde_yaml_ng::to_value(&json)
                .map_err(|e| format!("field '{}': cannot render payload: {}", field, e))
        }
    }
}

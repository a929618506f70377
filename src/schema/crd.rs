//! Minimal model of an apiextensions.k8s.io/v1 CustomResourceDefinition
//! document — just enough to discover which spec fields a version accepts.
//!
//! Unknown parts of the document are ignored on deserialization; only the
//! names and the per-version openAPIV3Schema property tree are read.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// A CRD document, as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct CrdDocument {
    pub spec: CrdSpec,
}

/// The CRD spec — names plus the served versions.
#[derive(Debug, Clone, Deserialize)]
pub struct CrdSpec {
    #[serde(default)]
    pub names: CrdNames,

    #[serde(default)]
    pub versions: Vec<CrdVersion>,
}

/// Resource naming block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrdNames {
    #[serde(default)]
    pub kind: String,
}

/// One served version of the resource.
#[derive(Debug, Clone, Deserialize)]
pub struct CrdVersion {
    pub name: String,

    #[serde(default)]
    pub schema: Option<CrdValidation>,
}

/// Per-version validation block.
#[derive(Debug, Clone, Deserialize)]
pub struct CrdValidation {
    #[serde(rename = "openAPIV3Schema")]
    pub open_api_v3_schema: Option<SchemaProps>,
}

/// One node of an OpenAPI v3 schema tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaProps {
    #[serde(rename = "type", default)]
    pub schema_type: Option<String>,

    #[serde(default)]
    pub properties: IndexMap<String, SchemaProps>,
}

/// Load a CRD document from a YAML file.
pub fn load_crd(path: &Path) -> Result<CrdDocument, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read CRD {}: {}", path.display(), e))?;
    serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("invalid CRD document {}: {}", path.display(), e))
}

/// The spec-level property names a CRD version accepts.
///
/// Selecting a version the document does not carry is an error naming the
/// versions it does. A version without a schema (or without a `spec`
/// property) accepts no fields.
pub fn spec_field_names(crd: &CrdDocument, version: &str) -> Result<Vec<String>, String> {
    let mut valid_versions = Vec::new();
    for ver in &crd.spec.versions {
        if ver.name != version {
            valid_versions.push(ver.name.clone());
            continue;
        }
        let spec_props = ver
            .schema
            .as_ref()
            .and_then(|s| s.open_api_v3_schema.as_ref())
            .and_then(|root| root.properties.get("spec"));
        return Ok(spec_props
            .map(|spec| spec.properties.keys().cloned().collect())
            .unwrap_or_default());
    }
    Err(format!(
        "CRD does not have version '{}', available versions: {:?}",
        version, valid_versions
    ))
}

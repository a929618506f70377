//! Restrict configured fields to those a CRD schema recognizes.

use crate::core::types::FieldSpec;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

/// Drop fields the schema does not know about, preserving the order of the
/// rest.
///
/// Runs strictly before the composer is built; a dropped field is logged
/// and never enumerated.
pub fn filter_fields(
    fields: IndexMap<String, FieldSpec>,
    legal: &FxHashSet<String>,
) -> IndexMap<String, FieldSpec> {
    let mut kept = IndexMap::with_capacity(fields.len());
    for (name, spec) in fields {
        if legal.contains(&name) {
            kept.insert(name, spec);
        } else {
            tracing::warn!("field '{}' not found in CRD schema, skipping", name);
        }
    }
    kept
}

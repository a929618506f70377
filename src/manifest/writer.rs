//! Manifest file output — one YAML document per record.

use super::render::Manifest;
use std::path::{Path, PathBuf};

/// Write a manifest to `{dir}/{name}.yaml` atomically (temp file + rename).
pub fn write_manifest(dir: &Path, manifest: &Manifest) -> Result<PathBuf, String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("cannot create dir {}: {}", dir.display(), e))?;

    let path = dir.join(format!("{}.yaml", manifest.metadata.name));
    let yaml = serde_yaml_ng::to_string(manifest).map_err(|e| format!("serialize error: {}", e))?;

    let tmp_path = path.with_extension("yaml.tmp");
    std::fs::write(&tmp_path, &yaml)
        .map_err(|e| format!("cannot write {}: {}", tmp_path.display(), e))?;
    std::fs::rename(&tmp_path, &path).map_err(|e| {
        format!(
            "cannot rename {} → {}: {}",
            tmp_path.display(),
            path.display(),
            e
        )
    })?;

    Ok(path)
}

use crate::CoreError;
use podcompose_schema::PodManifest;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Serialize `manifest` as JSON and atomically replace `path` with it.
///
/// The manifest is written to a temporary file next to `path` and renamed
/// into place, so readers see either the previous manifest or the new one.
pub fn write_pod_manifest(manifest: &PodManifest, path: &Path) -> Result<(), CoreError> {
    let mut content = serde_json::to_string_pretty(manifest)?;
    content.push('\n');

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| CoreError::Io(e.error))?;
    // Fsync parent directory to make the rename durable.
    if let Ok(f) = std::fs::File::open(dir) {
        let _ = f.sync_all();
    }
    Ok(())
}

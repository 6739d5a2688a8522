use std::path::Path;
use std::time::SystemTime;

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Whether the manifest at `manifest_path` must be regenerated from the
/// compose file: true if either file is missing or the compose file was
/// modified after the manifest.
pub fn prepare_needed(compose_path: &Path, manifest_path: &Path) -> bool {
    match (modified(compose_path), modified(manifest_path)) {
        (Some(compose), Some(manifest)) => compose > manifest,
        _ => true,
    }
}

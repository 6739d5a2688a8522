use crate::RuntimeError;
use podcompose_schema::{VolumeSpec, HOST_VOLUME_KIND};
use std::path::Path;
use tracing::{debug, info};

const RELATIVE_PREFIX: &str = "./";

/// Normalize pod volumes and make sure host directories exist.
///
/// Empty kinds become `host`. Relative host sources, with or without a
/// leading `./`, are resolved against `base_dir`, and missing host
/// directories are created (including parents). Other kinds are returned
/// unchanged.
pub fn provision_volumes(
    volumes: &[VolumeSpec],
    base_dir: &Path,
) -> Result<Vec<VolumeSpec>, RuntimeError> {
    volumes
        .iter()
        .map(|volume| provision_volume(volume, base_dir))
        .collect()
}

fn provision_volume(volume: &VolumeSpec, base_dir: &Path) -> Result<VolumeSpec, RuntimeError> {
    let mut volume = volume.clone();
    if volume.kind.is_empty() {
        HOST_VOLUME_KIND.clone_into(&mut volume.kind);
    }
    if !volume.is_host() {
        return Ok(volume);
    }

    if volume.source.is_empty() {
        return Err(RuntimeError::EmptyHostSource(volume.name.to_string()));
    }

    let path = match volume.source.strip_prefix(RELATIVE_PREFIX) {
        Some("") => base_dir.to_path_buf(),
        Some(rest) => base_dir.join(rest),
        // Absolute sources replace `base_dir` entirely.
        None => base_dir.join(&volume.source),
    };

    if path.exists() {
        debug!("volume '{}': {} exists", volume.name, path.display());
    } else {
        info!("creating host directory {} for volume '{}'", path.display(), volume.name);
        std::fs::create_dir_all(&path).map_err(|source| RuntimeError::VolumeProvision {
            volume: volume.name.to_string(),
            path: path.clone(),
            source,
        })?;
    }

    volume.source = path.to_string_lossy().into_owned();
    Ok(volume)
}

#[cfg(test)]
mod tests {
    use super::*;
    use podcompose_schema::AcName;

    fn volume(name: &str, kind: &str, source: &str) -> VolumeSpec {
        VolumeSpec {
            name: AcName::parse(name).unwrap(),
            kind: kind.to_owned(),
            source: source.to_owned(),
            read_only: None,
            recursive: None,
            mode: None,
            uid: None,
            gid: None,
        }
    }

    #[test]
    fn empty_kind_becomes_host() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("data");
        let out = provision_volumes(
            &[volume("data", "", &source.to_string_lossy())],
            dir.path(),
        )
        .unwrap();
        assert_eq!(out[0].kind, "host");
        assert!(source.is_dir());
    }

    #[test]
    fn relative_source_resolved_against_base() {
        let dir = tempfile::tempdir().unwrap();
        let out = provision_volumes(&[volume("logs", "host", "./var/logs")], dir.path()).unwrap();
        let expected = dir.path().join("var/logs");
        assert_eq!(out[0].source, expected.to_string_lossy());
        assert!(expected.is_dir());
    }

    #[test]
    fn dot_slash_alone_is_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = provision_volumes(&[volume("here", "host", "./")], dir.path()).unwrap();
        assert_eq!(out[0].source, dir.path().to_string_lossy());
    }

    #[test]
    fn provisioning_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let volumes = [volume("data", "host", "./data")];
        let first = provision_volumes(&volumes, dir.path()).unwrap();
        let second = provision_volumes(&volumes, dir.path()).unwrap();
        assert_eq!(first, second);
        assert!(dir.path().join("data").is_dir());
    }

    #[test]
    fn existing_file_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("socket");
        std::fs::write(&file, b"").unwrap();
        let out =
            provision_volumes(&[volume("sock", "host", &file.to_string_lossy())], dir.path())
                .unwrap();
        assert!(file.is_file());
        assert_eq!(out[0].source, file.to_string_lossy());
    }

    #[test]
    fn non_host_kinds_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        let input = volume("scratch", "empty", "./never-created");
        let out = provision_volumes(std::slice::from_ref(&input), dir.path()).unwrap();
        assert_eq!(out[0], input);
        assert!(!dir.path().join("never-created").exists());
    }

    #[test]
    fn host_volume_without_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = provision_volumes(&[volume("data", "", "")], dir.path()).unwrap_err();
        assert!(matches!(err, RuntimeError::EmptyHostSource(_)));
    }

    #[cfg(unix)]
    #[test]
    fn uncreatable_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let err = provision_volumes(&[volume("data", "host", "./file/sub")], dir.path())
            .unwrap_err();
        assert!(matches!(err, RuntimeError::VolumeProvision { .. }));
    }

    #[test]
    fn bare_relative_source_resolved_against_base() {
        let dir = tempfile::tempdir().unwrap();
        let out = provision_volumes(
            &[
                volume("plain", "host", "data"),
                volume("dotted", "host", "./data"),
            ],
            dir.path(),
        )
        .unwrap();
        let expected = dir.path().join("data");
        assert_eq!(out[0].source, expected.to_string_lossy());
        assert_eq!(out[0].source, out[1].source);
        assert!(expected.is_dir());
    }

    #[test]
    fn absolute_source_ignores_base() {
        let base = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let source = other.path().join("abs");
        let out = provision_volumes(
            &[volume("abs", "host", &source.to_string_lossy())],
            base.path(),
        )
        .unwrap();
        assert_eq!(out[0].source, source.to_string_lossy());
        assert!(source.is_dir());
        assert!(!base.path().join("abs").exists());
    }
}

//! Host-side collaborators for podcompose.
//!
//! This crate owns everything that touches processes or the host filesystem:
//! the `ImageFetcher` capability (backed by `rkt fetch`, or a deterministic mock),
//! image resolution over a compose spec, host volume provisioning, the
//! `rkt run` argument list, and thin wrappers around `systemd-run`, `systemctl`
//! and `journalctl`.

pub mod fetch;
pub mod journal;
pub mod launch;
pub mod mock;
pub mod process;
pub mod rkt;
pub mod unit;
pub mod volume;

pub use fetch::{parse_image_id, resolve_images, ImageFetcher};
pub use journal::{journal_args, read_pod_uuid, show_logs};
pub use launch::{RunArgs, POD_UUID_FILE};
pub use mock::{FetchCall, MockFetcher};
pub use rkt::Rkt;
pub use unit::{ServiceUnit, SYSTEMCTL, SYSTEMD_RUN};
pub use volume::provision_volumes;

use podcompose_schema::IdentifierError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to fetch image '{locator}': {reason}")]
    FetchFailed { locator: String, reason: String },
    #[error("fetching '{locator}' returned an invalid image id '{output}': {source}")]
    InvalidImageId {
        locator: String,
        output: String,
        #[source]
        source: IdentifierError,
    },
    #[error("host volume '{0}' has no source path")]
    EmptyHostSource(String),
    #[error("failed to create directory for volume '{volume}' at {}: {source}", .path.display())]
    VolumeProvision {
        volume: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("runtime execution failed: {0}")]
    ExecFailed(String),
    #[error("pod uuid file {} not found; has the pod been run?", .0.display())]
    MissingPodUuid(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_names_locator() {
        let e = RuntimeError::FetchFailed {
            locator: "docker://redis".to_owned(),
            reason: "exit status: 1".to_owned(),
        };
        let msg = e.to_string();
        assert!(msg.contains("docker://redis"));
        assert!(msg.contains("exit status: 1"));
    }

    #[test]
    fn missing_uuid_mentions_path() {
        let e = RuntimeError::MissingPodUuid(PathBuf::from("/srv/pod/.pod-uuid"));
        assert!(e.to_string().contains("/srv/pod/.pod-uuid"));
    }
}

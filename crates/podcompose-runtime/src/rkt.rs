use crate::fetch::ImageFetcher;
use crate::process::{command_exists, run_inherited};
use crate::RuntimeError;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::info;

pub const DEFAULT_RKT_BINARY: &str = "rkt";

/// Flag that lets `rkt fetch` accept images without a verifiable signature.
pub const INSECURE_IMAGE_FLAG: &str = "--insecure-options=image";

/// The `rkt` command line tool.
#[derive(Debug, Clone)]
pub struct Rkt {
    binary: PathBuf,
}

impl Default for Rkt {
    fn default() -> Self {
        Self::new(DEFAULT_RKT_BINARY)
    }
}

impl Rkt {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Whether the binary can be launched at all.
    pub fn available(&self) -> bool {
        command_exists(self.binary.as_os_str())
    }

    /// Arguments for `rkt fetch`.
    pub fn fetch_args(locator: &str, insecure: bool) -> Vec<String> {
        let mut args = vec!["fetch".to_owned()];
        if insecure {
            args.push(INSECURE_IMAGE_FLAG.to_owned());
        }
        args.push(locator.to_owned());
        args
    }

    /// Launch `rkt` with a prepared argument list (see [`crate::RunArgs`]),
    /// blocking until the pod exits.
    pub fn run(&self, args: &[String]) -> Result<(), RuntimeError> {
        info!("starting pod...");
        run_inherited(self.binary.as_os_str(), args)
    }
}

impl ImageFetcher for Rkt {
    fn fetch(&self, locator: &str, insecure: bool) -> Result<String, RuntimeError> {
        let output = Command::new(&self.binary)
            .args(Self::fetch_args(locator, insecure))
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| RuntimeError::FetchFailed {
                locator: locator.to_owned(),
                reason: format!("failed to execute {}: {e}", self.binary.display()),
            })?;

        if !output.status.success() {
            return Err(RuntimeError::FetchFailed {
                locator: locator.to_owned(),
                reason: format!("{} fetch exited with {}", self.binary.display(), output.status),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_args_secure() {
        assert_eq!(
            Rkt::fetch_args("quay.io/coreos/etcd,version=v3", false),
            vec!["fetch", "quay.io/coreos/etcd,version=v3"]
        );
    }

    #[test]
    fn fetch_args_insecure() {
        assert_eq!(
            Rkt::fetch_args("docker://redis", true),
            vec!["fetch", "--insecure-options=image", "docker://redis"]
        );
    }

    #[test]
    fn default_binary_is_rkt() {
        assert_eq!(Rkt::default().binary(), Path::new("rkt"));
    }

    #[test]
    fn missing_binary_is_fetch_error() {
        let rkt = Rkt::new("/nonexistent/podcompose-test/rkt");
        assert!(!rkt.available());
        let err = rkt.fetch("example.com/app", false).unwrap_err();
        assert!(matches!(err, RuntimeError::FetchFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_fetch_error() {
        let rkt = Rkt::new("false");
        let err = rkt.fetch("example.com/app", false).unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }
}

use crate::process::run_inherited;
use crate::RuntimeError;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};

pub const SYSTEMD_RUN: &str = "systemd-run";
pub const SYSTEMCTL: &str = "systemctl";

/// A transient systemd service wrapping `rkt run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUnit {
    name: String,
}

impl ServiceUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn service(&self) -> String {
        format!("{}.service", self.name)
    }

    /// `systemd-run` arguments launching `rkt` with `run_args` under this unit.
    pub fn start_args(&self, rkt: &Path, run_args: &[String]) -> Vec<String> {
        let mut args = vec![
            format!("--unit={}", self.name),
            rkt.to_string_lossy().into_owned(),
        ];
        args.extend(run_args.iter().cloned());
        args
    }

    /// `systemctl` arguments for `verb` (`stop`, `status`, ...) on this unit.
    pub fn systemctl_args(&self, verb: &str) -> Vec<String> {
        vec![verb.to_owned(), self.service()]
    }

    pub fn start(&self, rkt: &Path, run_args: &[String]) -> Result<(), RuntimeError> {
        info!("starting unit {}...", self.service());
        run_inherited(OsStr::new(SYSTEMD_RUN), &self.start_args(rkt, run_args))
    }

    /// Stop the unit and clear its failed state. Best-effort: failures are
    /// logged, never returned.
    pub fn stop(&self) {
        for verb in ["stop", "reset-failed"] {
            if let Err(e) = run_inherited(OsStr::new(SYSTEMCTL), &self.systemctl_args(verb)) {
                warn!("systemctl {verb} {}: {e}", self.service());
            }
        }
    }

    pub fn restart(&self) -> Result<(), RuntimeError> {
        run_inherited(OsStr::new(SYSTEMCTL), &self.systemctl_args("restart"))
    }

    pub fn status(&self) -> Result<(), RuntimeError> {
        run_inherited(OsStr::new(SYSTEMCTL), &self.systemctl_args("status"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_wraps_rkt_run() {
        let unit = ServiceUnit::new("blog");
        let run_args = vec!["run".to_owned(), "--net=default".to_owned()];
        assert_eq!(
            unit.start_args(Path::new("/usr/bin/rkt"), &run_args),
            vec!["--unit=blog", "/usr/bin/rkt", "run", "--net=default"]
        );
    }

    #[test]
    fn systemctl_targets_service() {
        let unit = ServiceUnit::new("blog");
        assert_eq!(unit.service(), "blog.service");
        assert_eq!(unit.systemctl_args("stop"), vec!["stop", "blog.service"]);
        assert_eq!(
            unit.systemctl_args("reset-failed"),
            vec!["reset-failed", "blog.service"]
        );
    }
}

use std::path::{Path, PathBuf};

/// Sidecar file `rkt run` writes the pod UUID into.
pub const POD_UUID_FILE: &str = ".pod-uuid";

/// Inputs for the `rkt run` argument list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    pub manifest: PathBuf,
    /// Comma-joined network names.
    pub networks: String,
    pub interactive: bool,
    pub verbose: bool,
    /// Passed through after all generated arguments.
    pub extra: Vec<String>,
}

impl RunArgs {
    /// Build the argument list, resolving the manifest and UUID file paths
    /// against `cwd`. Performs no I/O.
    pub fn to_args(&self, cwd: &Path) -> Vec<String> {
        let manifest = cwd.join(&self.manifest);
        let uuid_file = cwd.join(POD_UUID_FILE);

        let mut args = vec![
            "run".to_owned(),
            format!("--pod-manifest={}", manifest.display()),
            format!("--net={}", self.networks),
            format!("--uuid-file-save={}", uuid_file.display()),
        ];
        if self.interactive {
            args.push("--interactive".to_owned());
        }
        if self.verbose {
            args.push("--debug".to_owned());
        }
        args.extend(self.extra.iter().cloned());
        args
    }
}

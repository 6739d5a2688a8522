//! Blocking process execution helpers.

use crate::RuntimeError;
use std::ffi::OsStr;
use std::process::{Command, Stdio};
use tracing::debug;

/// Run `program` with the caller's stdin, stdout and stderr. Blocks until it
/// exits; a non-zero exit is an error.
pub fn run_inherited<S: AsRef<OsStr>>(program: &OsStr, args: &[S]) -> Result<(), RuntimeError> {
    let program_name = program.to_string_lossy();
    debug!("exec {program_name} ({} args)", args.len());
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| RuntimeError::ExecFailed(format!("failed to execute {program_name}: {e}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(RuntimeError::ExecFailed(format!("{program_name} exited with {status}")))
    }
}

/// Whether `program` can be spawned at all.
pub fn command_exists(program: &OsStr) -> bool {
    Command::new(program)
        .arg("version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

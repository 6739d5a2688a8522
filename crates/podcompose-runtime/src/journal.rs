use crate::launch::POD_UUID_FILE;
use crate::process::run_inherited;
use crate::RuntimeError;
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::Path;

pub const JOURNALCTL: &str = "journalctl";

/// Read the UUID `rkt run` saved in `dir`.
pub fn read_pod_uuid(dir: &Path) -> Result<String, RuntimeError> {
    let path = dir.join(POD_UUID_FILE);
    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(content.trim().to_owned()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(RuntimeError::MissingPodUuid(path)),
        Err(e) => Err(RuntimeError::Io(e)),
    }
}

/// `journalctl` arguments selecting the pod's machine, followed by `extra`.
pub fn journal_args(uuid: &str, extra: &[String]) -> Vec<String> {
    let mut args = vec!["-M".to_owned(), format!("rkt-{uuid}")];
    args.extend(extra.iter().cloned());
    args
}

/// Show the journal of the pod last run from `dir`.
pub fn show_logs(dir: &Path, extra: &[String]) -> Result<(), RuntimeError> {
    let uuid = read_pod_uuid(dir)?;
    run_inherited(OsStr::new(JOURNALCTL), &journal_args(&uuid, extra))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_and_trims_uuid() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(POD_UUID_FILE), "0a1b2c3d-aaaa\n").unwrap();
        assert_eq!(read_pod_uuid(dir.path()).unwrap(), "0a1b2c3d-aaaa");
    }

    #[test]
    fn missing_uuid_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_pod_uuid(dir.path()).unwrap_err();
        assert!(matches!(err, RuntimeError::MissingPodUuid(_)));
        assert!(show_logs(dir.path(), &[]).is_err());
    }

    #[test]
    fn machine_selector_precedes_extra() {
        let extra = vec!["-f".to_owned(), "-n".to_owned(), "50".to_owned()];
        assert_eq!(
            journal_args("0a1b", &extra),
            vec!["-M", "rkt-0a1b", "-f", "-n", "50"]
        );
    }
}

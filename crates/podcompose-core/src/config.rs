use crate::CoreError;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_COMPOSE_FILE: &str = "podcompose.yaml";
pub const DEFAULT_MANIFEST_FILE: &str = ".pod-manifest.json";
const CONFIG_FILE_NAME: &str = ".podcompose.yaml";

/// User defaults, read from `~/.podcompose.yaml` or an explicit `--config`.
/// Command-line flags and environment variables take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub file: PathBuf,
    pub manifest: PathBuf,
    pub rkt: PathBuf,
    pub verbose: bool,
    pub strict_image_names: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_COMPOSE_FILE),
            manifest: PathBuf::from(DEFAULT_MANIFEST_FILE),
            rkt: PathBuf::from(podcompose_runtime::rkt::DEFAULT_RKT_BINARY),
            verbose: false,
            strict_image_names: false,
        }
    }
}

impl Config {
    /// Load config from `~/.podcompose.yaml`. A missing file or unset `HOME`
    /// yields the defaults; a malformed file is an error.
    pub fn load_default() -> Result<Self, CoreError> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content, &path),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(CoreError::Io(e)),
        }
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, CoreError> {
        // An empty file deserializes to YAML null.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| CoreError::Config(format!("invalid config {}: {e}", path.display())))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
}

use crate::isolator::Isolator;
use crate::pod::{
    Annotation, AppSpec, ExposedPort, Label, Mount, UserAnnotations, UserLabels, VolumeSpec,
};
use crate::types::{AcName, ImageId};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Network joined when a compose file names none.
pub const DEFAULT_NETWORK: &str = "default";

/// Locator prefix for images pulled from a Docker registry. rkt cannot verify
/// these by signature, so fetching them needs `--insecure-options=image`.
pub const DOCKER_LOCATOR_PREFIX: &str = "docker://";

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("failed to read compose file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse compose file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// User-authored pod description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComposeSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub cpu: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub memory: Option<String>,
    #[serde(default)]
    pub networks: Vec<String>,
    #[serde(default)]
    pub extra: Vec<String>,
    #[serde(default)]
    pub manifest: ManifestSpec,
}

/// The simplified pod manifest embedded in a compose file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestSpec {
    #[serde(default)]
    pub apps: Vec<RuntimeAppSpec>,
    #[serde(default)]
    pub volumes: Vec<VolumeSpec>,
    #[serde(default)]
    pub isolators: Vec<Isolator>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub ports: Vec<ExposedPort>,
    #[serde(default)]
    pub user_annotations: UserAnnotations,
    #[serde(default)]
    pub user_labels: UserLabels,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeAppSpec {
    pub name: AcName,
    pub image: ImageRef,
    #[serde(default)]
    pub app: Option<AppSpec>,
    #[serde(default, rename = "readOnlyRootFS")]
    pub read_only_root_fs: bool,
    #[serde(default)]
    pub mounts: Vec<Mount>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// Image reference as written by the user. `id` is unset until the image is
/// fetched, unless the user pinned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub name: String,
    #[serde(
        default,
        deserialize_with = "non_empty_image_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ImageId>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl ImageRef {
    /// Fetch locator: the image name followed by `,name=value` for each label,
    /// in declaration order.
    pub fn locator(&self) -> String {
        let mut locator = self.name.clone();
        for label in &self.labels {
            locator.push(',');
            locator.push_str(&label.name);
            locator.push('=');
            locator.push_str(&label.value);
        }
        locator
    }
}

/// Whether fetching `locator` must skip image signature verification.
pub fn requires_insecure_fetch(locator: &str) -> bool {
    locator.starts_with(DOCKER_LOCATOR_PREFIX)
}

impl ComposeSpec {
    pub fn cpu_limit(&self) -> Option<&str> {
        self.cpu.as_deref()
    }

    pub fn memory_limit(&self) -> Option<&str> {
        self.memory.as_deref()
    }

    /// Networks joined with `,` as `rkt run --net=` expects them.
    pub fn network_arg(&self) -> String {
        self.networks.join(",")
    }
}

pub fn parse_compose_str(input: &str) -> Result<ComposeSpec, SpecError> {
    let mut spec: ComposeSpec = serde_yaml::from_str(input)?;
    if spec.networks.is_empty() {
        spec.networks = vec![DEFAULT_NETWORK.to_owned()];
    }
    Ok(spec)
}

pub fn parse_compose_file(path: impl AsRef<Path>) -> Result<ComposeSpec, SpecError> {
    let content = fs::read_to_string(path)?;
    parse_compose_str(&content)
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn non_empty_image_id<'de, D>(deserializer: D) -> Result<Option<ImageId>, D::Error>
where
    D: Deserializer<'de>,
{
    match non_empty_string(deserializer)? {
        Some(s) => ImageId::parse(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

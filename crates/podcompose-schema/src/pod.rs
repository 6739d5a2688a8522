//! appc pod manifest types.
//!
//! The field types below are shared by the compose file (which embeds a
//! simplified manifest) and the rendered [`PodManifest`]. JSON field names follow
//! the appc schema; `omitempty` fields are skipped when empty.

use crate::isolator::Isolator;
use crate::types::{AcIdentifier, AcName, ImageId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind tag of a rendered pod manifest.
pub const POD_MANIFEST_KIND: &str = "PodManifest";

/// appc schema version the rendered manifest declares.
pub const APPC_SPEC_VERSION: &str = "0.8.10";

/// Volume kind backed by a directory on the host.
pub const HOST_VOLUME_KIND: &str = "host";

pub type UserAnnotations = BTreeMap<String, String>;
pub type UserLabels = BTreeMap<String, String>;

/// `{name, value}` pair used for annotations and image labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: AcIdentifier,
    pub value: String,
}

pub type Annotation = NamedValue;
pub type Label = NamedValue;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventHandler {
    pub name: String,
    #[serde(default)]
    pub exec: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountPoint {
    pub name: AcName,
    pub path: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub read_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    pub name: AcName,
    pub protocol: String,
    pub port: u32,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub socket_activated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposedPort {
    pub name: AcName,
    pub host_port: u32,
    #[serde(default, rename = "hostIP", skip_serializing_if = "Option::is_none")]
    pub host_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_port: Option<Port>,
}

/// Binding of a pod volume into an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mount {
    pub volume: AcName,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_volume: Option<VolumeSpec>,
}

/// A pod volume. `kind` may be empty in a compose file; provisioning fills in
/// [`HOST_VOLUME_KIND`] before the manifest is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSpec {
    pub name: AcName,
    #[serde(default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recursive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gid: Option<i64>,
}

impl VolumeSpec {
    pub fn is_host(&self) -> bool {
        self.kind == HOST_VOLUME_KIND
    }
}

/// Executable definition of an app. `exec`, `user` and `group` are always
/// serialized; everything else is omitted when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSpec {
    #[serde(default)]
    pub exec: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event_handlers: Vec<EventHandler>,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub group: String,
    #[serde(
        default,
        rename = "supplementaryGIDs",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub supplementary_gids: Vec<i64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub working_directory: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment: Vec<EnvironmentVariable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mount_points: Vec<MountPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<Port>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub isolators: Vec<Isolator>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub user_annotations: UserAnnotations,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub user_labels: UserLabels,
}

/// The fully-specified manifest handed to `rkt run --pod-manifest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodManifest {
    pub ac_version: String,
    pub ac_kind: String,
    pub apps: Vec<RuntimeApp>,
    pub volumes: Vec<VolumeSpec>,
    pub isolators: Vec<Isolator>,
    pub annotations: Vec<Annotation>,
    pub ports: Vec<ExposedPort>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub user_annotations: UserAnnotations,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub user_labels: UserLabels,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeApp {
    pub name: AcName,
    pub image: RuntimeImage,
    pub app: AppSpec,
    #[serde(
        default,
        rename = "readOnlyRootFS",
        skip_serializing_if = "is_false"
    )]
    pub read_only_root_fs: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mounts: Vec<Mount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeImage {
    /// Omitted when the image name cannot be expressed as an identifier,
    /// e.g. `docker://` locators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<AcIdentifier>,
    pub id: ImageId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(b: &bool) -> bool {
    !*b
}

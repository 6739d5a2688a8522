use crate::compose::RuntimeAppSpec;
use crate::isolator::{Isolator, Resource};
use crate::pod::{PodManifest, RuntimeApp, RuntimeImage, APPC_SPEC_VERSION, POD_MANIFEST_KIND};
use crate::quantity::QuantityError;
use crate::resolve::ResolvedCompose;
use crate::types::{AcIdentifier, IdentifierError};
use thiserror::Error;
use tracing::warn;

/// User and group an app runs as when the compose file leaves them empty.
pub const DEFAULT_APP_USER: &str = "0";
pub const DEFAULT_APP_GROUP: &str = "0";

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid {resource} quantity: {source}")]
    Isolator {
        resource: Resource,
        #[source]
        source: QuantityError,
    },
    #[error("image for app '{0}' has not been resolved")]
    UnresolvedImage(String),
    #[error("image name for app '{app}' is not a valid identifier: {source}")]
    InvalidImageName {
        app: String,
        #[source]
        source: IdentifierError,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Fail on image names that are not valid identifiers instead of
    /// omitting the name.
    pub strict_image_names: bool,
}

impl ResolvedCompose {
    /// Render the appc pod manifest with default options.
    pub fn pod_manifest(&self) -> Result<PodManifest, BuildError> {
        self.pod_manifest_with(RenderOptions::default())
    }

    /// Render the appc pod manifest.
    ///
    /// Pod-level fields are copied through; `resource/cpu` and then
    /// `resource/memory` are appended to the isolators when the compose file
    /// sets `cpu` / `memory`. Apps keep their declaration order.
    pub fn pod_manifest_with(&self, options: RenderOptions) -> Result<PodManifest, BuildError> {
        let spec = self.spec();
        let manifest = &spec.manifest;

        let apps = manifest
            .apps
            .iter()
            .map(|app| render_app(app, options))
            .collect::<Result<Vec<_>, _>>()?;

        let mut isolators = manifest.isolators.clone();
        if let Some(cpu) = spec.cpu_limit() {
            isolators.push(resource_isolator(Resource::Cpu, cpu)?);
        }
        if let Some(memory) = spec.memory_limit() {
            isolators.push(resource_isolator(Resource::Memory, memory)?);
        }

        Ok(PodManifest {
            ac_version: APPC_SPEC_VERSION.to_owned(),
            ac_kind: POD_MANIFEST_KIND.to_owned(),
            apps,
            volumes: manifest.volumes.clone(),
            isolators,
            annotations: manifest.annotations.clone(),
            ports: manifest.ports.clone(),
            user_annotations: manifest.user_annotations.clone(),
            user_labels: manifest.user_labels.clone(),
        })
    }
}

/// Request and limit are the same quantity; distinct values are not supported.
fn resource_isolator(resource: Resource, quantity: &str) -> Result<Isolator, BuildError> {
    Isolator::resource(resource, quantity, quantity)
        .map_err(|source| BuildError::Isolator { resource, source })
}

fn render_app(app: &RuntimeAppSpec, options: RenderOptions) -> Result<RuntimeApp, BuildError> {
    let id = app
        .image
        .id
        .clone()
        .ok_or_else(|| BuildError::UnresolvedImage(app.name.to_string()))?;

    let name = match AcIdentifier::parse(app.image.name.as_str()) {
        Ok(name) => Some(name),
        Err(source) if options.strict_image_names => {
            return Err(BuildError::InvalidImageName {
                app: app.name.to_string(),
                source,
            });
        }
        Err(e) => {
            warn!("app '{}': {e}; omitting image name", app.name);
            None
        }
    };

    let mut definition = app.app.clone().unwrap_or_default();
    if definition.user.is_empty() {
        DEFAULT_APP_USER.clone_into(&mut definition.user);
    }
    if definition.group.is_empty() {
        DEFAULT_APP_GROUP.clone_into(&mut definition.group);
    }

    Ok(RuntimeApp {
        name: app.name.clone(),
        image: RuntimeImage {
            name,
            id,
            labels: app.image.labels.clone(),
        },
        app: definition,
        read_only_root_fs: app.read_only_root_fs,
        mounts: app.mounts.clone(),
        annotations: app.annotations.clone(),
    })
}

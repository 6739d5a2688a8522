//! Compose file parsing, appc types, and pod manifest rendering for podcompose.
//!
//! This crate is the pure part of the tool: YAML compose file loading
//! (`ComposeSpec`), the restricted string types of the appc schema (`AcName`,
//! `AcIdentifier`, `ImageId`), resource quantities and isolators, image
//! resolution into a `ResolvedCompose`, and rendering of the final
//! `PodManifest`. It performs no process or network I/O.

pub mod compose;
pub mod isolator;
pub mod pod;
pub mod quantity;
pub mod render;
pub mod resolve;
pub mod types;

pub use compose::{
    parse_compose_file, parse_compose_str, requires_insecure_fetch, ComposeSpec, ImageRef,
    ManifestSpec, RuntimeAppSpec, SpecError, DEFAULT_NETWORK, DOCKER_LOCATOR_PREFIX,
};
pub use isolator::{Isolator, Resource};
pub use pod::{
    AppSpec, PodManifest, RuntimeApp, RuntimeImage, VolumeSpec, APPC_SPEC_VERSION,
    HOST_VOLUME_KIND, POD_MANIFEST_KIND,
};
pub use quantity::{Quantity, QuantityError};
pub use render::{BuildError, RenderOptions, DEFAULT_APP_GROUP, DEFAULT_APP_USER};
pub use resolve::ResolvedCompose;
pub use types::{AcIdentifier, AcName, IdentifierError, ImageId};

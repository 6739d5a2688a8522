pub mod logs;
pub mod prepare;
pub mod restart;
pub mod run;
pub mod start;
pub mod status;
pub mod stop;

use podcompose_core::{Composer, CoreError, PrepareOutcome};
use podcompose_runtime::{Rkt, ServiceUnit};
use podcompose_schema::{parse_compose_file, ComposeSpec, RenderOptions};
use std::path::{Path, PathBuf};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_SPEC_ERROR: u8 = 2;
pub const EXIT_RUNTIME_ERROR: u8 = 3;

/// Settings resolved from flags, environment and config file.
pub struct Context {
    pub compose: PathBuf,
    pub manifest: PathBuf,
    pub rkt: Rkt,
    pub verbose: bool,
    pub render: RenderOptions,
}

/// Render any error through `CoreError` so its message carries the prefix
/// the exit code mapping keys on.
pub fn core_err(e: impl Into<CoreError>) -> String {
    e.into().to_string()
}

pub fn workdir() -> Result<PathBuf, String> {
    std::env::current_dir().map_err(|e| format!("cannot determine working directory: {e}"))
}

pub fn prepare(ctx: &Context, cwd: &Path, force: bool) -> Result<PrepareOutcome, String> {
    Composer::new(&ctx.rkt, cwd)
        .with_render_options(ctx.render)
        .prepare(&ctx.compose, &ctx.manifest, force)
        .map_err(|e| e.to_string())
}

pub fn load_spec(ctx: &Context) -> Result<ComposeSpec, String> {
    parse_compose_file(&ctx.compose).map_err(core_err)
}

/// The systemd unit named after the pod.
pub fn service_unit(spec: &ComposeSpec) -> Result<ServiceUnit, String> {
    if spec.name.is_empty() {
        return Err(
            "compose error: `name` is required to manage the pod as a systemd unit".to_owned(),
        );
    }
    Ok(ServiceUnit::new(spec.name.as_str()))
}

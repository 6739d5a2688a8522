use crate::freshness::prepare_needed;
use crate::writer::write_pod_manifest;
use crate::CoreError;
use podcompose_runtime::{provision_volumes, resolve_images, ImageFetcher, RunArgs};
use podcompose_schema::{parse_compose_file, ComposeSpec, PodManifest, RenderOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Drives the prepare pipeline: load the compose file, resolve images, set up
/// host volumes, render the pod manifest and write it.
///
/// Relative host volume sources are resolved against `workdir`.
pub struct Composer<'a> {
    fetcher: &'a dyn ImageFetcher,
    workdir: PathBuf,
    options: RenderOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrepareOutcome {
    /// A new manifest was written.
    Written,
    /// The manifest was newer than the compose file and left alone.
    UpToDate,
}

impl<'a> Composer<'a> {
    pub fn new(fetcher: &'a dyn ImageFetcher, workdir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            workdir: workdir.into(),
            options: RenderOptions::default(),
        }
    }

    #[must_use]
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Render the pod manifest for `spec`.
    ///
    /// Images are fetched before any volume is touched, so a failed fetch
    /// leaves the filesystem as it was. `spec` itself is not modified.
    pub fn render(&self, spec: &ComposeSpec) -> Result<PodManifest, CoreError> {
        let resolved = resolve_images(spec, self.fetcher)?;
        debug!("provisioning volumes under {}", self.workdir.display());
        let volumes = provision_volumes(&resolved.spec().manifest.volumes, &self.workdir)?;
        let resolved = resolved.with_volumes(volumes);

        info!("generate pod-manifest...");
        Ok(resolved.pod_manifest_with(self.options)?)
    }

    /// Regenerate `manifest_path` from `compose_path` when the manifest is
    /// missing or older than the compose file, or unconditionally if `force`.
    pub fn prepare(
        &self,
        compose_path: &Path,
        manifest_path: &Path,
        force: bool,
    ) -> Result<PrepareOutcome, CoreError> {
        if !force && !prepare_needed(compose_path, manifest_path) {
            info!("manifest already up to date");
            return Ok(PrepareOutcome::UpToDate);
        }

        let spec = parse_compose_file(compose_path)?;
        let manifest = self.render(&spec)?;
        write_pod_manifest(&manifest, manifest_path)?;
        info!("pod-manifest successfully written");
        Ok(PrepareOutcome::Written)
    }
}

/// `rkt run` inputs for `spec` with the manifest at `manifest_path`.
pub fn run_args(
    spec: &ComposeSpec,
    manifest_path: &Path,
    interactive: bool,
    verbose: bool,
) -> RunArgs {
    RunArgs {
        manifest: manifest_path.to_path_buf(),
        networks: spec.network_arg(),
        interactive,
        verbose,
        extra: spec.extra.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podcompose_runtime::MockFetcher;
    use podcompose_schema::parse_compose_str;

    const SPEC: &str = r#"
name: blog
networks: [default, backend]
extra: ["--dns=8.8.8.8"]
manifest:
  volumes:
    - name: data
      source: ./data
  apps:
    - name: web
      image:
        name: example.com/web
"#;

    #[test]
    fn render_resolves_and_provisions() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = MockFetcher::new().with_default_output("sha512-0102\n");
        let composer = Composer::new(&fetcher, dir.path());

        let spec = parse_compose_str(SPEC).unwrap();
        let manifest = composer.render(&spec).unwrap();

        assert_eq!(manifest.apps[0].image.id.as_str(), "sha512-0102");
        assert_eq!(manifest.volumes[0].kind, "host");
        let data = dir.path().join("data");
        assert_eq!(manifest.volumes[0].source, data.to_string_lossy());
        assert!(data.is_dir());
        // The loaded spec is untouched.
        assert!(spec.manifest.apps[0].image.id.is_none());
        assert!(spec.manifest.volumes[0].kind.is_empty());
    }

    #[test]
    fn fetch_failure_touches_no_volume() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = MockFetcher::new().failing_on("example.com/web");
        let composer = Composer::new(&fetcher, dir.path());

        let spec = parse_compose_str(SPEC).unwrap();
        let err = composer.render(&spec).unwrap_err();
        assert!(matches!(err, CoreError::Runtime(_)));
        assert!(!dir.path().join("data").exists());
    }

    #[test]
    fn strict_names_are_forwarded() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = MockFetcher::new();
        let spec = parse_compose_str(
            "manifest:\n  apps:\n    - name: web\n      image:\n        name: docker://nginx:latest\n",
        )
        .unwrap();

        let lenient = Composer::new(&fetcher, dir.path());
        let manifest = lenient.render(&spec).unwrap();
        assert!(manifest.apps[0].image.name.is_none());

        let strict = Composer::new(&fetcher, dir.path()).with_render_options(RenderOptions {
            strict_image_names: true,
        });
        let err = strict.render(&spec).unwrap_err();
        assert!(matches!(err, CoreError::Build(_)));
    }

    #[test]
    fn run_args_follow_spec() {
        let spec = parse_compose_str(SPEC).unwrap();
        let args = run_args(&spec, Path::new(".pod-manifest.json"), true, false);
        assert_eq!(args.networks, "default,backend");
        assert_eq!(args.extra, vec!["--dns=8.8.8.8"]);
        assert!(args.interactive);
        assert!(!args.verbose);

        let argv = args.to_args(Path::new("/srv/blog"));
        assert_eq!(argv[1], "--pod-manifest=/srv/blog/.pod-manifest.json");
        assert_eq!(argv.last().map(String::as_str), Some("--dns=8.8.8.8"));
    }
}

use crate::compose::{ComposeSpec, RuntimeAppSpec};
use crate::pod::VolumeSpec;
use crate::types::ImageId;

/// A compose spec in which every app carries a content identifier.
///
/// Produced by [`ComposeSpec::resolve_images`]; the loaded spec is left
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCompose {
    spec: ComposeSpec,
}

impl ComposeSpec {
    /// Resolve every unpinned image, in declaration order, through `fetch`.
    ///
    /// Apps that already carry an id are not passed to `fetch`. The first error
    /// stops resolution and is returned as-is.
    pub fn resolve_images<E, F>(&self, mut fetch: F) -> Result<ResolvedCompose, E>
    where
        F: FnMut(&RuntimeAppSpec) -> Result<ImageId, E>,
    {
        let mut spec = self.clone();
        for app in &mut spec.manifest.apps {
            if app.image.id.is_none() {
                let id = fetch(app)?;
                app.image.id = Some(id);
            }
        }
        Ok(ResolvedCompose { spec })
    }
}

impl ResolvedCompose {
    pub fn spec(&self) -> &ComposeSpec {
        &self.spec
    }

    /// Replace the pod volumes, e.g. with their provisioned form.
    #[must_use]
    pub fn with_volumes(mut self, volumes: Vec<VolumeSpec>) -> Self {
        self.spec.manifest.volumes = volumes;
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::compose::parse_compose_str;
    use crate::types::ImageId;

    const TWO_APPS: &str = r"
manifest:
  apps:
    - name: pinned
      image:
        name: example.com/pinned
        id: sha512-aaaa
    - name: loose
      image:
        name: example.com/loose
    - name: other
      image:
        name: example.com/other
";

    #[test]
    fn fetches_only_unpinned_images_in_order() {
        let spec = parse_compose_str(TWO_APPS).unwrap();
        let mut seen = Vec::new();
        let resolved = spec
            .resolve_images(|app| {
                seen.push(app.name.to_string());
                ImageId::parse(format!("sha512-{}", app.name))
            })
            .unwrap();

        assert_eq!(seen, vec!["loose", "other"]);
        let ids: Vec<_> = resolved
            .spec()
            .manifest
            .apps
            .iter()
            .map(|a| a.image.id.as_ref().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["sha512-aaaa", "sha512-loose", "sha512-other"]);
    }

    #[test]
    fn input_spec_is_not_mutated() {
        let spec = parse_compose_str(TWO_APPS).unwrap();
        let _ = spec
            .resolve_images(|_| ImageId::parse("sha512-bbbb"))
            .unwrap();
        assert!(spec.manifest.apps[1].image.id.is_none());
    }

    #[test]
    fn first_failure_stops_resolution() {
        let spec = parse_compose_str(TWO_APPS).unwrap();
        let mut calls = 0;
        let result: Result<_, String> = spec.resolve_images(|app| {
            calls += 1;
            Err(format!("cannot fetch {}", app.name))
        });
        assert_eq!(result.unwrap_err(), "cannot fetch loose");
        assert_eq!(calls, 1);
    }
}

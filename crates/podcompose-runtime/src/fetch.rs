use crate::RuntimeError;
use podcompose_schema::{requires_insecure_fetch, ComposeSpec, ImageId, ResolvedCompose};
use tracing::info;

/// Capability that turns an image locator into a content-addressed image.
pub trait ImageFetcher: Send + Sync {
    /// Fetch the image behind `locator` and return the raw output, which is
    /// expected to contain the image id. `insecure` skips signature checks.
    fn fetch(&self, locator: &str, insecure: bool) -> Result<String, RuntimeError>;
}

/// Parse the output of a fetch into an image id, ignoring surrounding whitespace.
pub fn parse_image_id(locator: &str, output: &str) -> Result<ImageId, RuntimeError> {
    let trimmed = output.trim();
    ImageId::parse(trimmed).map_err(|source| RuntimeError::InvalidImageId {
        locator: locator.to_owned(),
        output: trimmed.to_owned(),
        source,
    })
}

/// Fetch every image that is not pinned by id, sequentially and in
/// declaration order. The first failure aborts resolution.
pub fn resolve_images(
    spec: &ComposeSpec,
    fetcher: &dyn ImageFetcher,
) -> Result<ResolvedCompose, RuntimeError> {
    info!("fetch images...");
    spec.resolve_images(|app| {
        let locator = app.image.locator();
        let insecure = requires_insecure_fetch(&locator);
        info!("fetching image {locator}...");
        let output = fetcher.fetch(&locator, insecure)?;
        let id = parse_image_id(&locator, &output)?;
        info!("fetched image {locator} with id {id}.");
        Ok(id)
    })
}

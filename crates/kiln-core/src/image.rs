use crate::SynthesisError;
use kiln_schema::{Container, ImageReference};
use tracing::warn;

/// Copy of `container` running the resolved image instead of whatever the
/// template declared. Digest resolution happens upstream; this only substitutes.
pub fn substitute_image(
    container: &Container,
    resolved: Option<&ImageReference>,
) -> Result<Container, SynthesisError> {
    let Some(image) = resolved else {
        return Err(SynthesisError::ImageMissing {
            container: container.display_name().to_owned(),
        });
    };
    if !image.is_digest_pinned() {
        warn!("image {image} is not pinned to a digest");
    }
    Ok(Container {
        image: Some(image.to_string()),
        ..container.clone()
    })
}

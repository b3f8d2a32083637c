//! Applying overrides to image references

use crate::config::Reader;
use crate::error::Result;
use crate::image::ImageReference;

use super::resolver::OverrideResolver;

/// Rewrites raw image reference strings according to the override
/// configuration exposed by its reader
#[derive(Debug)]
pub struct OverrideClient<R> {
    resolver: OverrideResolver<R>,
}

impl<R: Reader> OverrideClient<R> {
    pub fn new(reader: R) -> Self {
        Self {
            resolver: OverrideResolver::new(reader),
        }
    }

    /// Alter an image reference according to the current override
    /// configuration. When no rule applies, the input string is returned
    /// unchanged, byte for byte, so references the user did not ask to
    /// change are never re-rendered.
    pub fn alter_image(&self, component: &str, image: &str) -> Result<String> {
        let reference = ImageReference::parse(image)?;

        let Some(rule) = self.resolver.resolve(component, &reference.name)? else {
            return Ok(image.to_string());
        };

        Ok(rule.apply_to(reference))
    }
}

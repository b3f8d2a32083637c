//! Override rules
//!
//! An [`ImageOverride`] is a partial patch: an empty field means "no
//! opinion", never "clear this field".

use serde::{Deserialize, Serialize};

use crate::image::ImageReference;

/// A partial patch declaring a replacement repository and/or tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOverride {
    /// Replacement container registry/repository prefix to pull images from.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repository: String,

    /// Replacement tag for matching images.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,
}

impl ImageOverride {
    /// Merge another rule into this one; non-empty fields of the incoming
    /// rule take precedence over the existing ones.
    pub fn union(&mut self, other: &ImageOverride) {
        if !other.repository.is_empty() {
            self.repository = other.repository.clone();
        }
        if !other.tag.is_empty() {
            self.tag = other.tag.clone();
        }
    }

    /// Rewrite an image reference according to this rule and render it.
    /// Only non-empty fields overwrite; name and digest are never touched.
    pub fn apply_to(&self, mut image: ImageReference) -> String {
        if !self.repository.is_empty() {
            // A rendered repository never carries a leading or trailing slash.
            image.repository = self.repository.trim_matches('/').to_string();
        }
        if !self.tag.is_empty() {
            image.tag = self.tag.clone();
        }
        image.to_string()
    }
}

//! Indexed override layers
//!
//! The raw `images` configuration block maps string keys (`all`,
//! `<component>`, `<component>/<imageName>`) to override rules. Keys are
//! split into structured tiers once per decode so a component name can never
//! alias an unrelated `component/image` composite that shares its prefix.

use std::collections::HashMap;

use super::rule::ImageOverride;
use super::ALL_COMPONENTS_KEY;

/// The decoded `images` block, indexed by layer
#[derive(Debug, Clone, Default)]
pub(crate) struct OverrideLayers {
    all: Option<ImageOverride>,
    components: HashMap<String, ImageOverride>,
    images: HashMap<String, HashMap<String, ImageOverride>>,
}

impl OverrideLayers {
    /// Index a raw configuration mapping. A key containing `/` scopes its
    /// rule to one (component, image) pair; the literal key `all` scopes it
    /// to everything; any other key scopes it to one component.
    pub(crate) fn from_raw(raw: HashMap<String, ImageOverride>) -> Self {
        let mut layers = Self::default();
        for (key, rule) in raw {
            match key.split_once('/') {
                Some((component, image_name)) => {
                    layers
                        .images
                        .entry(component.to_string())
                        .or_default()
                        .insert(image_name.to_string(), rule);
                }
                None if key == ALL_COMPONENTS_KEY => layers.all = Some(rule),
                None => {
                    layers.components.insert(key, rule);
                }
            }
        }
        layers
    }

    /// Compute the effective rule for a (component, image name) pair by
    /// merging the declared layers, lowest precedence first. Returns `None`
    /// when no layer matches.
    pub(crate) fn merged_for(&self, component: &str, image_name: &str) -> Option<ImageOverride> {
        let mut merged = ImageOverride::default();
        let mut matched = false;

        if let Some(rule) = &self.all {
            merged.union(rule);
            matched = true;
        }
        if let Some(rule) = self.components.get(component) {
            merged.union(rule);
            matched = true;
        }
        if let Some(rule) = self
            .images
            .get(component)
            .and_then(|images| images.get(image_name))
        {
            merged.union(rule);
            matched = true;
        }

        matched.then_some(merged)
    }
}

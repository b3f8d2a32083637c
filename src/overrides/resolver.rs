//! Override resolution and caching
//!
//! The resolver decodes the `images` configuration block at most once per
//! session and caches the merged rule for every (component, image name) pair
//! it is asked about. Configuration is assumed immutable after load, so
//! cached entries are never recomputed or evicted.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::config::Reader;
use crate::error::{OverrideError, Result};

use super::layers::OverrideLayers;
use super::rule::ImageOverride;
use super::IMAGES_CONFIG_KEY;

/// Cache key for one resolution request. A structured tuple rather than a
/// concatenated string, so a component name can never collide with a
/// `component/image` composite sharing its prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ResolveKey {
    component: String,
    image_name: String,
}

/// The `images` block as seen by this session.
#[derive(Debug)]
enum ConfigSnapshot {
    /// Not decoded yet; the next resolution will read it.
    Unread,
    /// Decoded: the block is not declared at all.
    Absent,
    /// Decoded and indexed.
    Loaded(OverrideLayers),
}

#[derive(Debug)]
struct ResolverState {
    snapshot: ConfigSnapshot,
    resolved: HashMap<ResolveKey, Option<ImageOverride>>,
}

/// Computes and caches effective override rules
///
/// Shared state sits behind a mutex so concurrent callers resolving
/// different images cannot corrupt the cache; resolution is memory-bound,
/// so the critical section is short.
#[derive(Debug)]
pub struct OverrideResolver<R> {
    reader: R,
    state: Mutex<ResolverState>,
}

impl<R: Reader> OverrideResolver<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            state: Mutex::new(ResolverState {
                snapshot: ConfigSnapshot::Unread,
                resolved: HashMap::new(),
            }),
        }
    }

    /// Resolve the effective override rule for a (component, image name)
    /// pair. `Ok(None)` means no rule applies. Decode failures propagate and
    /// are never cached, so a later call retries the decode.
    pub fn resolve(&self, component: &str, image_name: &str) -> Result<Option<ImageOverride>> {
        let key = ResolveKey {
            component: component.to_string(),
            image_name: image_name.to_string(),
        };

        let mut state = self
            .state
            .lock()
            .map_err(|_| OverrideError::Config("override cache lock poisoned".to_string()))?;

        if let Some(cached) = state.resolved.get(&key) {
            return Ok(cached.clone());
        }

        if matches!(state.snapshot, ConfigSnapshot::Unread) {
            let raw: Option<HashMap<String, ImageOverride>> =
                self.reader.unmarshal_key(IMAGES_CONFIG_KEY)?;
            state.snapshot = match raw {
                None => ConfigSnapshot::Absent,
                Some(raw) => ConfigSnapshot::Loaded(OverrideLayers::from_raw(raw)),
            };
        }

        let resolved = match &state.snapshot {
            ConfigSnapshot::Absent => None,
            ConfigSnapshot::Loaded(layers) => layers.merged_for(component, image_name),
            ConfigSnapshot::Unread => unreachable!("snapshot populated above"),
        };

        state.resolved.insert(key, resolved.clone());
        Ok(resolved)
    }
}

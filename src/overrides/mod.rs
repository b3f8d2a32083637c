//! Image override resolution
//!
//! This module rewrites container image references according to user-declared
//! override rules. Rules are declared under the `images` configuration key at
//! three levels of specificity:
//!
//! ```text
//! images:
//!   all:                                    # every component and image
//!     repository: registry.example.com/mirror
//!   cert-manager:                           # every image of one component
//!     tag: v1.13.2
//!   cert-manager/cert-manager-controller:   # one exact component/image pair
//!     repository: registry.example.com/mirror/controllers
//! ```
//!
//! Narrower scopes win field by field. The [`OverrideClient`] is the entry
//! point: it parses a raw reference, resolves the effective rule for a
//! (component, image name) pair through the cached [`OverrideResolver`], and
//! renders the rewritten reference.

pub mod client;
pub mod layers;
pub mod resolver;
pub mod rule;

pub use client::OverrideClient;
pub use resolver::OverrideResolver;
pub use rule::ImageOverride;

/// Configuration key holding the override rules.
pub(crate) const IMAGES_CONFIG_KEY: &str = "images";

/// Rule key applying to every component and image.
pub(crate) const ALL_COMPONENTS_KEY: &str = "all";

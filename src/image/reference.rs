//! Container image reference parsing and rendering
//!
//! Decomposes references like `registry.example.com:5000/mirror/app:v1.2@sha256:...`
//! into repository, name, tag, and digest parts. Parsing captures the raw
//! substrings without normalization: no default registry or tag is ever
//! injected, so a rendered reference reproduces exactly what was parsed.

use std::fmt;
use std::str::FromStr;

use crate::error::{OverrideError, Result};

/// Maximum length of an image tag, per the Docker reference grammar.
const MAX_TAG_LENGTH: usize = 128;

/// Structured parts of a container image reference
///
/// `repository` is everything before the final `/` of the name part and may
/// be empty (implicit registry namespace). `name` is always non-empty for a
/// successfully parsed reference. `tag` and `digest` are independent and
/// empty when absent from the source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub repository: String,
    pub name: String,
    pub tag: String,
    pub digest: String,
}

impl ImageReference {
    /// Parse a raw image reference string into its structured parts.
    ///
    /// The reference is split into a name part and optional `:tag` and
    /// `@digest` suffixes; the name part is then split at its final `/`
    /// into repository and name. A candidate tag containing `/` is a
    /// registry port, not a tag.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(OverrideError::InvalidReference(
                "image reference is empty".to_string(),
            ));
        }

        let (rest, digest) = match raw.split_once('@') {
            Some((rest, digest)) => {
                if digest.contains('@') {
                    return Err(OverrideError::InvalidReference(format!(
                        "more than one digest separator in '{}'",
                        raw
                    )));
                }
                validate_digest(digest)?;
                (rest, digest)
            }
            None => (raw, ""),
        };

        let (name_part, tag) = match rest.rsplit_once(':') {
            Some((name_part, tag)) if !tag.contains('/') => {
                validate_tag(tag)?;
                (name_part, tag)
            }
            _ => (rest, ""),
        };

        let (repository, name) = match name_part.rsplit_once('/') {
            Some((repository, name)) => {
                validate_repository(repository)?;
                (repository, name)
            }
            None => ("", name_part),
        };
        validate_name(name)?;

        Ok(Self {
            repository: repository.to_string(),
            name: name.to_string(),
            tag: tag.to_string(),
            digest: digest.to_string(),
        })
    }
}

impl fmt::Display for ImageReference {
    /// Renders `repository/name[:tag][@digest]`; an empty repository renders
    /// the bare name with no leading slash.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.repository.is_empty() {
            write!(f, "{}/", self.repository)?;
        }
        write!(f, "{}", self.name)?;
        if !self.tag.is_empty() {
            write!(f, ":{}", self.tag)?;
        }
        if !self.digest.is_empty() {
            write!(f, "@{}", self.digest)?;
        }
        Ok(())
    }
}

impl FromStr for ImageReference {
    type Err = OverrideError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Validate an image name: lowercase alphanumerics with `.`, `_`, or `-`
/// separators, starting and ending alphanumeric.
fn validate_name(name: &str) -> Result<()> {
    if !is_valid_path_component(name) {
        return Err(OverrideError::InvalidReference(format!(
            "invalid image name '{}'",
            name
        )));
    }
    Ok(())
}

/// Validate a repository prefix. Every `/`-separated component must be a
/// valid path component, except the first, which may instead be a registry
/// host with an optional port.
fn validate_repository(repository: &str) -> Result<()> {
    if repository.is_empty() {
        return Err(OverrideError::InvalidReference(
            "image reference has a leading slash".to_string(),
        ));
    }

    for (i, component) in repository.split('/').enumerate() {
        let valid = if i == 0 {
            is_valid_path_component(component) || is_valid_registry_host(component)
        } else {
            is_valid_path_component(component)
        };
        if !valid {
            return Err(OverrideError::InvalidReference(format!(
                "invalid repository component '{}' in '{}'",
                component, repository
            )));
        }
    }
    Ok(())
}

fn validate_tag(tag: &str) -> Result<()> {
    let mut chars = tag.chars();
    let valid = match chars.next() {
        Some(first) => {
            tag.len() <= MAX_TAG_LENGTH
                && (first.is_ascii_alphanumeric() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        }
        None => false,
    };
    if !valid {
        return Err(OverrideError::InvalidReference(format!(
            "invalid image tag '{}'",
            tag
        )));
    }
    Ok(())
}

/// Validate a digest of the form `algorithm:hex` (e.g. `sha256:` followed by
/// 64 hex characters). The hex payload is carried as an opaque string and is
/// never verified against any content.
fn validate_digest(digest: &str) -> Result<()> {
    let valid = match digest.split_once(':') {
        Some((algorithm, hex)) => {
            !algorithm.is_empty()
                && algorithm
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
                && hex.len() >= 32
                && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    };
    if !valid {
        return Err(OverrideError::InvalidReference(format!(
            "invalid image digest '{}'",
            digest
        )));
    }
    Ok(())
}

fn is_valid_path_component(component: &str) -> bool {
    let starts_ok = component
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    let ends_ok = component
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    starts_ok
        && ends_ok
        && component
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'))
}

/// Registry hosts are DNS names (case-insensitive) with an optional numeric port.
fn is_valid_registry_host(component: &str) -> bool {
    let (host, port) = match component.split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (component, None),
    };
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
        && port.is_none_or(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

//! Layered configuration readers
//!
//! A [`Reader`] resolves string values from explicit overrides, the process
//! environment, and a configuration document, in that order of precedence,
//! and decodes structured blocks out of the document on demand.

use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{OverrideError, Result};

/// Prefix for environment variable overrides, e.g. `IMAGE_OVERRIDES_IMAGES`.
pub const ENV_PREFIX: &str = "IMAGE_OVERRIDES";

/// Behaviour of a configuration reader.
pub trait Reader {
    /// Returns a configuration value of type string, or `None` when the key
    /// is not set in any layer.
    fn get(&self, key: &str) -> Option<String>;

    /// Sets an explicit override for a config value, taking precedence over
    /// environment and file values (e.g. a flag value).
    fn set(&mut self, key: &str, value: &str);

    /// Reads a structured configuration value and unmarshals it into the
    /// requested type. Returns `Ok(None)` when the key is not declared and
    /// an error when the value is declared but cannot be decoded.
    fn unmarshal_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>>;
}

/// Reader backed by a YAML or JSON configuration document
///
/// String lookups through [`Reader::get`] consult explicit overrides first,
/// then `IMAGE_OVERRIDES_*` environment variables, then the document.
/// Structured decodes come from the document alone.
#[derive(Debug, Clone, Default)]
pub struct FileReader {
    values: serde_yaml::Value,
    overrides: HashMap<String, String>,
}

impl FileReader {
    /// Initialize the reader from a configuration file on disk. `.json`
    /// files are decoded as JSON, everything else as YAML.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            OverrideError::Io(format!(
                "failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&contents),
            _ => Self::from_contents(&contents),
        }
    }

    /// Initialize the reader from a JSON configuration document.
    pub fn from_json(contents: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(contents)
            .map_err(|e| OverrideError::Config(format!("invalid configuration document: {}", e)))?;
        let values = serde_yaml::to_value(&json)
            .map_err(|e| OverrideError::Config(format!("invalid configuration document: {}", e)))?;
        if !values.is_mapping() && !values.is_null() {
            return Err(OverrideError::Config(
                "configuration document must be a mapping".to_string(),
            ));
        }
        Ok(Self {
            values,
            overrides: HashMap::new(),
        })
    }

    /// Initialize the reader from a configuration document held in memory.
    pub fn from_contents(contents: &str) -> Result<Self> {
        let values: serde_yaml::Value = if contents.trim().is_empty() {
            serde_yaml::Value::Null
        } else {
            serde_yaml::from_str(contents).map_err(|e| {
                OverrideError::Config(format!("invalid configuration document: {}", e))
            })?
        };
        if !values.is_mapping() && !values.is_null() {
            return Err(OverrideError::Config(
                "configuration document must be a mapping".to_string(),
            ));
        }
        Ok(Self {
            values,
            overrides: HashMap::new(),
        })
    }

    fn env_value(key: &str) -> Option<String> {
        let var = format!(
            "{}_{}",
            ENV_PREFIX,
            key.replace(['-', '/', '.'], "_").to_uppercase()
        );
        std::env::var(var).ok()
    }
}

impl Reader for FileReader {
    fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.overrides.get(key) {
            return Some(value.clone());
        }
        if let Some(value) = Self::env_value(key) {
            return Some(value);
        }
        self.values.get(key).and_then(value_to_string)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.overrides.insert(key.to_string(), value.to_string());
    }

    fn unmarshal_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        decode_value(key, self.values.get(key))
    }
}

/// In-memory reader for embedding the resolver without a config file
#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    values: HashMap<String, serde_yaml::Value>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a structured value under a top-level key.
    pub fn with_value(mut self, key: &str, value: serde_yaml::Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }
}

impl Reader for MemoryReader {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).and_then(value_to_string)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values
            .insert(key.to_string(), serde_yaml::Value::String(value.to_string()));
    }

    fn unmarshal_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        decode_value(key, self.values.get(key))
    }
}

fn value_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn decode_value<T: DeserializeOwned>(
    key: &str,
    value: Option<&serde_yaml::Value>,
) -> Result<Option<T>> {
    match value {
        None => Ok(None),
        Some(value) => serde_yaml::from_value(value.clone())
            .map(Some)
            .map_err(|e| OverrideError::Config(format!("invalid '{}' configuration: {}", key, e))),
    }
}

//! # Configuration
//!
//! Sizing for the collections, loadable from TOML.
//!
//! ```toml
//! [spatial]
//! bucket_count = 4096
//! hash = "align16"
//!
//! [rect_stack]
//! capacity = 16
//!
//! [matrix_stack]
//! capacity = 64
//! ```
//!
//! Every section and field is optional; missing values take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CollectionError, CollectionResult};
use crate::spatial::{HashStrategy, DEFAULT_BUCKET_COUNT};

/// Default capacity of both render stacks.
pub const DEFAULT_STACK_CAPACITY: usize = 32;

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseraConfig {
    /// Spatial map sizing.
    pub spatial: MapConfig,
    /// Rectangle stack sizing.
    pub rect_stack: StackConfig,
    /// Matrix stack sizing.
    pub matrix_stack: StackConfig,
}

impl TesseraConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidConfig`] if the document is not
    /// valid TOML, has fields of the wrong type, or fails [`Self::validate`].
    pub fn from_toml_str(source: &str) -> CollectionResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| CollectionError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidConfig`] if the file cannot be read
    /// or [`Self::from_toml_str`] rejects it.
    pub fn from_toml_file(path: impl AsRef<Path>) -> CollectionResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            CollectionError::InvalidConfig(format!("{}: {e}", path.display()))
        })?;
        Self::from_toml_str(&source)
    }

    /// Serializes the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidConfig`] if serialization fails.
    pub fn to_toml_string(&self) -> CollectionResult<String> {
        toml::to_string(self).map_err(|e| CollectionError::InvalidConfig(e.to_string()))
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> CollectionResult<()> {
        self.spatial.validate()?;
        self.rect_stack
            .validate()
            .map_err(|e| e.in_section("rect_stack"))?;
        self.matrix_stack
            .validate()
            .map_err(|e| e.in_section("matrix_stack"))
    }
}

/// Spatial map sizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Number of buckets. Fixed for the map's lifetime.
    pub bucket_count: usize,
    /// Coordinate hash.
    pub hash: HashStrategy,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            hash: HashStrategy::Default,
        }
    }
}

impl MapConfig {
    /// Rejects a zero bucket count.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidConfig`].
    pub fn validate(&self) -> CollectionResult<()> {
        if self.bucket_count == 0 {
            return Err(CollectionError::InvalidConfig(
                "spatial.bucket_count must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Struct stack sizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Maximum number of records.
    pub capacity: usize,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_STACK_CAPACITY,
        }
    }
}

impl StackConfig {
    /// Creates a config with the given capacity.
    #[must_use]
    pub const fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Rejects a zero capacity.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidConfig`].
    pub fn validate(&self) -> CollectionResult<()> {
        if self.capacity == 0 {
            return Err(CollectionError::InvalidConfig(
                "capacity must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl CollectionError {
    /// Prefixes a config error message with its section name.
    fn in_section(self, section: &str) -> Self {
        match self {
            Self::InvalidConfig(msg) => Self::InvalidConfig(format!("{section}.{msg}")),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TesseraConfig::default();
        assert_eq!(config.spatial.bucket_count, 100);
        assert_eq!(config.spatial.hash, HashStrategy::Default);
        assert_eq!(config.rect_stack.capacity, 32);
        assert_eq!(config.matrix_stack.capacity, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document() {
        let config = TesseraConfig::from_toml_str(
            r#"
            [spatial]
            hash = "align16"

            [matrix_stack]
            capacity = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.spatial.bucket_count, 100);
        assert_eq!(config.spatial.hash, HashStrategy::Align16);
        assert_eq!(config.rect_stack, StackConfig::default());
        assert_eq!(config.matrix_stack.capacity, 8);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(
            TesseraConfig::from_toml_str("").unwrap(),
            TesseraConfig::default()
        );
    }

    #[test]
    fn test_zero_sizes_rejected() {
        let err = TesseraConfig::from_toml_str("[rect_stack]\ncapacity = 0").unwrap_err();
        assert_eq!(
            err,
            CollectionError::InvalidConfig("rect_stack.capacity must be greater than zero".into())
        );

        let err = TesseraConfig::from_toml_str("[spatial]\nbucket_count = 0").unwrap_err();
        assert!(matches!(err, CollectionError::InvalidConfig(msg) if msg.contains("bucket_count")));
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            TesseraConfig::from_toml_str("[spatial]\nhash = \"sha256\""),
            Err(CollectionError::InvalidConfig(_))
        ));
        assert!(matches!(
            TesseraConfig::from_toml_str("[spatial"),
            Err(CollectionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = TesseraConfig::default();
        config.spatial.hash = HashStrategy::Align16;
        config.rect_stack = StackConfig::with_capacity(4);

        let text = config.to_toml_string().unwrap();
        assert_eq!(TesseraConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            TesseraConfig::from_toml_file("/nonexistent/tessera.toml"),
            Err(CollectionError::InvalidConfig(_))
        ));
    }
}

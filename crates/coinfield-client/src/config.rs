//! Client configuration.
//!
//! The canonical configuration lives in `coinfield-config.yaml` at the
//! project root; the client reads its `client` section. All fields have
//! defaults, so a missing file or section is not an error.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A field value is outside its valid range.
    #[error("invalid config value: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the value.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Typed client settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Edge length of one grid tile in pixels.
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,

    /// Suppress pointer-driven spawns whose computed tile is exactly
    /// (0, 0).
    ///
    /// Shields against default-initialized pointer coordinates; whether
    /// the origin should also be unclickable as a product rule is
    /// unresolved, so the guard is a flag rather than hard-coded.
    /// Direct `spawn` submissions are never suppressed.
    #[serde(default = "default_suppress_origin_spawn")]
    pub suppress_origin_spawn: bool,
}

/// Default edge length of one tile, in pixels.
const fn default_tile_size() -> u32 {
    32
}

/// The origin guard ships enabled.
const fn default_suppress_origin_spawn() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            tile_size: default_tile_size(),
            suppress_origin_spawn: default_suppress_origin_spawn(),
        }
    }
}

impl ClientConfig {
    /// Load the `client` section from a YAML file at the given path.
    ///
    /// A file without a `client` key yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_document(&contents)
    }

    /// Parse the `client` section out of a full YAML document string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] or [`ConfigError::Invalid`] as for
    /// [`ClientConfig::from_file`].
    pub fn from_yaml_document(contents: &str) -> Result<Self, ConfigError> {
        let raw: serde_yml::Value = serde_yml::from_str(contents)?;
        let config = match raw.get("client") {
            Some(section) => serde_yml::from_value(section.clone())?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check field ranges.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size == 0 {
            return Err(ConfigError::Invalid {
                reason: "tile_size must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_tile_32_with_the_guard_on() {
        let config = ClientConfig::default();
        assert_eq!(config.tile_size, 32);
        assert!(config.suppress_origin_spawn);
    }

    #[test]
    fn missing_client_section_yields_defaults() {
        let config = ClientConfig::from_yaml_document("world:\n  seed: 7\n");
        assert_eq!(config.ok(), Some(ClientConfig::default()));
    }

    #[test]
    fn client_section_overrides_defaults() {
        let yaml = "client:\n  tile_size: 16\n  suppress_origin_spawn: false\n";
        let config = ClientConfig::from_yaml_document(yaml);
        assert_eq!(
            config.ok(),
            Some(ClientConfig {
                tile_size: 16,
                suppress_origin_spawn: false,
            }),
        );
    }

    #[test]
    fn zero_tile_size_is_rejected() {
        let result = ClientConfig::from_yaml_document("client:\n  tile_size: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }
}

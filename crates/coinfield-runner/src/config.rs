//! Configuration for the runner binary.
//!
//! The runner reads `coinfield-config.yaml` from the working directory.
//! Its `world` section controls coin placement, channel sizing, and
//! snapshot persistence; the `client` section is parsed by the client
//! crate. Every field has a default, so a missing file runs a fresh
//! world with the fixed coin layout.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use coinfield_client::{ClientConfig, ConfigError};
use coinfield_engine::CoinPlacement;

/// How the world chooses its coin placement cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementMode {
    /// The built-in deterministic layout.
    Fixed,
    /// Random cells derived from `seed` and `coin_count`.
    Seeded,
}

/// The `world` section of `coinfield-config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Coin placement strategy.
    #[serde(default = "default_placement")]
    pub placement: PlacementMode,

    /// Seed for the `seeded` placement mode. Ignored under `fixed`.
    #[serde(default)]
    pub seed: u64,

    /// Number of cells for the `seeded` placement mode.
    #[serde(default = "default_coin_count")]
    pub coin_count: usize,

    /// Submission and snapshot channel capacity for the sequencer.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Where to load the world snapshot from at startup and save it at
    /// shutdown. `None` runs an in-memory world from genesis.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

const fn default_placement() -> PlacementMode {
    PlacementMode::Fixed
}

const fn default_coin_count() -> usize {
    24
}

const fn default_channel_capacity() -> usize {
    64
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            placement: default_placement(),
            seed: 0,
            coin_count: default_coin_count(),
            channel_capacity: default_channel_capacity(),
            snapshot_path: None,
        }
    }
}

impl WorldConfig {
    /// Build the coin placement this configuration describes.
    pub fn coin_placement(&self) -> CoinPlacement {
        match self.placement {
            PlacementMode::Fixed => CoinPlacement::fixed(),
            PlacementMode::Seeded => CoinPlacement::seeded(self.seed, self.coin_count),
        }
    }
}

/// Complete runner configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerConfig {
    /// World and sequencer settings.
    pub world: WorldConfig,
    /// Client settings (tile size, origin guard).
    pub client: ClientConfig,
}

impl RunnerConfig {
    /// Load configuration from a YAML file, or defaults if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed, or if a value is out of range.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_document(&contents)
    }

    /// Parse both sections out of a full YAML document string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on parse or validation failure.
    pub fn from_yaml_document(contents: &str) -> Result<Self, ConfigError> {
        let raw: serde_yml::Value = serde_yml::from_str(contents)?;
        let world: WorldConfig = match raw.get("world") {
            Some(section) => serde_yml::from_value(section.clone())?,
            None => WorldConfig::default(),
        };
        let client = ClientConfig::from_yaml_document(contents)?;

        let config = Self { world, client };
        config.validate()?;
        Ok(config)
    }

    /// Check field ranges.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.world.channel_capacity == 0 {
            return Err(ConfigError::Invalid {
                reason: "world.channel_capacity must be at least 1".to_owned(),
            });
        }
        if self.world.placement == PlacementMode::Seeded && self.world.coin_count == 0 {
            return Err(ConfigError::Invalid {
                reason: "world.coin_count must be at least 1 under seeded placement".to_owned(),
            });
        }
        Ok(())
    }
}

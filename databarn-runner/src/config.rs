//! Serializable dashboard configuration.
//!
//! ```toml
//! parallel = true
//! parties = ["sires", "jockeys", "trainers"]
//! ```
//!
//! Missing keys take their defaults. The partition catalog and the number of
//! ranked tiers are fixed and not configurable.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use databarn_core::PartyType;

use crate::aggregator::AggregateOptions;

/// Errors from loading or validating a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config lists no party types")]
    EmptyParties,

    #[error("party type '{0}' is listed more than once")]
    DuplicateParty(PartyType),
}

/// Which reports to build and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Fan slice queries out over the rayon pool.
    pub parallel: bool,
    /// Party types to report on, in output order.
    pub parties: Vec<PartyType>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parties: PartyType::ALL.to_vec(),
        }
    }
}

impl DashboardConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parties.is_empty() {
            return Err(ConfigError::EmptyParties);
        }
        for (i, party) in self.parties.iter().enumerate() {
            if self.parties[..i].contains(party) {
                return Err(ConfigError::DuplicateParty(*party));
            }
        }
        Ok(())
    }

    pub fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions {
            parallel: self.parallel,
        }
    }
}

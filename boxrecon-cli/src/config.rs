//! Runtime configuration
//!
//! Every field has a default matching the production values; a TOML file
//! can override the thresholds, the fuzzy cutoffs and the unit registry.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::recon::registry::{DEFAULT_UNITS, LocationRegistry};

/// Days of delinquency at which a box becomes blockable.
pub const DEFAULT_MIN_DELINQUENT_DAYS: f64 = 5.0;
/// Fuzzy cutoff used when resolving units during filename extraction.
pub const DEFAULT_RESOLVE_CUTOFF: f64 = 0.75;
/// Stricter cutoff for standalone fuzzy unit lookups.
pub const DEFAULT_STANDALONE_CUTOFF: f64 = 0.8;

/// One registry entry: normalized match key and canonical display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitEntry {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub min_delinquent_days: f64,
    pub resolve_cutoff: f64,
    pub standalone_cutoff: f64,
    /// Ordered: earlier entries win exact-match ties
    pub units: Vec<UnitEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_delinquent_days: DEFAULT_MIN_DELINQUENT_DAYS,
            resolve_cutoff: DEFAULT_RESOLVE_CUTOFF,
            standalone_cutoff: DEFAULT_STANDALONE_CUTOFF,
            units: DEFAULT_UNITS
                .iter()
                .map(|(key, name)| UnitEntry {
                    key: key.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the default location when one
    /// exists, or fall back to built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        match path {
            Some(p) => {
                let raw = fs::read_to_string(&p)
                    .with_context(|| format!("Failed to read config file: {}", p.display()))?;
                let config: Config = toml::from_str(&raw)
                    .with_context(|| format!("Invalid config file: {}", p.display()))?;
                log::debug!("Loaded configuration from {}", p.display());
                Ok(config)
            }
            None => Ok(Config::default()),
        }
    }

    /// Registry built from the configured units, preserving their order.
    pub fn registry(&self) -> LocationRegistry {
        LocationRegistry::new(self.units.iter().map(|u| (u.key.clone(), u.name.clone())))
    }
}

/// Default location: `<user config dir>/boxrecon/config.toml`.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("boxrecon").join("config.toml"))
}

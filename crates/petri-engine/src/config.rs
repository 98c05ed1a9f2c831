//! Configuration loading and typed config structures for the engine.
//!
//! The optional configuration lives in `petri-config.yaml` next to the
//! working directory. This module defines strongly-typed structs that
//! mirror the YAML structure; a missing file or missing keys fall back to
//! the defaults, which reproduce the classic terminal rendition (100 ms
//! ticks, `x` for alive, `-` for dead).

use std::path::Path;

use serde::Deserialize;

/// Name of the optional configuration file, resolved in the working directory.
pub const CONFIG_FILE: &str = "petri-config.yaml";

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
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Simulation pacing settings.
    #[serde(default)]
    pub world: WorldSettings,

    /// Run-log storage settings.
    #[serde(default)]
    pub storage: StorageSettings,

    /// Terminal rendering settings.
    #[serde(default)]
    pub render: RenderSettings,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Simulation pacing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldSettings {
    /// Real-time milliseconds between generations.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Run-log storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageSettings {
    /// Directory holding one JSON log file per run.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
        }
    }
}

/// Terminal rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenderSettings {
    /// Glyph drawn for a live cell.
    #[serde(default = "default_alive_glyph")]
    pub alive_glyph: char,

    /// Glyph drawn for a dead cell.
    #[serde(default = "default_dead_glyph")]
    pub dead_glyph: char,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            alive_glyph: default_alive_glyph(),
            dead_glyph: default_dead_glyph(),
        }
    }
}

/// Default milliseconds between generations.
const fn default_tick_interval_ms() -> u64 {
    100
}

/// Default run-log directory.
fn default_log_dir() -> String {
    "world_logs".to_owned()
}

/// Default glyph for a live cell.
const fn default_alive_glyph() -> char {
    'x'
}

/// Default glyph for a dead cell.
const fn default_dead_glyph() -> char {
    '-'
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_all_defaults() {
        let config = EngineConfig::parse("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.world.tick_interval_ms, 100);
        assert_eq!(config.storage.log_dir, "world_logs");
        assert_eq!(config.render.alive_glyph, 'x');
        assert_eq!(config.render.dead_glyph, '-');
    }

    #[test]
    fn partial_yaml_overrides_only_named_keys() {
        let yaml = "world:\n  tick_interval_ms: 250\nrender:\n  alive_glyph: \"#\"\n";
        let config = EngineConfig::parse(yaml).unwrap();
        assert_eq!(config.world.tick_interval_ms, 250);
        assert_eq!(config.render.alive_glyph, '#');
        // Untouched sections keep their defaults.
        assert_eq!(config.render.dead_glyph, '-');
        assert_eq!(config.storage.log_dir, "world_logs");
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(EngineConfig::parse(": : :").is_err());
    }
}

//! Configuration for a Layerpad surface.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration. Partial documents override only the keys they name:
//!
//! ```
//! use layerpad_core::LayerpadConfig;
//!
//! let config = LayerpadConfig::from_toml_str(r#"
//! flash_interval_ms = 150
//!
//! [pump]
//! pushed_image = "PumpDown.png"
//! "#).unwrap();
//!
//! assert_eq!(config.flash_interval_ms, 150);
//! assert_eq!(config.pump.pushed_image, "PumpDown.png");
//! assert_eq!(config.pump.resting_image, "AirPump1.png");
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default depth assigned to a widget while it is being dragged.
pub const DEFAULT_LIFTED_DEPTH: i32 = 1000;

/// Default period of the pump reset timer in milliseconds.
pub const DEFAULT_FLASH_INTERVAL_MS: u64 = 300;

/// Default host tick period in milliseconds.
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 27;

/// Default lap logging period in milliseconds.
pub const DEFAULT_LAP_LOG_INTERVAL_MS: u64 = 1000;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerpadConfig {
    /// Depth a draggable widget is raised to while dragging.
    pub lifted_depth: i32,
    /// Period of the repeating pump reset timer.
    pub flash_interval_ms: u64,
    /// Recommended period for the host tick source.
    pub update_interval_ms: u64,
    /// How often the update hooks emit a lap log line.
    pub lap_log_interval_ms: u64,
    /// Pump visuals.
    pub pump: PumpConfig,
    /// Surface region ids of the air pump scene.
    pub regions: RegionIds,
}

impl Default for LayerpadConfig {
    fn default() -> Self {
        Self {
            lifted_depth: DEFAULT_LIFTED_DEPTH,
            flash_interval_ms: DEFAULT_FLASH_INTERVAL_MS,
            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            lap_log_interval_ms: DEFAULT_LAP_LOG_INTERVAL_MS,
            pump: PumpConfig::default(),
            regions: RegionIds::default(),
        }
    }
}

impl LayerpadConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        crate::layerpad_debug!(path = %path.display(), "loading config");
        Self::from_toml_str(&text)
    }

    /// The pump reset period as a `Duration`.
    pub fn flash_interval(&self) -> Duration {
        Duration::from_millis(self.flash_interval_ms)
    }

    /// The host tick period as a `Duration`.
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }
}

/// Image file names for the two pump visuals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PumpConfig {
    /// Image shown while the pump rests.
    pub resting_image: String,
    /// Image shown right after a completed swipe.
    pub pushed_image: String,
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self {
            resting_image: "AirPump1.png".to_string(),
            pushed_image: "AirPump2.png".to_string(),
        }
    }
}

/// Surface region ids the air pump scene binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionIds {
    pub pump: String,
    pub top: String,
    pub area: String,
    pub bottom: String,
    pub counter: String,
}

impl Default for RegionIds {
    fn default() -> Self {
        Self {
            pump: "air_pump".to_string(),
            top: "swipe_top".to_string(),
            area: "swipe_area".to_string(),
            bottom: "swipe_bottom".to_string(),
            counter: "swipe_count".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = LayerpadConfig::from_toml_str("").unwrap();
        assert_eq!(config, LayerpadConfig::default());
        assert_eq!(config.lifted_depth, 1000);
        assert_eq!(config.flash_interval(), Duration::from_millis(300));
        assert_eq!(config.update_interval(), Duration::from_millis(27));
    }

    #[test]
    fn test_partial_override() {
        let config = LayerpadConfig::from_toml_str(
            r#"
            lifted_depth = 50

            [regions]
            counter = "score"
            "#,
        )
        .unwrap();

        assert_eq!(config.lifted_depth, 50);
        assert_eq!(config.regions.counter, "score");
        assert_eq!(config.regions.top, "swipe_top");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = LayerpadConfig::from_toml_str("lifted_depth = \"high\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "flash_interval_ms = 120").unwrap();

        let config = LayerpadConfig::load(file.path()).unwrap();
        assert_eq!(config.flash_interval_ms, 120);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LayerpadConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = LayerpadConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(LayerpadConfig::from_toml_str(&text).unwrap(), config);
    }
}

//! Error types for Layerpad.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for Layerpad operations.
///
/// Only binding and configuration failures are errors. Moves with missing
/// coordinates and pointer events that do not apply to the current state are
/// defined no-ops and never surface here.
#[derive(Error, Debug)]
pub enum LayerpadError {
    /// A widget was bound to a surface region that does not exist.
    #[error("no surface region with id '{id}'")]
    MissingRegion {
        /// The requested region id.
        id: String,
    },

    /// An image widget was bound to a region without an inner image node.
    #[error("surface region '{id}' has no image node")]
    MissingImage {
        /// The requested region id.
        id: String,
    },

    /// Timer-related error.
    #[error("timer error: {0}")]
    Timer(#[from] TimerError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl LayerpadError {
    /// Create a missing-region error.
    pub fn missing_region(id: impl Into<String>) -> Self {
        Self::MissingRegion { id: id.into() }
    }

    /// Create a missing-image error.
    pub fn missing_image(id: impl Into<String>) -> Self {
        Self::MissingImage { id: id.into() }
    }
}

/// Timer-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// The timer ID is invalid or has already been removed.
    #[error("invalid or expired timer ID")]
    InvalidTimerId,
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for [`crate::LayerpadConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A specialized Result type for Layerpad operations.
pub type Result<T> = std::result::Result<T, LayerpadError>;

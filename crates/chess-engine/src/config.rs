//! Game configuration loaded from TOML.
//!
//! ```toml
//! variant = "horde"
//!
//! [start_positions]
//! standard = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
//! ```
//!
//! Every field is optional; missing start positions fall back to the
//! built-in ones.

use std::path::Path;

use chess_core::FenRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rules::Variant;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Start position of each variant, as FEN.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct StartPositions {
    #[serde(default = "default_standard_fen")]
    pub standard: String,
    #[serde(default = "default_standard_fen")]
    pub atomic: String,
    #[serde(default = "default_horde_fen")]
    pub horde: String,
    /// Chess960 has no built-in shuffler; the standard setup is one of its 960 positions.
    #[serde(default = "default_standard_fen")]
    pub chess960: String,
}

fn default_standard_fen() -> String {
    FenRecord::STARTPOS.to_string()
}

fn default_horde_fen() -> String {
    FenRecord::HORDE_STARTPOS.to_string()
}

impl Default for StartPositions {
    fn default() -> Self {
        StartPositions {
            standard: default_standard_fen(),
            atomic: default_standard_fen(),
            horde: default_horde_fen(),
            chess960: default_standard_fen(),
        }
    }
}

/// Settings used to create games.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GameConfig {
    /// Variant used when none is requested explicitly.
    #[serde(default)]
    pub variant: Variant,
    #[serde(default)]
    pub start_positions: StartPositions,
}

impl GameConfig {
    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, or
    /// [`ConfigError::ParseError`] if it is not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Start FEN for `variant`.
    pub fn start_fen(&self, variant: Variant) -> &str {
        match variant {
            Variant::Standard => &self.start_positions.standard,
            Variant::Atomic => &self.start_positions.atomic,
            Variant::Horde => &self.start_positions.horde,
            Variant::Chess960 => &self.start_positions.chess960,
        }
    }
}

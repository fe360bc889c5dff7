//! Cipher configuration and its JSON file
//!
//! The on-disk form is pretty-printed JSON:
//!
//! ```json
//! {
//!   "grid_config": {
//!     "chars": "abcdefghiklmnopqrstuvwxyz ,.!#",
//!     "height": 6,
//!     "width": 5,
//!     "key": "playfairexample"
//!   },
//!   "separator": "#"
//! }
//! ```

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{ErrorCategory, ErrorKind, PlayfairError, Result};
use crate::grid::Grid;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Location used by the command line tool when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.json";

/// Alphabet, dimensions and key of a grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub chars: String,
    pub height: usize,
    pub width: usize,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub grid_config: GridConfig,
    pub separator: char,
}

impl Default for Config {
    fn default() -> Self {
        Self::english()
    }
}

impl Config {
    /// Latin letters without `j`, a few punctuation marks, 6x5.
    pub fn english() -> Self {
        Self {
            grid_config: GridConfig {
                chars: "abcdefghiklmnopqrstuvwxyz ,.!#".to_string(),
                height: 6,
                width: 5,
                key: "playfairexample".to_string(),
            },
            separator: '#',
        }
    }

    /// Russian alphabet with space, period and `#`, 6x6.
    pub fn russian() -> Self {
        Self {
            grid_config: GridConfig {
                chars: "абвгдеёжзийклмнопрстуфхцчшщъыьэюя .#".to_string(),
                height: 6,
                width: 6,
                key: "парольная фраза".to_string(),
            },
            separator: '#',
        }
    }

    /// The textbook 5x5 square: Latin letters without `j`, separator `x`.
    pub fn classic() -> Self {
        Self {
            grid_config: GridConfig {
                chars: "abcdefghiklmnopqrstuvwxyz".to_string(),
                height: 5,
                width: 5,
                key: "playfairexample".to_string(),
            },
            separator: 'x',
        }
    }

    /// The same configuration with a different key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.grid_config.key = key.into();
        self
    }

    pub fn alphabet(&self) -> Vec<char> {
        self.grid_config.chars.chars().collect()
    }

    pub fn build_grid(&self) -> Result<Grid> {
        let gc = &self.grid_config;
        Grid::build(&self.alphabet(), gc.height, gc.width, &gc.key, self.separator)
    }

    pub fn encoder(&self) -> Result<Encoder> {
        Encoder::new(self.build_grid()?, self.separator)
    }

    pub fn decoder(&self) -> Result<Decoder> {
        Ok(Decoder::new(self.build_grid()?, Some(self.separator)))
    }

    /// Read a configuration from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| {
            let category = if e.kind() == io::ErrorKind::NotFound {
                ErrorCategory::Config
            } else {
                ErrorCategory::Internal
            };
            PlayfairError::with_kind_and_source(
                category,
                ErrorKind::Io,
                format!("failed to read config from {}", path.display()),
                e,
            )
        })?;
        let config: Self = serde_json::from_str(&data).map_err(|e| {
            PlayfairError::with_kind_and_source(
                ErrorCategory::Config,
                ErrorKind::ConfigFormat,
                format!("malformed config in {}", path.display()),
                e,
            )
        })?;
        debug!(
            "loaded config from {} ({}x{} grid)",
            path.display(),
            config.grid_config.height,
            config.grid_config.width
        );
        Ok(config)
    }

    /// Validate and atomically write the configuration to `path`.
    ///
    /// The grid is built first so an unusable configuration is never
    /// written. The file is replaced via tempfile + fsync + rename, so
    /// readers see either the old or the new contents.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.build_grid()
            .map_err(|e| e.with_context("refusing to save invalid config"))?;

        let mut json = serde_json::to_string_pretty(self).map_err(|e| {
            PlayfairError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::ConfigFormat,
                "failed to serialize config",
                e,
            )
        })?;
        json.push('\n');

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)
            .map_err(|e| io_error(format!("failed to create {}", dir.display()), e))?;

        let mut temp_file = tempfile::NamedTempFile::new_in(dir)
            .map_err(|e| io_error("failed to create tempfile", e))?;
        temp_file
            .write_all(json.as_bytes())
            .map_err(|e| io_error("failed to write to tempfile", e))?;
        // Flush and fsync() such that the rename later, if it succeeds, will
        // always point to a valid file.
        temp_file
            .flush()
            .map_err(|e| io_error("failed to flush tempfile", e))?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| io_error("failed to sync file prior to rename", e))?;
        temp_file.persist(path).map_err(|e| {
            io_error(
                format!("failed to rename to target file {}", path.display()),
                e.error,
            )
        })?;

        debug!("saved config to {}", path.display());
        Ok(())
    }
}

fn io_error(msg: impl Into<String>, err: io::Error) -> PlayfairError {
    PlayfairError::with_kind_and_source(ErrorCategory::Internal, ErrorKind::Io, msg, err)
}

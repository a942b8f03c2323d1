use std::path::Path;

use crate::board::Board;
use crate::error::ConfigError;
use crate::layout::{default_layout, Placement, DEFAULT_COLS, DEFAULT_ROWS};

/// Environment variable the binaries read the config path from.
pub const CONFIG_ENV: &str = "STACKSLIDE_CONFIG";

/// Engine configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rows: usize,
    pub cols: usize,
    /// Starting layout used by `reset`. The built-in layout when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Vec<Placement>>,
    /// Pause between steps of a scripted solve, in milliseconds.
    pub solve_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            layout: None,
            solve_delay_ms: 0,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Returns the starting layout: the configured one, or the built-in one.
    pub fn starting_layout(&self) -> Vec<Placement> {
        self.layout.clone().unwrap_or_else(default_layout)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::Validation("rows must be > 0".into()));
        }
        if self.cols == 0 {
            return Err(ConfigError::Validation("cols must be > 0".into()));
        }
        if self.rows > i32::MAX as usize || self.cols > i32::MAX as usize {
            return Err(ConfigError::Validation(
                "grid dimensions must fit in a signed 32-bit coordinate".into(),
            ));
        }
        Board::from_layout(self.rows, self.cols, &self.starting_layout())?;
        Ok(())
    }

    /// Generate a TOML string with all default values.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&EngineConfig::default())
    }
}

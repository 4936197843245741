//! Game configuration loaded from `config.toml`.
//!
//! ```toml
//! data_dir = "/home/me/.local/share/quest-chronicles/data"
//! save_dir = "/home/me/.local/share/quest-chronicles/saves"
//! log_file = "/home/me/.local/share/quest-chronicles/quest.log"
//! revive_cost = 25
//! ```
//!
//! Missing fields fall back to defaults under the platform data directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REVIVE_COST;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub data_dir: PathBuf,
    pub save_dir: PathBuf,
    /// Log output goes here so it does not draw over the terminal UI.
    pub log_file: Option<PathBuf>,
    /// Gold charged to revive after losing a battle.
    pub revive_cost: u32,
}

/// Root directory for game files, `./quest-chronicles` when the platform
/// directory cannot be determined.
pub fn default_root() -> PathBuf {
    ProjectDirs::from("", "", "quest-chronicles")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("quest-chronicles"))
}

pub fn default_config_path() -> PathBuf {
    ProjectDirs::from("", "", "quest-chronicles")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

impl Default for GameConfig {
    fn default() -> Self {
        let root = default_root();
        Self {
            data_dir: root.join("data"),
            save_dir: root.join("saves"),
            log_file: Some(root.join("quest-chronicles.log")),
            revive_cost: DEFAULT_REVIVE_COST,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| anyhow!("{}", e))
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Writes this configuration to `path`, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| anyhow!("Failed to serialize config: {}", e))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

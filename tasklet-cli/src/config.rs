//! User configuration, loaded through confy

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use tasklet_core::{Priority, SavePolicy};

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_directory: String,
    /// Periodic save interval for the interactive shell
    pub autosave_interval_secs: u64,
    /// Quiet period after input before the shell saves
    pub autosave_debounce_ms: u64,
    pub default_priority: String,
    pub default_category: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_directory = ProjectDirs::from("", "", "tasklet")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".tasklet"));

        Self {
            data_directory: data_directory.to_string_lossy().into_owned(),
            autosave_interval_secs: 30,
            autosave_debounce_ms: 1000,
            default_priority: "medium".to_string(),
            default_category: tasklet_core::task::DEFAULT_CATEGORY.to_string(),
        }
    }
}

impl Config {
    /// Load from an explicit file, or from confy's default location
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        let cfg = match path {
            Some(path) => confy::load_path(path)?,
            None => confy::load("tasklet", None)?,
        };
        Ok(cfg)
    }

    pub fn save_policy(&self) -> SavePolicy {
        SavePolicy {
            interval: Duration::from_secs(self.autosave_interval_secs),
            debounce: Duration::from_millis(self.autosave_debounce_ms),
        }
    }

    pub fn default_priority(&self) -> Result<Priority> {
        self.default_priority.parse().map_err(|_| {
            CliError::validation(
                "default_priority",
                format!("'{}' is not one of high, medium, low", self.default_priority),
            )
        })
    }
}

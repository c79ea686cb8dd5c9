use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::batch::{BatchOptions, DEFAULT_SLOT_COUNT};

/// Text the first slot starts with, and is restored to on reset.
pub const DEFAULT_TEXT: &str = "34 1E 08 AC 0D";

/// Application configuration stored as TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Number of input slots on the form.
    #[serde(default = "default_slot_count")]
    pub slot_count: usize,
    /// Initial text of the first slot.
    #[serde(default = "default_text")]
    pub default_text: String,
    /// Evaluate slots in parallel.
    #[serde(default)]
    pub parallel: bool,
}

fn default_slot_count() -> usize {
    DEFAULT_SLOT_COUNT
}

fn default_text() -> String {
    DEFAULT_TEXT.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            default_text: default_text(),
            parallel: false,
        }
    }
}

impl AppConfig {
    /// Config file path: ~/.config/iiccrc/config.toml
    pub fn path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("iiccrc");
        config_dir.join("config.toml")
    }

    /// Load config from disk, or return defaults.
    pub fn load() -> Self {
        let path = Self::path();
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => return Self::from_toml(&contents),
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
        }
        Self::default()
    }

    /// Parse config text, falling back to defaults on error.
    pub fn from_toml(contents: &str) -> Self {
        match toml::from_str::<AppConfig>(contents) {
            Ok(config) => config.normalized(),
            Err(e) => {
                tracing::warn!("Failed to parse config: {}", e);
                Self::default()
            }
        }
    }

    fn normalized(mut self) -> Self {
        if self.slot_count == 0 {
            tracing::warn!("slot_count must be at least 1, using 1");
            self.slot_count = 1;
        }
        self
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            slot_count: self.slot_count,
            absent_text: String::new(),
            parallel: self.parallel,
        }
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

//! User settings for ZenBudget
//!
//! Application preferences that are local to this machine: currency symbol,
//! which profile to open, how long to debounce document writes, and where
//! the AI endpoint lives. Budget data itself lives in the user document.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::paths::BudgetPaths;
use crate::error::BudgetError;

/// Environment variable holding the AI service key
pub const AI_KEY_ENV: &str = "ZENBUDGET_AI_KEY";

/// Document sync settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Quiet period before a pending write is flushed
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl SyncSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Receipt scanning and insight generation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSettings {
    /// Base URL of the AI gateway; AI features are off when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl AiSettings {
    /// API key from the environment, if present and non-empty
    pub fn api_key(&self) -> Option<String> {
        std::env::var(AI_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// User settings for ZenBudget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Profile opened when `--user` is not given
    #[serde(default = "default_user")]
    pub default_user: String,

    #[serde(default)]
    pub sync: SyncSettings,

    #[serde(default)]
    pub ai: AiSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_user() -> String {
    "default".to_string()
}

fn default_debounce_ms() -> u64 {
    1000
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            default_user: default_user(),
            sync: SyncSettings::default(),
            ai: AiSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BudgetError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

use crate::core::reindent::ReindentMode;
use crate::direction::Direction;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Translation service
    pub base_url: String,
    pub forward_path: String,
    pub backward_path: String,
    pub timeout_secs: Option<u64>,

    // Formatting
    pub reindent_mode: ReindentMode,
    pub indent_size: usize,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            forward_path: "/translate".to_string(),
            backward_path: "/translate_back".to_string(),
            timeout_secs: None,
            reindent_mode: ReindentMode::Flat,
            indent_size: 4,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Full endpoint URL for a translation direction
    pub fn endpoint(&self, direction: Direction) -> String {
        let path = match direction {
            Direction::JavaToTarget => &self.forward_path,
            Direction::TargetToJava => &self.backward_path,
        };
        join_url(&self.base_url, path)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("codetrans")
        .join("config.json")
}

// ABOUTME: Configuration management for evory-admin
// Backend connection, report downloads and UI preferences, persisted as
// TOML under ~/.evory-admin/

#![allow(dead_code)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Report export settings.
    #[serde(default)]
    pub reports: ReportConfig,

    /// UI preferences.
    #[serde(default)]
    pub ui: UiPreferences,
}

/// Connection settings for the platform backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// CSRF token forwarded with the driver registration multipart, when
    /// the deployment requires one. Provisioning it is out of scope here.
    #[serde(default)]
    pub csrf_token: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            csrf_token: None,
        }
    }
}

/// Where exported spreadsheets land.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory for downloaded `.xlsx` reports.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
        }
    }
}

/// UI preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Quiet period before a company search fires, in milliseconds.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .unwrap_or_else(|| app_dir().join("reportes"))
}

fn default_search_debounce_ms() -> u64 {
    300
}

/// Application data directory (`~/.evory-admin`).
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".evory-admin")
}

/// Path of the configuration file.
pub fn config_path() -> PathBuf {
    app_dir().join("config.toml")
}

impl AppConfig {
    /// Load the config file, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Persist the config, creating the app directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }
}

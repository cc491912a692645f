use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{model::ThemePreference, provider::wttr::DEFAULT_BASE_URL};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const POPULAR_CITIES: &[&str] = &[
    "New York",
    "London",
    "Tokyo",
    "Paris",
    "Sydney",
    "Dubai",
    "Singapore",
    "Mumbai",
];

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// theme = "dark"
/// base_url = "https://wttr.in"
/// timeout_secs = 10
/// quick_cities = ["Berlin", "Lisbon"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemePreference,
    pub base_url: String,
    pub timeout_secs: u64,
    pub quick_cities: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemePreference::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            quick_cities: POPULAR_CITIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Config {
    /// Zero is treated as "use the default", never as "no timeout".
    pub fn request_timeout(&self) -> Duration {
        let secs = if self.timeout_secs == 0 { DEFAULT_TIMEOUT_SECS } else { self.timeout_secs };
        Duration::from_secs(secs)
    }

    /// Load config from the platform location, or defaults on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "wttr-lookup", "wttr-lookup")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Persistence for the theme flag: read once at startup, written on every toggle.
pub trait SettingsStore: Send + Sync {
    fn load(&self) -> Result<ThemePreference>;
    fn save(&self, pref: ThemePreference) -> Result<()>;
}

/// Keeps the theme inside the TOML config file, leaving other keys alone.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(Config::config_file_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<ThemePreference> {
        Ok(Config::load_from(&self.path)?.theme)
    }

    fn save(&self, pref: ThemePreference) -> Result<()> {
        let mut cfg = Config::load_from(&self.path)?;
        cfg.theme = pref;
        cfg.save_to(&self.path)?;
        tracing::debug!(theme = %pref, path = %self.path.display(), "theme saved");
        Ok(())
    }
}

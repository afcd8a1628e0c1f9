use crate::model::NotificationTiming;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How often the UI wakes up without input
    pub tick_rate_ms: u64,
    /// How long a toast stays before its exit slide
    pub notification_dwell_ms: u64,
    pub notification_exit_ms: u64,
    pub notification_enter_ms: u64,
    /// Artificial delay of the simulated backend
    pub simulated_latency_ms: u64,
    /// Log file location; defaults to `skillhub.log` in the config directory
    pub log_file: Option<String>,
    /// Filter directive used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            notification_dwell_ms: 3000,
            notification_exit_ms: 300,
            notification_enter_ms: 300,
            simulated_latency_ms: 150,
            log_file: None,
            log_filter: "info".to_string(),
        }
    }
}

/// Where the config returned by `load_or_init` came from
#[derive(Debug)]
pub enum ConfigOrigin {
    /// Read from an existing file
    Loaded(PathBuf),
    /// No file existed; defaults were written to this path
    Created(PathBuf),
    /// Running on defaults; any existing file is left untouched
    Fallback(String),
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".skillhub-tui"))
    }

    /// Load the saved config, writing the defaults on first run
    pub fn load_or_init() -> (Config, ConfigOrigin) {
        match Self::config_dir() {
            Some(dir) => Self::load_or_init_in(&dir),
            None => (
                Config::default(),
                ConfigOrigin::Fallback("Could not determine config directory".to_string()),
            ),
        }
    }

    /// Like `load_or_init`, rooted at `dir`
    ///
    /// Defaults are only written when no config file exists. A file that
    /// cannot be read or parsed is never overwritten.
    pub fn load_or_init_in(dir: &Path) -> (Config, ConfigOrigin) {
        let path = dir.join(CONFIG_FILE);
        match Self::read_from(&path) {
            Ok(Some(config)) => (config, ConfigOrigin::Loaded(path)),
            Ok(None) => {
                let config = Config::default();
                let origin = match config.save_to(dir) {
                    Ok(()) => ConfigOrigin::Created(path),
                    Err(err) => ConfigOrigin::Fallback(format!("{:#}", err)),
                };
                (config, origin)
            }
            Err(err) => (Config::default(), ConfigOrigin::Fallback(format!("{:#}", err))),
        }
    }

    /// `Ok(None)` when the file does not exist
    pub fn read_from(path: &Path) -> Result<Option<Config>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_json(&contents)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(Some(config))
    }

    pub fn from_json(contents: &str) -> Result<Config> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Save the config as `config.json` inside `dir`
    pub fn save_to(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(CONFIG_FILE), contents)?;

        Ok(())
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        match self.log_file {
            Some(ref path) => Some(PathBuf::from(path)),
            None => Self::config_dir().map(|dir| dir.join("skillhub.log")),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    pub fn notification_timing(&self) -> NotificationTiming {
        NotificationTiming {
            enter: Duration::from_millis(self.notification_enter_ms),
            dwell: Duration::from_millis(self.notification_dwell_ms),
            exit: Duration::from_millis(self.notification_exit_ms),
        }
    }
}

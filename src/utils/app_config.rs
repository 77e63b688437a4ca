/// Application configuration management
/// Stores user preferences in ~/.config/vps-control/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::utils::constants::{
    CONSOLE_REPLY_DELAY, DASHBOARD_TICK, DOMAIN_PROPAGATION_DELAY, START_DELAY, STOP_DELAY,
    TELEMETRY_INTERVAL,
};

/// Delays of the simulated operations, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub start_delay_ms: u64,
    pub stop_delay_ms: u64,
    pub console_reply_ms: u64,
    pub domain_propagation_ms: u64,
    pub telemetry_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: START_DELAY.as_millis() as u64,
            stop_delay_ms: STOP_DELAY.as_millis() as u64,
            console_reply_ms: CONSOLE_REPLY_DELAY.as_millis() as u64,
            domain_propagation_ms: DOMAIN_PROPAGATION_DELAY.as_millis() as u64,
            telemetry_interval_ms: TELEMETRY_INTERVAL.as_millis() as u64,
        }
    }
}

impl SimulationConfig {
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    pub fn stop_delay(&self) -> Duration {
        Duration::from_millis(self.stop_delay_ms)
    }

    pub fn console_reply(&self) -> Duration {
        Duration::from_millis(self.console_reply_ms)
    }

    pub fn domain_propagation(&self) -> Duration {
        Duration::from_millis(self.domain_propagation_ms)
    }

    pub fn telemetry_interval(&self) -> Duration {
        // A zero period would make tokio::time::interval panic
        Duration::from_millis(self.telemetry_interval_ms.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub tick_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tick_ms: DASHBOARD_TICK.as_millis() as u64,
        }
    }
}

impl DashboardConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_file: Option<String>,
    pub export_dir: Option<String>,
    pub simulation: SimulationConfig,
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    /// Directory holding the config file and the default log file
    pub fn config_dir() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .context("Could not determine the user config directory")?;
        Ok(base.join("vps-control"))
    }

    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }

    /// Log file path, falling back to one next to the config file
    pub fn log_file_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(Self::config_dir()?.join("vps-control.log")),
        }
    }

    /// Directory console exports are written to
    pub fn export_dir_path(&self) -> PathBuf {
        self.export_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.simulation.start_delay(), Duration::from_secs(3));
        assert_eq!(config.simulation.stop_delay(), Duration::from_secs(2));
        assert_eq!(config.simulation.console_reply(), Duration::from_millis(300));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[simulation]\nstart_delay_ms = 10\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.simulation.start_delay_ms, 10);
        assert_eq!(config.simulation.stop_delay_ms, 2000);
        assert_eq!(config.dashboard.tick_ms, 2000);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.export_dir = Some("/tmp/exports".to_string());
        config.dashboard.tick_ms = 500;
        config.save_to(&path).unwrap();

        let reloaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.export_dir_path(), PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "simulation = 5").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}

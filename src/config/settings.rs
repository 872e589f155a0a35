// Settings loaded from config.toml.
// Every key is optional; a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::Tab;
use crate::error::{PujiError, Result};

/// User settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Input poll timeout when no timer is pending.
    pub tick_rate_ms: u64,
    /// Length of the tab-switch fade.
    pub transition_ms: u64,
    /// Delay before risk gauges reveal their value.
    pub gauge_delay_ms: u64,
    /// Tab shown at startup.
    pub default_tab: Tab,
    /// Fixture file replacing the embedded mock data.
    pub fixtures: Option<PathBuf>,
    /// Log filter used when RUST_LOG is unset.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            transition_ms: 300,
            gauge_delay_ms: 100,
            default_tab: Tab::Home,
            fixtures: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents, path)
    }

    /// Parse settings text. `path` is only used in error messages.
    pub fn from_toml(contents: &str, path: &Path) -> Result<Self> {
        let settings: Settings = toml::from_str(contents).map_err(|e| PujiError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if settings.tick_rate_ms == 0 {
            return Err(PujiError::Config {
                path: path.to_path_buf(),
                message: "tick_rate_ms must be greater than zero".to_string(),
            });
        }

        Ok(settings)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, tab: Option<Tab>, fixtures: Option<PathBuf>) -> Self {
        if let Some(tab) = tab {
            self.default_tab = tab;
        }
        if fixtures.is_some() {
            self.fixtures = fixtures;
        }
        self
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn gauge_delay(&self) -> Duration {
        Duration::from_millis(self.gauge_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.transition(), Duration::from_millis(300));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "default_tab = \"tcm\"\ntransition_ms = 150\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.default_tab, Tab::Tcm);
        assert_eq!(settings.transition_ms, 150);
        assert_eq!(settings.tick_rate_ms, 100);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Settings::from_toml("colour = \"blue\"\n", Path::new("config.toml")).unwrap_err();
        assert!(matches!(err, PujiError::Config { .. }));
    }

    #[test]
    fn test_zero_tick_rate_is_rejected() {
        assert!(Settings::from_toml("tick_rate_ms = 0\n", Path::new("config.toml")).is_err());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings {
            fixtures: Some(PathBuf::from("a.json")),
            ..Settings::default()
        };

        let kept = settings.clone().with_overrides(None, None);
        assert_eq!(kept, settings);

        let overridden = settings.with_overrides(Some(Tab::Profile), Some(PathBuf::from("b.json")));
        assert_eq!(overridden.default_tab, Tab::Profile);
        assert_eq!(overridden.fixtures, Some(PathBuf::from("b.json")));
    }
}

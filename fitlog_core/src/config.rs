//! Configuration file support for fitlog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fitlog/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Export destination configuration
///
/// When unset, exports land in `<data_dir>/exports`.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct ExportConfig {
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

/// Dashboard view sizes
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_weeks_back")]
    pub weeks_back: u32,

    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    #[serde(default = "default_meal_limit")]
    pub meal_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            weeks_back: default_weeks_back(),
            recent_limit: default_recent_limit(),
            meal_limit: default_meal_limit(),
        }
    }
}

/// Ten years of weekly report rows
pub const MAX_WEEKS_BACK: u32 = 520;

// Default value functions
fn home_fallback(suffix: &str) -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(suffix),
        None => PathBuf::from("."),
    }
}

fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| home_fallback(".local/share"));
    base.join("fitlog")
}

fn default_weeks_back() -> u32 {
    4
}

fn default_recent_limit() -> usize {
    5
}

fn default_meal_limit() -> usize {
    10
}

impl Config {
    /// Load configuration from `path`, or defaults when no file exists there
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| home_fallback(".config"));
        base.join("fitlog").join("config.toml")
    }

    /// Directory exports are written to
    pub fn export_dir(&self, data_dir: &Path) -> PathBuf {
        self.export
            .export_dir
            .clone()
            .unwrap_or_else(|| data_dir.join("exports"))
    }

    pub fn validate(&self) -> Result<()> {
        let weeks = self.dashboard.weeks_back;
        if weeks == 0 || weeks > MAX_WEEKS_BACK {
            return Err(Error::Config(format!(
                "dashboard.weeks_back must be 1-{}, got {}",
                MAX_WEEKS_BACK, weeks
            )));
        }
        Ok(())
    }

    /// Validate and save the configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.data.data_dir.ends_with("fitlog"));
        assert_eq!(config.dashboard.weeks_back, 4);
        assert_eq!(config.dashboard.recent_limit, 5);
        assert_eq!(config.dashboard.meal_limit, 10);
        assert!(config.export.export_dir.is_none());
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.dashboard.recent_limit = 8;
        config.export.export_dir = Some(temp_dir.path().join("out"));
        config.save_to(&path).unwrap();

        let parsed = Config::load_from(&path).unwrap();
        assert_eq!(parsed.dashboard.recent_limit, 8);
        assert_eq!(parsed.export.export_dir, config.export.export_dir);
        assert_eq!(parsed.data.data_dir, config.data.data_dir);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[dashboard]
weeks_back = 6
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.dashboard.weeks_back, 6);
        assert_eq!(config.dashboard.recent_limit, 5); // default
    }

    #[test]
    fn test_export_dir_defaults_under_data_dir() {
        let config = Config::default();
        let data_dir = PathBuf::from("/tmp/fitlog-data");
        assert_eq!(config.export_dir(&data_dir), data_dir.join("exports"));
    }

    #[test]
    fn test_zero_weeks_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[dashboard]\nweeks_back = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_weeks_back_upper_bound() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[dashboard]\nweeks_back = 4000000000\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));

        let mut config = Config::default();
        config.dashboard.weeks_back = MAX_WEEKS_BACK;
        assert!(config.validate().is_ok());
        config.dashboard.weeks_back = MAX_WEEKS_BACK + 1;
        assert!(config.save_to(&path).is_err());
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.dashboard.weeks_back, 4);
    }
}

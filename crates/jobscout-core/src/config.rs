//! Configuration management for jobscout.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration.
///
/// This is loaded from `~/.config/jobscout/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where identifier, record and credential files live
    pub paths: PathsConfig,
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Scraping behavior settings
    pub scraping: ScrapingConfig,
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error here since the
    /// user asked for it by name.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `JOBSCOUT_HEADLESS`: Override browser headless mode (true/false)
    /// - `JOBSCOUT_CHROME`: Override the browser executable path
    /// - `JOBSCOUT_WAIT_TIMEOUT_SECS`: Override the element wait timeout
    pub fn load_with_env(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in practice).
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("JOBSCOUT_HEADLESS") {
            if let Ok(headless) = val.parse() {
                self.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Some(val) = lookup("JOBSCOUT_CHROME") {
            if !val.is_empty() {
                tracing::debug!("Override browser.executable from env: {}", val);
                self.browser.executable = Some(PathBuf::from(val));
            }
        }

        if let Some(val) = lookup("JOBSCOUT_WAIT_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.scraping.wait_timeout_secs = secs;
                tracing::debug!("Override scraping.wait_timeout_secs from env: {}", secs);
            }
        }
    }

    /// Check values that would make scraping meaningless.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.scraping.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scraping.page_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.scraping.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scraping.poll_interval_ms".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/jobscout/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "jobscout", "jobscout").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// File locations, relative paths resolve against the working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding `jobs_<timestamp>.txt` identifier files
    pub id_dir: PathBuf,
    /// Directory holding the CSV record files
    pub info_dir: PathBuf,
    /// Two-line credential file (username, password)
    pub credentials_file: PathBuf,
    /// Identifier file used in test mode, inside `id_dir`
    pub test_id_file: String,
    /// Record file written in test mode, inside `info_dir`
    pub test_info_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            id_dir: PathBuf::from("job_id_dir"),
            info_dir: PathBuf::from("job_info_dir"),
            credentials_file: PathBuf::from("login.txt"),
            test_id_file: "test.txt".to_string(),
            test_info_file: "test.csv".to_string(),
        }
    }
}

impl PathsConfig {
    /// Full path of the test-mode identifier file.
    #[must_use]
    pub fn test_id_path(&self) -> PathBuf {
        self.id_dir.join(&self.test_id_file)
    }

    /// Full path of the test-mode record file.
    #[must_use]
    pub fn test_info_path(&self) -> PathBuf {
        self.info_dir.join(&self.test_info_file)
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Use a throwaway incognito profile
    pub incognito: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Navigation timeout in seconds
    pub navigation_timeout_secs: u64,
    /// Chrome/Chromium executable; auto-detected when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            incognito: true,
            window_width: 1920,
            window_height: 1080,
            navigation_timeout_secs: 30,
            executable: None,
        }
    }
}

impl BrowserConfig {
    /// Navigation timeout as a `Duration`.
    #[must_use]
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }
}

/// Scraping behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapingConfig {
    /// Entries per search results page (the site's fixed page size)
    pub page_size: u32,
    /// How long to poll for a page's readiness marker, in seconds
    pub wait_timeout_secs: u64,
    /// Interval between readiness polls, in milliseconds
    pub poll_interval_ms: u64,
    /// Extra pause after the readiness marker appears, for lazily rendered content
    pub settle_delay_ms: u64,
    /// TOML file overriding the built-in site definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_definition: Option<PathBuf>,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            page_size: 25,
            wait_timeout_secs: 10,
            poll_interval_ms: 250,
            settle_delay_ms: 1000,
            site_definition: None,
        }
    }
}

impl ScrapingConfig {
    /// Readiness wait timeout as a `Duration`.
    #[must_use]
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    /// Poll interval as a `Duration`.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Settle delay as a `Duration`.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.paths.id_dir, PathBuf::from("job_id_dir"));
        assert_eq!(config.paths.credentials_file, PathBuf::from("login.txt"));
        assert_eq!(config.scraping.page_size, 25);
        assert!(config.browser.headless);
        assert!(config.browser.executable.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[paths]"));
        assert!(toml_str.contains("[browser]"));
        assert!(toml_str.contains("[scraping]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.scraping.page_size, config.scraping.page_size);
    }

    #[test]
    fn test_config_load_from_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        let mut config = AppConfig::default();
        config.browser.headless = false;
        config.scraping.wait_timeout_secs = 3;

        let contents = toml::to_string_pretty(&config).expect("serialize config");
        fs::write(&config_path, contents).expect("write config file");

        let loaded = AppConfig::load_from(&config_path).expect("load config");
        assert!(!loaded.browser.headless);
        assert_eq!(loaded.scraping.wait_timeout_secs, 3);
    }

    #[test]
    fn test_load_from_missing_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let err = AppConfig::load_from(&tmp.path().join("absent.toml"))
            .expect_err("missing explicit config should fail");
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("JOBSCOUT_HEADLESS", "false"),
            ("JOBSCOUT_CHROME", "/opt/chrome/chrome"),
            ("JOBSCOUT_WAIT_TIMEOUT_SECS", "42"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| env.get(key).map(ToString::to_string));

        assert!(!config.browser.headless);
        assert_eq!(
            config.browser.executable,
            Some(PathBuf::from("/opt/chrome/chrome"))
        );
        assert_eq!(config.scraping.wait_timeout_secs, 42);
    }

    #[test]
    fn test_env_override_ignores_garbage() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| {
            (key == "JOBSCOUT_HEADLESS").then(|| "maybe".to_string())
        });
        assert!(config.browser.headless);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[paths]
id_dir = "ids"

[scraping]
settle_delay_ms = 0
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.paths.id_dir, PathBuf::from("ids"));
        assert_eq!(config.scraping.settle_delay_ms, 0);
        // These should be defaults
        assert_eq!(config.paths.info_dir, PathBuf::from("job_info_dir"));
        assert_eq!(config.scraping.page_size, 25);
        assert!(config.browser.headless);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut config = AppConfig::default();
        config.scraping.page_size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_test_mode_paths() {
        let paths = PathsConfig::default();
        assert_eq!(paths.test_id_path(), PathBuf::from("job_id_dir/test.txt"));
        assert_eq!(paths.test_info_path(), PathBuf::from("job_info_dir/test.csv"));
    }
}

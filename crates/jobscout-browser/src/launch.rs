use crate::error::{BrowserError, Result};
use jobscout_core::BrowserConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Everything needed to start the browser process
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub executable: Option<PathBuf>,
    pub headless: bool,
    pub incognito: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub navigation_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self::from_config(&BrowserConfig::default())
    }
}

impl LaunchOptions {
    /// Build launch options from the `[browser]` config section
    pub fn from_config(config: &BrowserConfig) -> Self {
        Self {
            executable: config.executable.clone(),
            headless: config.headless,
            incognito: config.incognito,
            window_width: config.window_width,
            window_height: config.window_height,
            navigation_timeout: config.navigation_timeout(),
            poll_interval: Duration::from_millis(250),
        }
    }

    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = Some(executable.into());
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Fail early when an explicit executable path points nowhere.
    pub fn check_executable(&self) -> Result<()> {
        match &self.executable {
            Some(path) if !path.is_file() => Err(BrowserError::ExecutableNotFound(
                path.display().to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Extra command line switches passed to Chrome
    pub fn extra_args(&self) -> Vec<&'static str> {
        let mut args = vec!["--disable-dev-shm-usage"];
        if self.incognito {
            args.push("--incognito");
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = BrowserConfig {
            headless: false,
            window_width: 1280,
            ..BrowserConfig::default()
        };
        let options = LaunchOptions::from_config(&config);
        assert!(!options.headless);
        assert_eq!(options.window_width, 1280);
        assert_eq!(options.navigation_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_executable_rejected() {
        let options = LaunchOptions::default().with_executable("/definitely/not/here/chrome");
        assert!(matches!(
            options.check_executable(),
            Err(BrowserError::ExecutableNotFound(_))
        ));
    }

    #[test]
    fn test_auto_detect_passes_check() {
        assert!(LaunchOptions::default().check_executable().is_ok());
    }

    #[test]
    fn test_incognito_switch() {
        let mut options = LaunchOptions::default();
        assert!(options.extra_args().contains(&"--incognito"));

        options.incognito = false;
        assert!(!options.extra_args().contains(&"--incognito"));
    }
}

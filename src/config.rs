//! Session configuration
//!
//! Read from `~/.webseek/config.json` when it exists, then overridden by
//! `WEBSEEK_*` environment variables. CLI flags are applied last by the binary.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::errors::{LocateError, Result};
use crate::webdriver::BrowserType;

pub const ENV_SMART_WAIT: &str = "WEBSEEK_SMART_WAIT";
pub const ENV_WEBDRIVER_URL: &str = "WEBSEEK_WEBDRIVER_URL";
pub const ENV_BROWSER: &str = "WEBSEEK_BROWSER";

/// Settings shared by every resolution in a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Smart-wait window in milliseconds; `None` turns smart wait off
    pub smart_wait_ms: Option<u64>,
    /// Context searched by text assertions when no scope is active
    pub root: String,
    /// WebDriver endpoint, the browser's default port when unset
    pub webdriver_url: Option<String>,
    pub browser: BrowserType,
    pub headless: bool,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        LocatorConfig {
            smart_wait_ms: None,
            root: "body".to_string(),
            webdriver_url: None,
            browser: BrowserType::Firefox,
            headless: true,
        }
    }
}

impl LocatorConfig {
    /// Smart-wait timeout, `None` when disabled
    pub fn smart_wait(&self) -> Option<Duration> {
        self.smart_wait_ms.map(Duration::from_millis)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".webseek").join("config.json"))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| LocateError::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| LocateError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load the config file if present and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => {
                debug!("Loading config from {}", path.display());
                Self::from_file(&path)?
            }
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Override fields from environment-like lookups
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SMART_WAIT) {
            self.smart_wait_ms = parse_smart_wait(&value)?;
        }
        if let Some(url) = lookup(ENV_WEBDRIVER_URL) {
            self.webdriver_url = Some(url);
        }
        if let Some(browser) = lookup(ENV_BROWSER) {
            self.browser = browser
                .parse()
                .map_err(|e: anyhow::Error| LocateError::Config(e.to_string()))?;
        }
        Ok(())
    }
}

/// `off`/`false` disables smart wait, anything else must be milliseconds
pub fn parse_smart_wait(value: &str) -> Result<Option<u64>> {
    match value.trim().to_lowercase().as_str() {
        "off" | "false" | "none" => Ok(None),
        ms => ms.parse::<u64>().map(Some).map_err(|_| {
            LocateError::Config(format!(
                "{} must be a number of milliseconds or 'off', got '{}'",
                ENV_SMART_WAIT, value
            ))
        }),
    }
}

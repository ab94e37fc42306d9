// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use deskfleet_app::Category;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "deskfleet";

const CONFIG_VERSION: i64 = 1;
const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT: &str = "10s";
const DEFAULT_LOG_LEVEL: &str = "info";

const CONFIG_PATH_ENV: &str = "DESKFLEET_CONFIG_PATH";
const API_URL_ENV: &str = "DESKFLEET_API_URL";
pub const LOG_ENV: &str = "DESKFLEET_LOG";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub api: Api,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: Api::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Api {
    pub base_url: Option<String>,
    pub timeout: Option<String>,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: Some(DEFAULT_BASE_URL.to_owned()),
            timeout: Some(DEFAULT_TIMEOUT.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub default_category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub dir: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            dir: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    /// Environment overrides are applied on top of the file.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            Self::read(path)?
        } else {
            Self::default()
        };
        if let Some(url) = env::var(API_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
        {
            config.api.base_url = Some(url);
        }
        config.validate(path)?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [api], [ui], and [log]",
                    path.display()
                )
            })?;
        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.base_url().trim().is_empty() {
            bail!(
                "api.base_url in {} must not be empty (or set {API_URL_ENV})",
                path.display()
            );
        }

        if let Some(timeout) = &self.api.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "api.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        if let Some(category) = &self.ui.default_category
            && !matches!(
                Category::parse(category.trim()),
                Some(Category::Employee | Category::Computers)
            )
        {
            bail!(
                "ui.default_category in {} must be \"employee\" or \"computers\", got {category:?}",
                path.display()
            );
        }

        Ok(())
    }

    pub fn base_url(&self) -> &str {
        self.api
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn timeout(&self) -> Result<Duration> {
        parse_duration(self.api.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT))
    }

    pub fn default_category(&self) -> Category {
        self.ui
            .default_category
            .as_deref()
            .and_then(|value| Category::parse(value.trim()))
            .unwrap_or(Category::Computers)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// `None` when no directory is configured and the platform has no data
    /// directory.
    pub fn log_dir(&self) -> Option<PathBuf> {
        match &self.log.dir {
            Some(dir) => Some(PathBuf::from(dir)),
            None => dirs::data_dir().map(|root| root.join(APP_NAME).join("logs")),
        }
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# deskfleet config\n# Place this file at: {}\n\nversion = 1\n\n[api]\n# Overridden by {API_URL_ENV} when set.\nbase_url = \"{DEFAULT_BASE_URL}\"\ntimeout = \"{DEFAULT_TIMEOUT}\"\n\n[ui]\n# employee or computers\ndefault_category = \"computers\"\n\n[log]\n# Overridden by {LOG_ENV} when set.\nlevel = \"{DEFAULT_LOG_LEVEL}\"\n# Optional. Default is the platform data dir (for example ~/.local/share/deskfleet/logs)\n# dir = \"/absolute/path/to/logs\"\n",
            path.display(),
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    let raw = raw.trim();
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(mins * 60));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 5s)")
}

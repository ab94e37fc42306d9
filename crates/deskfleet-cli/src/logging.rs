// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::{APP_NAME, LOG_ENV};

/// Builds the filter from `DESKFLEET_LOG` when set, otherwise from the
/// configured level.
pub fn build_filter(configured: &str) -> Result<EnvFilter> {
    let directives = env::var(LOG_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| configured.to_owned());
    EnvFilter::try_new(&directives)
        .with_context(|| format!("invalid log level {directives:?}; try info, debug, or warn"))
}

/// Installs a subscriber writing to a daily-rolled file under `dir`. The
/// terminal belongs to the UI, so nothing is logged when `dir` is `None`.
pub fn init(level: &str, dir: Option<&Path>) -> Result<Option<PathBuf>> {
    let filter = build_filter(level)?;
    let Some(dir) = dir else {
        return Ok(None);
    };
    fs::create_dir_all(dir).with_context(|| format!("create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, format!("{APP_NAME}.log"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))?;
    Ok(Some(dir.to_path_buf()))
}

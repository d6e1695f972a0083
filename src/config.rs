//! Runtime configuration read from the environment.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::dashboard::DEFAULT_SCRIPT_TIMEOUT;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// JSON document holding the persisted user profile.
    pub profile_path: PathBuf,
    /// Directory containing the data scripts and their `data/api_data` output.
    pub project_dir: PathBuf,
    pub script_timeout: Duration,
    pub log_file_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Reads configuration through `get`, so tests need not touch the
    /// process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let profile_path = get("AIR_EXPOSURE_PROFILE_PATH")
            .unwrap_or_else(|| "data/profile.json".to_string());
        let project_dir = get("AIR_EXPOSURE_PROJECT_DIR").unwrap_or_else(|| ".".to_string());
        let script_timeout = match get("AIR_EXPOSURE_SCRIPT_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .with_context(|| format!("invalid AIR_EXPOSURE_SCRIPT_TIMEOUT_SECS: {raw:?}"))?,
            ),
            None => DEFAULT_SCRIPT_TIMEOUT,
        };
        let log_file_path =
            get("LOG_FILE_PATH").unwrap_or_else(|| "logs/air_exposure.log".to_string());

        Ok(Self {
            profile_path: profile_path.into(),
            project_dir: project_dir.into(),
            script_timeout,
            log_file_path: log_file_path.into(),
        })
    }
}

// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::validation::MIN_PASSWORD_LENGTH;

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "ridesafe.toml";
/// Prefix of environment overrides, e.g. `RIDESAFE_LOG_LEVEL=debug`
pub const ENV_PREFIX: &str = "RIDESAFE_";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Directory holding the CLI's persistent token store
    pub data_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Simulated account creation delay
    pub signup_delay_ms: u64,
    /// Simulated credential check delay
    pub login_delay_ms: u64,
    /// Minimum signup password length
    pub min_password_length: usize,
    /// Mark the session cookie `Secure`
    pub cookie_secure: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            log_json: false,
            signup_delay_ms: 1000,
            login_delay_ms: 600,
            min_password_length: MIN_PASSWORD_LENGTH,
            cookie_secure: false,
        }
    }
}

impl Settings {
    /// Load settings: defaults, then `ridesafe.toml`, then `explicit` if
    /// given, then `RIDESAFE_*` environment variables. A named `explicit`
    /// file must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                bail!("config file `{}` not found", path.display());
            }
        }
        let settings: Settings = Self::figment(explicit).extract()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(DEFAULT_CONFIG_FILE));
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            bail!("invalid log level `{}`", self.log_level);
        }
        if self.min_password_length == 0 {
            bail!("min_password_length must be at least 1");
        }
        Ok(())
    }

    pub fn signup_delay(&self) -> Duration {
        Duration::from_millis(self.signup_delay_ms)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}

#[cfg(test)]
mod config_tests;

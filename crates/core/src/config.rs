//! Runtime configuration.
//!
//! Values come from `<config_dir>/solarp2p/config.toml`, overlaid by
//! `SOLARP2P__*` environment variables. Every key has a default so an empty
//! or missing file yields a working client.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Directory under the platform config dir holding the config file.
pub const CONFIG_DIR_NAME: &str = "solarp2p";
/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SOLARP2P";

const DEFAULT_CONFIG: &str = r#"# Solar P2P client configuration.
# Every key is optional; environment variables such as
# SOLARP2P__API_BASE_URL override values from this file.

# Base URL of the registration backend.
api_base_url = "http://localhost:8000"
# Timeout for backend requests, in seconds.
request_timeout_secs = 10
# Link opened by the Support menu entry.
support_url = "https://wa.me/918861289233"
# Seconds before an OTP can be resent.
otp_resend_secs = 30
# How long toasts stay visible, in milliseconds.
toast_ttl_ms = 3000

[wallet]
# Simulated wallet round-trip, in milliseconds.
delay_ms = 2000
# Probability that a simulated wallet call succeeds.
success_rate = 0.7
# Fixed RNG seed for reproducible wallet outcomes.
# seed = 42
"#;

/// Settings of the simulated CBDC wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Delay before a wallet call resolves.
    pub delay_ms: u64,
    /// Probability of success in `[0, 1]`.
    pub success_rate: f64,
    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            success_rate: 0.7,
            seed: None,
        }
    }
}

impl WalletConfig {
    /// Delay as a [`Duration`].
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the registration backend.
    pub api_base_url: String,
    /// Timeout for backend requests, in seconds.
    pub request_timeout_secs: u64,
    /// Link opened by the Support menu entry.
    pub support_url: String,
    /// Seconds before an OTP can be resent.
    pub otp_resend_secs: u32,
    /// Toast lifetime in milliseconds.
    pub toast_ttl_ms: u64,
    /// Simulated wallet settings.
    pub wallet: WalletConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 10,
            support_url: "https://wa.me/918861289233".to_string(),
            otp_resend_secs: 30,
            toast_ttl_ms: 3000,
            wallet: WalletConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from the default config path and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load from `path` (which may not exist) and the environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: &Path, env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env.prefix_separator("__").separator("__").try_parsing(true))
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;
        let config: AppConfig = settings
            .try_deserialize()
            .context("invalid configuration values")?;
        config.validate()?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Reject values the client cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            bail!("api_base_url must not be empty");
        }
        if self.otp_resend_secs == 0 {
            bail!("otp_resend_secs must be greater than zero");
        }
        if !(0.0..=1.0).contains(&self.wallet.success_rate) {
            bail!(
                "wallet.success_rate must be between 0 and 1, got {}",
                self.wallet.success_rate
            );
        }
        Ok(())
    }

    /// Backend request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Toast lifetime.
    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }
}

/// Location of the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// Write the commented default config if no file exists yet.
pub fn ensure_default_config() -> Result<()> {
    write_default_config(&config_path())
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote default configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_with_env(&dir.path().join("absent.toml"), no_env())?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    }

    #[test]
    fn default_file_round_trips_to_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        write_default_config(&path)?;
        assert!(path.exists());

        let config = AppConfig::load_with_env(&path, no_env())?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    }

    #[test]
    fn existing_file_is_not_overwritten() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "otp_resend_secs = 5\n")?;
        write_default_config(&path)?;
        assert_eq!(fs::read_to_string(&path)?, "otp_resend_secs = 5\n");
        Ok(())
    }

    #[test]
    fn file_and_environment_override_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "api_base_url = \"http://10.0.0.5:9000\"\n[wallet]\nseed = 7\n",
        )?;
        let env = Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::from([(
            "SOLARP2P__WALLET__SUCCESS_RATE".to_string(),
            "1.0".to_string(),
        )])));

        let config = AppConfig::load_with_env(&path, env)?;
        assert_eq!(config.api_base_url, "http://10.0.0.5:9000");
        assert_eq!(config.wallet.seed, Some(7));
        assert_eq!(config.wallet.success_rate, 1.0);
        assert_eq!(config.wallet.delay_ms, 2000);
        Ok(())
    }

    #[test]
    fn validation_rejects_unusable_values() {
        let mut config = AppConfig::default();
        config.wallet.success_rate = 1.5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.otp_resend_secs = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.api_base_url = "  ".to_string();
        assert!(config.validate().is_err());

        assert!(AppConfig::default().validate().is_ok());
    }
}

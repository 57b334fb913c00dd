//! # Configuration State
//!
//! Storefront settings loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BLOOMY_DB_PATH=/tmp/bloomy.db                                      │
//! │     BLOOMY_CURRENCY=USD                                                │
//! │     BLOOMY_DELIVERY_FEE=5.00                                           │
//! │     BLOOMY_PLATFORM=web                                                │
//! │     BLOOMY_ROUND_DISPLAY=false                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/bloomy/bloomy.toml (Linux)                               │
//! │     ~/Library/Application Support/com.bloomy.storefront/bloomy.toml    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     AZN, 5.00 delivery, native platform, rounded totals                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # bloomy.toml
//! currency = "AZN"
//! delivery_fee_cents = 500
//! platform = "native"
//! round_display = true
//! notification_delay_ms = 1000
//! database_path = "/var/lib/bloomy/bloomy.db"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};

use bloomy_core::{Currency, Money, DELIVERY_FEE};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

const CONFIG_FILE: &str = "bloomy.toml";
const DATABASE_FILE: &str = "bloomy.db";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine app data directory")]
    NoDataDir,
}

// =============================================================================
// Platform
// =============================================================================

/// Where the storefront runs.
///
/// ## Notification Behavior
/// ```text
/// NATIVE  → payment notice scheduled as a local notification, recorded
///           into the history when it is delivered
/// WEB     → no local notifications; the notice goes straight into the
///           history
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Native,
    Web,
}

impl Platform {
    pub fn supports_local_notifications(&self) -> bool {
        matches!(self, Platform::Native)
    }
}

impl std::str::FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "native" | "ios" | "android" => Ok(Platform::Native),
            "web" => Ok(Platform::Web),
            other => Err(ConfigError::Invalid(format!(
                "Unknown platform: '{}'. Valid options: native, web",
                other
            ))),
        }
    }
}

// =============================================================================
// Config State
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// SQLite file. `None` resolves to the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Currency every price is shown in.
    pub currency: Currency,

    /// Flat delivery fee, in cents.
    pub delivery_fee_cents: i64,

    pub platform: Platform,

    /// Show cart and checkout totals as whole units.
    pub round_display: bool,

    /// Delay before the payment notification fires.
    pub notification_delay_ms: u64,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            database_path: None,
            currency: Currency::default(),
            delivery_fee_cents: DELIVERY_FEE.cents(),
            platform: Platform::default(),
            round_display: true,
            notification_delay_ms: 1000,
        }
    }
}

impl ConfigState {
    /// Loads configuration from file and environment.
    ///
    /// ## Loading Order
    /// 1. Start with defaults
    /// 2. Load from TOML file (if exists)
    /// 3. Override with environment variables
    /// 4. Validate
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) => Self::read_file(&path)?,
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Defaults plus environment overrides, no file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delivery_fee_cents < 0 {
            return Err(ConfigError::Invalid(
                "delivery_fee_cents must not be negative".into(),
            ));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `BLOOMY_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("BLOOMY_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }

        if let Some(currency) = lookup("BLOOMY_CURRENCY") {
            match currency.parse() {
                Ok(parsed) => self.currency = parsed,
                Err(e) => warn!("Ignoring BLOOMY_CURRENCY: {}", e),
            }
        }

        if let Some(fee) = lookup("BLOOMY_DELIVERY_FEE") {
            match Money::parse_label(&fee) {
                Ok(parsed) => self.delivery_fee_cents = parsed.cents(),
                Err(e) => warn!("Ignoring BLOOMY_DELIVERY_FEE: {}", e),
            }
        }

        if let Some(platform) = lookup("BLOOMY_PLATFORM") {
            match platform.parse() {
                Ok(parsed) => self.platform = parsed,
                Err(e) => warn!("Ignoring BLOOMY_PLATFORM: {}", e),
            }
        }

        if let Some(round) = lookup("BLOOMY_ROUND_DISPLAY") {
            match round.trim().parse::<bool>() {
                Ok(parsed) => self.round_display = parsed,
                Err(_) => warn!(value = %round, "Ignoring BLOOMY_ROUND_DISPLAY"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Resolves the SQLite file path.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.bloomy.storefront/bloomy.db`
    /// - **Windows**: `%APPDATA%\bloomy\storefront\data\bloomy.db`
    /// - **Linux**: `~/.local/share/storefront/bloomy.db`
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
            .ok_or(ConfigError::NoDataDir)
    }

    pub fn delivery_fee(&self) -> Money {
        Money::from_cents(self.delivery_fee_cents)
    }

    pub fn notification_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.notification_delay_ms)
    }

    /// Formats an amount the way cart and checkout totals are shown.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(9550)), "96 AZN");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        self.currency.format(amount, self.round_display)
    }

    /// Formats a catalog price. Prices are always shown exactly.
    pub fn format_price(&self, amount: Money) -> String {
        self.currency.format(amount, false)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "bloomy", "storefront")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::default();
        assert_eq!(config.currency, Currency::Azn);
        assert_eq!(config.delivery_fee(), Money::from_major(5));
        assert_eq!(config.platform, Platform::Native);
        assert!(config.round_display);
        assert_eq!(config.notification_delay().as_secs(), 1);
    }

    #[test]
    fn test_format_currency() {
        let mut config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(9550)), "96 AZN");
        assert_eq!(config.format_price(Money::from_major(45)), "45.00 AZN");

        config.currency = Currency::Usd;
        config.round_display = false;
        assert_eq!(config.format_currency(Money::from_cents(9550)), "$95.50");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bloomy.toml");
        std::fs::write(
            &path,
            "currency = \"USD\"\ndelivery_fee_cents = 750\nplatform = \"web\"\n",
        )
        .unwrap();

        let config = ConfigState::read_file(&path).unwrap();

        assert_eq!(config.currency, Currency::Usd);
        assert_eq!(config.delivery_fee_cents, 750);
        assert_eq!(config.platform, Platform::Web);
        // Missing keys keep their defaults
        assert!(config.round_display);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState::read_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ConfigState::default());
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bloomy.toml");
        std::fs::write(&path, "currency = [").unwrap();

        assert!(matches!(
            ConfigState::read_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ConfigState::default();
        config.apply_overrides(lookup(&[
            ("BLOOMY_DB_PATH", "/tmp/bloomy-test.db"),
            ("BLOOMY_CURRENCY", "usd"),
            ("BLOOMY_DELIVERY_FEE", "7.50"),
            ("BLOOMY_PLATFORM", "web"),
            ("BLOOMY_ROUND_DISPLAY", "false"),
        ]));

        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/bloomy-test.db")
        );
        assert_eq!(config.currency, Currency::Usd);
        assert_eq!(config.delivery_fee_cents, 750);
        assert_eq!(config.platform, Platform::Web);
        assert!(!config.round_display);
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = ConfigState::default();
        config.apply_overrides(lookup(&[
            ("BLOOMY_CURRENCY", "EUR"),
            ("BLOOMY_DELIVERY_FEE", "free"),
            ("BLOOMY_PLATFORM", "desktop"),
            ("BLOOMY_ROUND_DISPLAY", "maybe"),
        ]));

        assert_eq!(config, ConfigState::default());
    }

    #[test]
    fn test_validate_rejects_negative_fee() {
        let config = ConfigState {
            delivery_fee_cents: -1,
            ..ConfigState::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}

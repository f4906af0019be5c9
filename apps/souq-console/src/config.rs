//! # Console Configuration
//!
//! Store policy and display settings for the shell.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --cashiers 4  --no-seed  --json                                    │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     SOUQ_CASHIERS=4                                                    │
//! │     SOUQ_SPECIAL_DISCOUNT=10                                           │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/pos/souq.toml (Linux)                                    │
//! │     ~/Library/Application Support/com.souq.pos/souq.toml (macOS)       │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     3 cashiers, 10% special discount, 5% bulk over LE 1000             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # souq.toml
//! [store]
//! cashier_count = 3
//! online_cashier = 0
//! special_discount_bps = 1000       # 10%
//! bulk_threshold_piastres = 100000  # LE 1000.00
//! bulk_discount_bps = 500           # 5%
//! default_online_priority = 5
//! seed_catalog = true
//!
//! [display]
//! currency_symbol = "LE"
//! json = false
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use souq_core::{Money, StoreSettings};
use tracing::{debug, info, warn};

use crate::error::{ConsoleError, ConsoleResult};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "souq.toml";

// =============================================================================
// Display Settings
// =============================================================================

/// How reports are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Prefix for money columns in tables.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Emit JSON instead of tables.
    #[serde(default)]
    pub json: bool,
}

fn default_currency_symbol() -> String {
    souq_core::money::CURRENCY_SYMBOL.to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
            json: false,
        }
    }
}

// =============================================================================
// Console Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl ConsoleConfig {
    // =========================================================================
    // Loading
    // =========================================================================

    /// Loads configuration from file and environment.
    ///
    /// A missing file is not an error: defaults are used. A file that
    /// exists but doesn't parse is. Values are not validated here; call
    /// [`ConsoleConfig::validate`] once command-line flags are applied.
    pub fn load(config_path: Option<PathBuf>) -> ConsoleResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Checks the store policy and display settings.
    pub fn validate(&self) -> ConsoleResult<()> {
        self.store
            .validate()
            .map_err(|e| ConsoleError::Config(e.to_string()))?;

        if self.display.currency_symbol.trim().is_empty() {
            return Err(ConsoleError::Config(
                "currency_symbol must not be empty".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `SOUQ_*` overrides from `lookup`. Unparseable values are
    /// logged and ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup("SOUQ_CASHIERS") {
            match raw.trim().parse::<usize>() {
                Ok(n) => {
                    debug!(cashiers = n, "Overriding cashier count from environment");
                    self.store.cashier_count = n;
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid SOUQ_CASHIERS"),
            }
        }

        if let Some(raw) = lookup("SOUQ_ONLINE_CASHIER") {
            match raw.trim().parse::<usize>() {
                Ok(n) => self.store.online_cashier = n,
                Err(_) => warn!(value = %raw, "Ignoring invalid SOUQ_ONLINE_CASHIER"),
            }
        }

        // Whole percent, e.g. SOUQ_SPECIAL_DISCOUNT=15
        if let Some(raw) = lookup("SOUQ_SPECIAL_DISCOUNT") {
            match raw.trim().trim_end_matches('%').parse::<u32>() {
                Ok(pct) => {
                    debug!(percent = pct, "Overriding special discount from environment");
                    self.store.special_discount_bps = pct.saturating_mul(100);
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid SOUQ_SPECIAL_DISCOUNT"),
            }
        }

        // Pounds, e.g. SOUQ_BULK_THRESHOLD=1000 or 999.50
        if let Some(raw) = lookup("SOUQ_BULK_THRESHOLD") {
            match raw.parse::<Money>() {
                Ok(amount) => {
                    debug!(threshold = %amount, "Overriding bulk threshold from environment");
                    self.store.bulk_threshold_piastres = amount.piastres();
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid SOUQ_BULK_THRESHOLD"),
            }
        }

        if let Some(raw) = lookup("SOUQ_SEED") {
            match parse_flag(&raw) {
                Some(seed) => self.store.seed_catalog = seed,
                None => warn!(value = %raw, "Ignoring invalid SOUQ_SEED"),
            }
        }
    }

    /// Returns the default config file path for this platform.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "souq", "pos")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

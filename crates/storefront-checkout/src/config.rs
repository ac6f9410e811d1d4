//! # Checkout Configuration
//!
//! Pricing tables and checkout defaults.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_STUDENT_DISCOUNT_BPS=500                                │
//! │     STOREFRONT_VOUCHERS=GIAM10:1000,SALE50:5000                        │
//! │     STOREFRONT_DEFAULT_INSTALLMENT_PLAN=0                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.storefront.storefront/ (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     GIAM10 10%, SALE50 50%, SV/VNEDU 5%, plans 3/6/12 months           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [checkout]
//! default_installment_plan = 0
//!
//! [pricing]
//! student_discount_bps = 500
//! student_id_prefixes = ["SV", "VNEDU"]
//!
//! [[pricing.vouchers]]
//! code = "GIAM10"
//! discount_bps = 1000
//!
//! [[pricing.installment_plans]]
//! months = 3
//! monthly_rate_bps = 200
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use storefront_core::{DiscountRate, PricingRules, VoucherRule};
use tracing::{debug, info, warn};

use crate::error::{CheckoutError, CheckoutResult};

// =============================================================================
// Checkout Settings
// =============================================================================

/// Checkout screen defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Installment plan preselected when the shopper picks installments.
    #[serde(default)]
    pub default_installment_plan: usize,
}

// =============================================================================
// Main Checkout Configuration
// =============================================================================

/// Complete checkout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub checkout: CheckoutSettings,

    /// Discount and installment tables.
    #[serde(default)]
    pub pricing: PricingRules,
}

impl CheckoutConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CheckoutResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading checkout config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());

        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load checkout config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CheckoutResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CheckoutError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Checkout config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CheckoutResult<()> {
        self.pricing
            .validate()
            .map_err(|e| CheckoutError::InvalidConfig(e.to_string()))?;

        let plans = self.pricing.installment_plans.len();
        if self.checkout.default_installment_plan >= plans {
            return Err(CheckoutError::InvalidConfig(format!(
                "default_installment_plan {} out of range: {} plans configured",
                self.checkout.default_installment_plan, plans
            )));
        }

        Ok(())
    }

    /// Applies overrides from `lookup` (the process environment in [`load`]).
    ///
    /// Unparseable values are logged and skipped.
    ///
    /// [`load`]: CheckoutConfig::load
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(bps) = lookup("STOREFRONT_STUDENT_DISCOUNT_BPS") {
            match bps.trim().parse::<u32>() {
                Ok(bps) => {
                    debug!(bps, "Overriding student discount from environment");
                    self.pricing.student_discount_bps = DiscountRate::from_bps(bps);
                }
                Err(_) => warn!(value = %bps, "Invalid STOREFRONT_STUDENT_DISCOUNT_BPS"),
            }
        }

        if let Some(vouchers) = lookup("STOREFRONT_VOUCHERS") {
            match parse_vouchers(&vouchers) {
                Some(parsed) => {
                    debug!(count = parsed.len(), "Overriding vouchers from environment");
                    self.pricing.vouchers = parsed;
                }
                None => warn!(
                    value = %vouchers,
                    "Invalid STOREFRONT_VOUCHERS, expected CODE:BPS,..."
                ),
            }
        }

        if let Some(index) = lookup("STOREFRONT_DEFAULT_INSTALLMENT_PLAN") {
            match index.trim().parse::<usize>() {
                Ok(index) => self.checkout.default_installment_plan = index,
                Err(_) => warn!(value = %index, "Invalid STOREFRONT_DEFAULT_INSTALLMENT_PLAN"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }
}

/// Parses `CODE:BPS,CODE:BPS`. An empty string clears the table.
fn parse_vouchers(raw: &str) -> Option<Vec<VoucherRule>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (code, bps) = entry.split_once(':')?;
            Some(VoucherRule {
                code: code.trim().to_string(),
                discount_bps: DiscountRate::from_bps(bps.trim().parse().ok()?),
            })
        })
        .collect()
}

//! Storefront configuration.
//!
//! Every field has a default matching the shipped storefront, so an empty
//! file (or no file at all) yields a working configuration.

use std::time::Duration;

use crate::error::CommerceError;
use crate::money::Currency;
use serde::{Deserialize, Serialize};
use sportgear_observability::{LogFormat, LogLevel};

/// Top-level storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Tax and shipping.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Checkout simulation.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Session logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StoreConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self, CommerceError> {
        let config: StoreConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document and validate it.
    pub fn from_json_str(content: &str) -> Result<Self, CommerceError> {
        let config: StoreConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, CommerceError> {
        toml::to_string_pretty(self).map_err(|e| CommerceError::ConfigError(e.to_string()))
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.pricing.tax_rate_bps > 10_000 {
            return Err(CommerceError::ConfigError(format!(
                "pricing.tax_rate_bps must be at most 10000, got {}",
                self.pricing.tax_rate_bps
            )));
        }
        if self.pricing.flat_shipping_cents < 0 {
            return Err(CommerceError::ConfigError(format!(
                "pricing.flat_shipping_cents must not be negative, got {}",
                self.pricing.flat_shipping_cents
            )));
        }
        let prefix = &self.checkout.order_prefix;
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CommerceError::ConfigError(format!(
                "checkout.order_prefix must be non-empty ASCII alphanumeric, got {:?}",
                prefix
            )));
        }
        Ok(())
    }
}

/// Tax and shipping settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Currency every catalog price is quoted in.
    #[serde(default)]
    pub currency: Currency,

    /// Sales tax in basis points (800 = 8%).
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// Flat shipping fee in cents, charged when the cart is not empty.
    #[serde(default = "default_flat_shipping_cents")]
    pub flat_shipping_cents: i64,
}

fn default_tax_rate_bps() -> u32 {
    800
}

fn default_flat_shipping_cents() -> i64 {
    999
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            tax_rate_bps: default_tax_rate_bps(),
            flat_shipping_cents: default_flat_shipping_cents(),
        }
    }
}

/// Checkout simulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Artificial payment processing delay.
    #[serde(default = "default_processing_delay_ms")]
    pub processing_delay_ms: u64,

    /// Order number prefix.
    #[serde(default = "default_order_prefix")]
    pub order_prefix: String,

    /// Year embedded in order numbers.
    #[serde(default = "default_order_year")]
    pub order_year: u16,

    /// Serial of the first order issued in a session.
    #[serde(default = "default_first_order_serial")]
    pub first_order_serial: u32,
}

fn default_processing_delay_ms() -> u64 {
    2000
}

fn default_order_prefix() -> String {
    "SPT".to_string()
}

fn default_order_year() -> u16 {
    2025
}

fn default_first_order_serial() -> u32 {
    1
}

impl CheckoutConfig {
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: default_processing_delay_ms(),
            order_prefix: default_order_prefix(),
            order_year: default_order_year(),
            first_order_serial: default_first_order_serial(),
        }
    }
}

/// Session logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level written.
    #[serde(default = "default_level")]
    pub level: LogLevel,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> LogLevel {
    LogLevel::Info
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

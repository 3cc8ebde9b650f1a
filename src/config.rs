//! Order configuration
//!
//! Read-only business constants consumed by the cart's derived computations. They can be
//! loaded from YAML, e.g.:
//!
//! ```yaml
//! currency: EUR
//! minimum_order_amount: "10.00 EUR"
//! default_delivery_fee: "2.99 EUR"
//! free_delivery_threshold: "25.00 EUR"
//! tax_rate: "8%"
//! max_quantity_per_dish: 20
//! ```

use std::{fs, path::Path};

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A price is not in the configured currency
    #[error("currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// The per-dish maximum must allow at least one unit
    #[error("max_quantity_per_dish must be at least 1")]
    InvalidMaxQuantity,
}

/// Business constants for ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfig {
    /// Currency of every cart amount
    pub currency: &'static Currency,

    /// Smallest subtotal accepted at checkout
    pub minimum_order_amount: Money<'static, Currency>,

    /// Flat fee charged below the free delivery threshold
    pub default_delivery_fee: Money<'static, Currency>,

    /// Subtotal from which delivery is free
    pub free_delivery_threshold: Money<'static, Currency>,

    /// Tax applied to the subtotal
    pub tax_rate: Percentage,

    /// Upper bound on a single line's quantity
    pub max_quantity_per_dish: u32,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            currency: EUR,
            minimum_order_amount: Money::from_minor(10_00, EUR),
            default_delivery_fee: Money::from_minor(2_99, EUR),
            free_delivery_threshold: Money::from_minor(25_00, EUR),
            tax_rate: Percentage::from(Decimal::new(8, 2)),
            max_quantity_per_dish: 20,
        }
    }
}

/// Order configuration as written in YAML. Missing keys fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OrderConfigFile {
    currency: Option<String>,
    minimum_order_amount: Option<String>,
    default_delivery_fee: Option<String>,
    free_delivery_threshold: Option<String>,
    tax_rate: Option<String>,
    max_quantity_per_dish: Option<u32>,
}

impl OrderConfig {
    /// Parse configuration from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed, a price or percentage is malformed,
    /// or a price is not in the configured currency.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: OrderConfigFile = serde_norway::from_str(contents)?;

        file.try_into()
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }
}

impl TryFrom<OrderConfigFile> for OrderConfig {
    type Error = ConfigError;

    fn try_from(file: OrderConfigFile) -> Result<Self, Self::Error> {
        let defaults = OrderConfig::default();

        let currency = match file.currency.as_deref() {
            Some(code) => parse_currency(code)?,
            None => defaults.currency,
        };

        let price_or = |value: Option<&str>, default: Money<'static, Currency>| match value {
            Some(value) => parse_price_in(value, currency),
            None => Ok(Money::from_minor(default.to_minor_units(), currency)),
        };

        let max_quantity_per_dish = file
            .max_quantity_per_dish
            .unwrap_or(defaults.max_quantity_per_dish);

        if max_quantity_per_dish == 0 {
            return Err(ConfigError::InvalidMaxQuantity);
        }

        Ok(Self {
            currency,
            minimum_order_amount: price_or(
                file.minimum_order_amount.as_deref(),
                defaults.minimum_order_amount,
            )?,
            default_delivery_fee: price_or(
                file.default_delivery_fee.as_deref(),
                defaults.default_delivery_fee,
            )?,
            free_delivery_threshold: price_or(
                file.free_delivery_threshold.as_deref(),
                defaults.free_delivery_threshold,
            )?,
            tax_rate: match file.tax_rate.as_deref() {
                Some(rate) => parse_percentage(rate)?,
                None => defaults.tax_rate,
            },
            max_quantity_per_dish,
        })
    }
}

pub(crate) fn parse_price_in(
    value: &str,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, ConfigError> {
    let (minor_units, price_currency) = parse_price(value)?;

    if price_currency != currency {
        return Err(ConfigError::CurrencyMismatch(
            currency.iso_alpha_code.to_string(),
            price_currency.iso_alpha_code.to_string(),
        ));
    }

    Ok(Money::from_minor(minor_units, currency))
}

/// Resolve a supported ISO currency code.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownCurrency`] for codes other than GBP, USD and EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, ConfigError> {
    match code.trim() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(ConfigError::UnknownCurrency(other.to_string())),
    }
}

/// Parse price string (e.g., "2.99 EUR") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the amount
/// is not a non-negative decimal, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), ConfigError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(ConfigError::InvalidPrice(format!(
            "expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| ConfigError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(ConfigError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| ConfigError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, parse_currency(currency_code)?))
}

/// Parse percentage string (e.g., "8%" or "0.08") into a `Percentage`
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or is negative.
pub fn parse_percentage(s: &str) -> Result<Percentage, ConfigError> {
    let trimmed = s.trim();

    let value = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<Decimal>()
            .map(|points| points / Decimal::ONE_HUNDRED)
    } else {
        trimmed.parse::<Decimal>()
    }
    .map_err(|_err| ConfigError::InvalidPercentage(s.to_string()))?;

    if value.is_sign_negative() {
        return Err(ConfigError::InvalidPercentage(s.to_string()));
    }

    Ok(Percentage::from(value))
}

//! Cart snapshot records

use rusty_money::Money;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine},
    config::{OrderConfig, parse_currency},
    ids::{CartLineUuid, DishId, RestaurantId},
};

/// Reasons a stored snapshot cannot be turned back into a cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// A line uses a currency code we do not know.
    #[error("line {line} uses unknown currency {code}")]
    UnknownCurrency {
        /// Offending line
        line: CartLineUuid,
        /// Stored currency code
        code: String,
    },

    /// A line is priced in a currency other than the configured one.
    #[error("line {line} is priced in {found}, but the cart uses {expected}")]
    CurrencyMismatch {
        /// Offending line
        line: CartLineUuid,
        /// Configured currency code
        expected: &'static str,
        /// Stored currency code
        found: String,
    },

    /// A line's quantity is zero or above the per-dish maximum.
    #[error("line {line} has invalid quantity {quantity}")]
    InvalidQuantity {
        /// Offending line
        line: CartLineUuid,
        /// Stored quantity
        quantity: u32,
    },

    /// A line has a negative unit price.
    #[error("line {0} has a negative unit price")]
    NegativePrice(CartLineUuid),

    /// Lines belong to different restaurants, or disagree with the stored owner.
    #[error("snapshot lines do not share the owning restaurant")]
    RestaurantMismatch,

    /// Two lines refer to the same dish.
    #[error("dish {0} appears on more than one line")]
    DuplicateDish(DishId),
}

/// Stored form of a cart line. Totals are not stored; they are derived on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineRecord {
    /// Line identifier
    pub id: CartLineUuid,

    /// Dish identifier
    pub dish_id: DishId,

    /// Restaurant identifier
    pub restaurant_id: RestaurantId,

    /// Dish name
    pub name: String,

    /// Unit price in minor units
    pub unit_price: i64,

    /// ISO currency code of `unit_price`
    pub currency: String,

    /// Number of units
    pub quantity: u32,

    /// Kitchen instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

/// Stored form of a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Lines in insertion order
    pub lines: Vec<CartLineRecord>,

    /// Restaurant owning the cart
    pub restaurant_id: Option<RestaurantId>,
}

impl CartSnapshot {
    /// Capture the persistent part of a cart.
    pub fn capture(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineRecord::from).collect(),
            restaurant_id: cart.restaurant_id(),
        }
    }

    /// Rebuild a cart, checking every invariant the aggregate relies on.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] describing the first violated invariant.
    pub fn into_cart(self, config: OrderConfig) -> Result<Cart, SnapshotError> {
        let mut seen_dishes = FxHashSet::default();
        let mut lines = Vec::with_capacity(self.lines.len());

        for record in self.lines {
            let currency = parse_currency(&record.currency).map_err(|_err| {
                SnapshotError::UnknownCurrency {
                    line: record.id,
                    code: record.currency.clone(),
                }
            })?;

            if currency != config.currency {
                return Err(SnapshotError::CurrencyMismatch {
                    line: record.id,
                    expected: config.currency.iso_alpha_code,
                    found: record.currency,
                });
            }

            if record.quantity == 0 || record.quantity > config.max_quantity_per_dish {
                return Err(SnapshotError::InvalidQuantity {
                    line: record.id,
                    quantity: record.quantity,
                });
            }

            if record.unit_price < 0 {
                return Err(SnapshotError::NegativePrice(record.id));
            }

            if self.restaurant_id != Some(record.restaurant_id) {
                return Err(SnapshotError::RestaurantMismatch);
            }

            if !seen_dishes.insert(record.dish_id) {
                return Err(SnapshotError::DuplicateDish(record.dish_id));
            }

            lines.push(CartLine::from_parts(
                record.id,
                record.dish_id,
                record.restaurant_id,
                record.name,
                Money::from_minor(record.unit_price, currency),
                record.quantity,
                record.special_instructions,
            ));
        }

        if lines.is_empty() && self.restaurant_id.is_some() {
            return Err(SnapshotError::RestaurantMismatch);
        }

        Ok(Cart::from_parts(config, lines, self.restaurant_id))
    }
}

impl From<&CartLine> for CartLineRecord {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id(),
            dish_id: line.dish_id(),
            restaurant_id: line.restaurant_id(),
            name: line.name().to_string(),
            unit_price: line.unit_price().to_minor_units(),
            currency: line.unit_price().currency().iso_alpha_code.to_string(),
            quantity: line.quantity(),
            special_instructions: line.special_instructions().map(ToString::to_string),
        }
    }
}

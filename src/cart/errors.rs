//! Cart errors and soft outcomes

use std::fmt;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    ids::{DishId, RestaurantId},
    pricing::PricingError,
};

/// Faults raised by cart mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The cart already holds dishes from another restaurant.
    #[error("cart holds dishes from restaurant {cart}; cannot add a dish from restaurant {dish}")]
    RestaurantMismatch {
        /// Restaurant currently owning the cart
        cart: RestaurantId,
        /// Restaurant of the rejected dish
        dish: RestaurantId,
    },

    /// Quantities start at one.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// A dish with a negative price cannot be added.
    #[error("dish {0} has a negative price")]
    NegativePrice(DishId),

    /// The dish is priced in a different currency than the cart.
    #[error("dish {dish} is priced in {found}, but the cart uses {expected}")]
    CurrencyMismatch {
        /// Dish being added
        dish: DishId,
        /// Cart currency code
        expected: &'static str,
        /// Dish currency code
        found: &'static str,
    },

    /// The dish is not currently offered.
    #[error("dish {0} is not available")]
    DishUnavailable(DishId),
}

/// Reasons a cart cannot proceed to checkout.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("cart is empty")]
    Empty,

    /// Subtotal is under the configured minimum order amount.
    #[error("subtotal {subtotal} is below the minimum order amount of {minimum}")]
    BelowMinimum {
        /// Current subtotal
        subtotal: Money<'static, Currency>,
        /// Configured minimum
        minimum: Money<'static, Currency>,
    },

    /// Totals could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// A requested quantity above the per-dish maximum. Reported, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityLimitExceeded {
    /// Quantity the line would have ended up with
    pub requested: u64,

    /// Configured per-dish maximum
    pub limit: u32,
}

impl fmt::Display for QuantityLimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "at most {} units per dish (requested {})",
            self.limit, self.requested
        )
    }
}

//! Cart lines

use rusty_money::{Money, iso::Currency};

use crate::{
    dishes::Dish,
    ids::{CartLineUuid, DishId, RestaurantId},
    pricing::{PricingError, line_total},
};

/// One dish entry in a cart, with its own quantity and price snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    id: CartLineUuid,
    dish_id: DishId,
    restaurant_id: RestaurantId,
    name: String,
    unit_price: Money<'static, Currency>,
    quantity: u32,
    special_instructions: Option<String>,
}

impl CartLine {
    /// Start a new line for `dish`, snapshotting its current price.
    pub(crate) fn new(dish: &Dish, quantity: u32, special_instructions: Option<String>) -> Self {
        Self {
            id: CartLineUuid::now_v7(),
            dish_id: dish.id,
            restaurant_id: dish.restaurant_id,
            name: dish.name.clone(),
            unit_price: dish.unit_price,
            quantity,
            special_instructions,
        }
    }

    /// Rebuild a line from persisted parts.
    pub(crate) fn from_parts(
        id: CartLineUuid,
        dish_id: DishId,
        restaurant_id: RestaurantId,
        name: String,
        unit_price: Money<'static, Currency>,
        quantity: u32,
        special_instructions: Option<String>,
    ) -> Self {
        Self {
            id,
            dish_id,
            restaurant_id,
            name,
            unit_price,
            quantity,
            special_instructions,
        }
    }

    /// Line identifier, stable for the line's lifetime.
    pub fn id(&self) -> CartLineUuid {
        self.id
    }

    /// Dish this line was created from.
    pub fn dish_id(&self) -> DishId {
        self.dish_id
    }

    /// Restaurant selling the dish.
    pub fn restaurant_id(&self) -> RestaurantId {
        self.restaurant_id
    }

    /// Dish name at the time it was added.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price at the time it was added.
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.unit_price
    }

    /// Number of units.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Free-text instructions for the kitchen.
    pub fn special_instructions(&self) -> Option<&str> {
        self.special_instructions.as_deref()
    }

    /// `unit_price × quantity`, computed on every call.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the product does not fit in minor units.
    pub fn total_price(&self) -> Result<Money<'static, Currency>, PricingError> {
        line_total(&self.unit_price, self.quantity)
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

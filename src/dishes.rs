//! Dishes

use rusty_money::{Money, iso::Currency};

use crate::ids::{DishId, RestaurantId};

/// Snapshot of a purchasable dish, as supplied by the dish lookup.
///
/// The cart trusts `unit_price` at the moment of adding and never re-fetches it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dish {
    /// Dish identifier
    pub id: DishId,

    /// Restaurant that sells the dish
    pub restaurant_id: RestaurantId,

    /// Display name
    pub name: String,

    /// Price of a single unit
    pub unit_price: Money<'static, Currency>,

    /// Whether the restaurant currently offers the dish
    pub is_available: bool,
}

impl Dish {
    /// Create an available dish.
    pub fn new(
        id: DishId,
        restaurant_id: RestaurantId,
        name: impl Into<String>,
        unit_price: Money<'static, Currency>,
    ) -> Self {
        Self {
            id,
            restaurant_id,
            name: name.into(),
            unit_price,
            is_available: true,
        }
    }

    /// Mark the dish as unavailable.
    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }
}

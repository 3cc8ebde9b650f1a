//! Menu
//!
//! A YAML-backed dish lookup, standing in for the catalogue service:
//!
//! ```yaml
//! currency: EUR
//! dishes:
//!   - id: 11
//!     restaurant_id: 1
//!     name: Paella
//!     price: "14.50 EUR"
//!   - id: 12
//!     restaurant_id: 1
//!     name: Crema catalana
//!     price: "5.00 EUR"
//!     available: false
//! ```

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    config::{ConfigError, parse_currency, parse_price_in},
    dishes::Dish,
    ids::{DishId, RestaurantId},
};

/// Menu loading errors
#[derive(Debug, Error)]
pub enum MenuError {
    /// IO error reading the menu file
    #[error("failed to read menu file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A price or currency is invalid
    #[error("dish {dish}: {source}")]
    Price {
        /// Offending dish
        dish: DishId,
        /// Underlying parse error
        source: ConfigError,
    },

    /// The menu currency is invalid
    #[error(transparent)]
    Currency(ConfigError),

    /// Two dishes share an id
    #[error("duplicate dish id: {0}")]
    DuplicateDish(DishId),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MenuFile {
    currency: String,
    dishes: Vec<DishFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DishFile {
    id: u64,
    restaurant_id: u64,
    name: String,
    price: String,
    #[serde(default = "available_by_default")]
    available: bool,
}

fn available_by_default() -> bool {
    true
}

/// Dishes on offer, in file order.
#[derive(Debug, Clone)]
pub struct Menu {
    currency: &'static Currency,
    dishes: Vec<Dish>,
    index: FxHashMap<DishId, usize>,
}

impl Menu {
    /// Parse a menu from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed, a price is malformed or in
    /// another currency, or two dishes share an id.
    pub fn from_yaml_str(contents: &str) -> Result<Self, MenuError> {
        let file: MenuFile = serde_norway::from_str(contents)?;
        let currency = parse_currency(&file.currency).map_err(MenuError::Currency)?;

        let mut dishes = Vec::with_capacity(file.dishes.len());
        let mut index = FxHashMap::default();

        for entry in file.dishes {
            let id = DishId(entry.id);

            let unit_price = parse_price_in(&entry.price, currency)
                .map_err(|source| MenuError::Price { dish: id, source })?;

            if index.insert(id, dishes.len()).is_some() {
                return Err(MenuError::DuplicateDish(id));
            }

            let dish = Dish::new(id, RestaurantId(entry.restaurant_id), entry.name, unit_price);

            dishes.push(if entry.available { dish } else { dish.unavailable() });
        }

        Ok(Self {
            currency,
            dishes,
            index,
        })
    }

    /// Load a menu from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MenuError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Look up a dish.
    pub fn dish(&self, id: DishId) -> Option<&Dish> {
        self.index.get(&id).and_then(|&i| self.dishes.get(i))
    }

    /// Every dish, in file order.
    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    /// Dishes sold by one restaurant.
    pub fn restaurant_dishes(&self, restaurant_id: RestaurantId) -> impl Iterator<Item = &Dish> {
        self.dishes
            .iter()
            .filter(move |dish| dish.restaurant_id == restaurant_id)
    }

    /// Currency of every price on the menu.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

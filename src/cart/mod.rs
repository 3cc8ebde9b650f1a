//! Cart
//!
//! The cart is a single-restaurant aggregate: every line shares one restaurant, and the
//! cart remembers that restaurant until its last line goes. Totals are recomputed from
//! the lines on every read.

use rusty_money::{Money, iso::Currency};

use crate::{
    config::OrderConfig,
    dishes::Dish,
    ids::{CartLineUuid, RestaurantId},
    pricing::{PricingError, percent_of, total_price},
};

mod errors;
mod lines;
pub mod session;
mod summary;

pub use errors::{CartError, CheckoutError, QuantityLimitExceeded};
pub use lines::CartLine;
pub use session::CartSession;
pub use summary::{CartSummary, StatementError};

/// Result of a successful call to [`Cart::add_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Added(CartLineUuid),

    /// The dish was already in the cart; its quantity grew to `quantity`.
    Merged {
        /// Existing line
        line: CartLineUuid,
        /// Quantity after merging
        quantity: u32,
    },

    /// The resulting quantity would exceed the per-dish maximum; nothing changed.
    LimitExceeded(QuantityLimitExceeded),
}

impl AddOutcome {
    /// Whether the cart was mutated.
    pub fn changed(&self) -> bool {
        !matches!(self, Self::LimitExceeded(_))
    }
}

/// Result of [`Cart::update_quantity`].
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityOutcome {
    /// The line now has the new quantity.
    Updated,

    /// The new quantity was below one, so the line was removed.
    Removed(CartLine),

    /// No line has that id; nothing changed.
    Missing,

    /// The new quantity exceeds the per-dish maximum; nothing changed.
    LimitExceeded(QuantityLimitExceeded),
}

impl QuantityOutcome {
    /// Whether the cart was mutated.
    pub fn changed(&self) -> bool {
        matches!(self, Self::Updated | Self::Removed(_))
    }
}

/// Shopping cart aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    config: OrderConfig,
    lines: Vec<CartLine>,
    restaurant_id: Option<RestaurantId>,
    is_open: bool,
}

impl Cart {
    /// Create an empty cart priced with `config`.
    pub fn new(config: OrderConfig) -> Self {
        Self {
            config,
            lines: Vec::new(),
            restaurant_id: None,
            is_open: false,
        }
    }

    /// Rebuild a cart from validated parts.
    pub(crate) fn from_parts(
        config: OrderConfig,
        lines: Vec<CartLine>,
        restaurant_id: Option<RestaurantId>,
    ) -> Self {
        Self {
            config,
            lines,
            restaurant_id,
            is_open: false,
        }
    }

    /// Add `quantity` units of `dish`.
    ///
    /// A dish already in the cart has its quantity increased rather than getting a
    /// second line. If the resulting quantity would exceed the per-dish maximum the cart
    /// is left untouched and [`AddOutcome::LimitExceeded`] is returned.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::NegativePrice`]: the dish has a negative unit price.
    /// - [`CartError::CurrencyMismatch`]: the dish is priced in another currency.
    /// - [`CartError::RestaurantMismatch`]: the cart holds dishes from another restaurant.
    pub fn add_line(
        &mut self,
        dish: &Dish,
        quantity: u32,
        special_instructions: Option<String>,
    ) -> Result<AddOutcome, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        if dish.unit_price.to_minor_units() < 0 {
            return Err(CartError::NegativePrice(dish.id));
        }

        if dish.unit_price.currency() != self.config.currency {
            return Err(CartError::CurrencyMismatch {
                dish: dish.id,
                expected: self.config.currency.iso_alpha_code,
                found: dish.unit_price.currency().iso_alpha_code,
            });
        }

        if let Some(current) = self.restaurant_id
            && !self.can_add_line(dish.restaurant_id)
        {
            return Err(CartError::RestaurantMismatch {
                cart: current,
                dish: dish.restaurant_id,
            });
        }

        let limit = self.config.max_quantity_per_dish;

        if let Some(line) = self.lines.iter_mut().find(|line| line.dish_id() == dish.id) {
            let requested = u64::from(line.quantity()) + u64::from(quantity);

            let Some(merged) = u32::try_from(requested).ok().filter(|&q| q <= limit) else {
                return Ok(AddOutcome::LimitExceeded(QuantityLimitExceeded {
                    requested,
                    limit,
                }));
            };

            line.set_quantity(merged);

            return Ok(AddOutcome::Merged {
                line: line.id(),
                quantity: merged,
            });
        }

        if quantity > limit {
            return Ok(AddOutcome::LimitExceeded(QuantityLimitExceeded {
                requested: u64::from(quantity),
                limit,
            }));
        }

        let line = CartLine::new(dish, quantity, special_instructions);
        let id = line.id();

        self.lines.push(line);
        self.restaurant_id.get_or_insert(dish.restaurant_id);

        Ok(AddOutcome::Added(id))
    }

    /// Remove a line. Removing an unknown id is a no-op.
    pub fn remove_line(&mut self, id: CartLineUuid) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| line.id() == id)?;
        let removed = self.lines.remove(index);

        if self.lines.is_empty() {
            self.restaurant_id = None;
        }

        Some(removed)
    }

    /// Set a line's quantity. Anything below one removes the line.
    pub fn update_quantity(&mut self, id: CartLineUuid, quantity: i64) -> QuantityOutcome {
        if quantity < 1 {
            return match self.remove_line(id) {
                Some(line) => QuantityOutcome::Removed(line),
                None => QuantityOutcome::Missing,
            };
        }

        let limit = self.config.max_quantity_per_dish;

        let Some(line) = self.lines.iter_mut().find(|line| line.id() == id) else {
            return QuantityOutcome::Missing;
        };

        let Some(quantity) = u32::try_from(quantity).ok().filter(|&q| q <= limit) else {
            return QuantityOutcome::LimitExceeded(QuantityLimitExceeded {
                requested: quantity.unsigned_abs(),
                limit,
            });
        };

        line.set_quantity(quantity);

        QuantityOutcome::Updated
    }

    /// Empty the cart, release its restaurant and close the cart panel.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.restaurant_id = None;
        self.is_open = false;
    }

    /// Whether a dish from `restaurant_id` may be added right now.
    pub fn can_add_line(&self, restaurant_id: RestaurantId) -> bool {
        self.lines.is_empty() || self.restaurant_id == Some(restaurant_id)
    }

    /// Sum of every line's total price.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the sum overflows.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, PricingError> {
        total_price(
            self.lines.iter().map(CartLine::total_price),
            self.config.currency,
        )
    }

    /// Zero from the free delivery threshold upwards, the flat fee below it.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the subtotal cannot be computed.
    pub fn delivery_fee(&self) -> Result<Money<'static, Currency>, PricingError> {
        let subtotal = self.subtotal()?;

        if subtotal.to_minor_units() >= self.config.free_delivery_threshold.to_minor_units() {
            Ok(Money::from_minor(0, self.config.currency))
        } else {
            Ok(self.config.default_delivery_fee)
        }
    }

    /// Tax on the subtotal, rounded half away from zero to minor units.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the subtotal or percentage cannot be computed.
    pub fn tax(&self) -> Result<Money<'static, Currency>, PricingError> {
        percent_of(&self.subtotal()?, &self.config.tax_rate)
    }

    /// Subtotal plus delivery fee plus tax.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if any component cannot be computed.
    pub fn total(&self) -> Result<Money<'static, Currency>, PricingError> {
        total_price(
            [self.subtotal(), self.delivery_fee(), self.tax()],
            self.config.currency,
        )
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity())).sum()
    }

    /// All derived totals at once.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if any total cannot be computed.
    pub fn summary(&self) -> Result<CartSummary, PricingError> {
        CartSummary::from_cart(self)
    }

    /// Check the cart can be ordered: it must have items and reach the minimum order.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Empty`]: no lines.
    /// - [`CheckoutError::BelowMinimum`]: subtotal under `minimum_order_amount`.
    /// - [`CheckoutError::Pricing`]: the subtotal could not be computed.
    pub fn validate_checkout(&self) -> Result<(), CheckoutError> {
        if self.is_empty() {
            return Err(CheckoutError::Empty);
        }

        let subtotal = self.subtotal()?;
        let minimum = self.config.minimum_order_amount;

        if subtotal.to_minor_units() < minimum.to_minor_units() {
            return Err(CheckoutError::BelowMinimum { subtotal, minimum });
        }

        Ok(())
    }

    /// Show the cart panel.
    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Hide the cart panel.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Whether the cart panel is showing. Never persisted.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by id.
    pub fn line(&self, id: CartLineUuid) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Restaurant owning the cart, if any.
    pub fn restaurant_id(&self) -> Option<RestaurantId> {
        self.restaurant_id
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.config.currency
    }

    /// Configuration the cart is priced with.
    pub fn config(&self) -> &OrderConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{EUR, GBP};
    use testresult::TestResult;

    use crate::ids::DishId;

    use super::*;

    fn dish(id: u64, restaurant: u64, minor: i64) -> Dish {
        Dish::new(
            DishId(id),
            RestaurantId(restaurant),
            format!("Dish {id}"),
            Money::from_minor(minor, EUR),
        )
    }

    fn cart() -> Cart {
        Cart::new(OrderConfig::default())
    }

    fn assert_subtotal_matches_lines(cart: &Cart) -> TestResult {
        let expected: i64 = cart
            .lines()
            .iter()
            .map(|line| line.unit_price().to_minor_units() * i64::from(line.quantity()))
            .sum();

        assert_eq!(cart.subtotal()?.to_minor_units(), expected);

        Ok(())
    }

    #[test]
    fn new_cart_is_empty_and_unowned() {
        let cart = cart();

        assert!(cart.is_empty());
        assert_eq!(cart.restaurant_id(), None);
        assert!(!cart.is_open());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn first_line_sets_restaurant() -> TestResult {
        let mut cart = cart();

        let outcome = cart.add_line(&dish(1, 7, 5_00), 2, None)?;

        assert!(matches!(outcome, AddOutcome::Added(_)));
        assert_eq!(cart.restaurant_id(), Some(RestaurantId(7)));
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn same_dish_merges_into_one_line() -> TestResult {
        let mut cart = cart();
        let dish = dish(5, 1, 4_00);

        let AddOutcome::Added(id) = cart.add_line(&dish, 2, None)? else {
            panic!("expected first add to append a line");
        };
        let merged = cart.add_line(&dish, 3, None)?;

        assert_eq!(merged, AddOutcome::Merged { line: id, quantity: 5 });
        assert_eq!(cart.len(), 1);

        let line = cart.line(id).ok_or("line missing")?;
        assert_eq!(line.quantity(), 5);
        assert_eq!(line.total_price()?, Money::from_minor(20_00, EUR));

        Ok(())
    }

    #[test]
    fn merge_keeps_original_price_snapshot() -> TestResult {
        let mut cart = cart();

        cart.add_line(&dish(5, 1, 4_00), 1, None)?;
        cart.add_line(&dish(5, 1, 9_99), 1, None)?;

        assert_eq!(cart.subtotal()?, Money::from_minor(8_00, EUR));

        Ok(())
    }

    #[test]
    fn lines_keep_insertion_order() -> TestResult {
        let mut cart = cart();

        cart.add_line(&dish(3, 1, 1_00), 1, None)?;
        cart.add_line(&dish(1, 1, 1_00), 1, None)?;
        cart.add_line(&dish(2, 1, 1_00), 1, None)?;
        cart.add_line(&dish(3, 1, 1_00), 1, None)?;

        let order: Vec<DishId> = cart.lines().iter().map(CartLine::dish_id).collect();
        assert_eq!(order, [DishId(3), DishId(1), DishId(2)]);

        Ok(())
    }

    #[test]
    fn other_restaurant_is_rejected_without_changes() -> TestResult {
        let mut cart = cart();
        cart.add_line(&dish(1, 1, 5_00), 1, None)?;
        let before = cart.lines().to_vec();

        let result = cart.add_line(&dish(2, 2, 5_00), 1, None);

        assert_eq!(
            result,
            Err(CartError::RestaurantMismatch {
                cart: RestaurantId(1),
                dish: RestaurantId(2),
            })
        );
        assert_eq!(cart.lines(), before.as_slice());
        assert_eq!(cart.restaurant_id(), Some(RestaurantId(1)));

        Ok(())
    }

    #[test]
    fn zero_quantity_add_is_invalid() {
        let mut cart = cart();

        assert_eq!(
            cart.add_line(&dish(1, 1, 5_00), 0, None),
            Err(CartError::InvalidQuantity)
        );
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut cart = cart();

        assert_eq!(
            cart.add_line(&dish(1, 1, -1), 1, None),
            Err(CartError::NegativePrice(DishId(1)))
        );
    }

    #[test]
    fn foreign_currency_is_rejected() {
        let mut cart = cart();
        let dish = Dish::new(DishId(1), RestaurantId(1), "Pie", Money::from_minor(3_00, GBP));

        assert_eq!(
            cart.add_line(&dish, 1, None),
            Err(CartError::CurrencyMismatch {
                dish: DishId(1),
                expected: "EUR",
                found: "GBP",
            })
        );
    }

    #[test]
    fn add_above_limit_is_ignored() -> TestResult {
        let mut cart = cart();

        let outcome = cart.add_line(&dish(1, 1, 1_00), 21, None)?;

        assert_eq!(
            outcome,
            AddOutcome::LimitExceeded(QuantityLimitExceeded {
                requested: 21,
                limit: 20,
            })
        );
        assert!(!outcome.changed());
        assert!(cart.is_empty());
        assert_eq!(cart.restaurant_id(), None);

        Ok(())
    }

    #[test]
    fn merge_above_limit_is_ignored() -> TestResult {
        let mut cart = cart();
        let dish = dish(1, 1, 1_00);

        cart.add_line(&dish, 15, None)?;
        let outcome = cart.add_line(&dish, 6, None)?;

        assert!(matches!(
            outcome,
            AddOutcome::LimitExceeded(QuantityLimitExceeded { requested: 21, .. })
        ));
        assert_eq!(cart.item_count(), 15);

        Ok(())
    }

    #[test]
    fn removing_last_line_releases_restaurant() -> TestResult {
        let mut cart = cart();
        let AddOutcome::Added(id) = cart.add_line(&dish(1, 1, 1_00), 1, None)? else {
            panic!("expected a new line");
        };

        let removed = cart.remove_line(id);

        assert_eq!(removed.map(|line| line.dish_id()), Some(DishId(1)));
        assert!(cart.is_empty());
        assert_eq!(cart.restaurant_id(), None);

        cart.add_line(&dish(2, 2, 1_00), 1, None)?;
        assert_eq!(cart.restaurant_id(), Some(RestaurantId(2)));

        Ok(())
    }

    #[test]
    fn removing_one_of_many_keeps_restaurant() -> TestResult {
        let mut cart = cart();
        let AddOutcome::Added(id) = cart.add_line(&dish(1, 1, 1_00), 1, None)? else {
            panic!("expected a new line");
        };
        cart.add_line(&dish(2, 1, 1_00), 1, None)?;

        cart.remove_line(id);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.restaurant_id(), Some(RestaurantId(1)));

        Ok(())
    }

    #[test]
    fn removing_unknown_line_is_noop() -> TestResult {
        let mut cart = cart();
        cart.add_line(&dish(1, 1, 1_00), 1, None)?;

        assert!(cart.remove_line(CartLineUuid::now_v7()).is_none());
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn update_quantity_recomputes_totals() -> TestResult {
        let mut cart = cart();
        let AddOutcome::Added(id) = cart.add_line(&dish(1, 1, 2_50), 1, None)? else {
            panic!("expected a new line");
        };

        assert_eq!(cart.update_quantity(id, 4), QuantityOutcome::Updated);
        assert_eq!(cart.subtotal()?, Money::from_minor(10_00, EUR));
        assert_eq!(cart.item_count(), 4);

        Ok(())
    }

    #[test]
    fn update_quantity_floor_removes_line() -> TestResult {
        for floor in [0, -1] {
            let mut cart = cart();
            let AddOutcome::Added(id) = cart.add_line(&dish(1, 1, 2_50), 3, None)? else {
                panic!("expected a new line");
            };

            let outcome = cart.update_quantity(id, floor);

            assert!(matches!(outcome, QuantityOutcome::Removed(_)));
            assert!(cart.is_empty());
            assert_eq!(cart.restaurant_id(), None);
        }

        Ok(())
    }

    #[test]
    fn update_quantity_above_limit_is_ignored() -> TestResult {
        let mut cart = cart();
        let AddOutcome::Added(id) = cart.add_line(&dish(1, 1, 2_50), 3, None)? else {
            panic!("expected a new line");
        };

        let outcome = cart.update_quantity(id, 21);

        assert_eq!(
            outcome,
            QuantityOutcome::LimitExceeded(QuantityLimitExceeded {
                requested: 21,
                limit: 20,
            })
        );
        assert_eq!(cart.item_count(), 3);

        Ok(())
    }

    #[test]
    fn update_quantity_unknown_line_is_missing() {
        let mut cart = cart();

        assert_eq!(
            cart.update_quantity(CartLineUuid::now_v7(), 2),
            QuantityOutcome::Missing
        );
    }

    #[test]
    fn update_quantity_unknown_line_wins_over_limit() {
        let mut cart = cart();

        assert_eq!(
            cart.update_quantity(CartLineUuid::now_v7(), 25),
            QuantityOutcome::Missing
        );
    }

    #[test]
    fn clear_resets_ownership_and_closes() -> TestResult {
        let mut cart = cart();
        cart.add_line(&dish(1, 1, 1_00), 1, None)?;
        cart.open();

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.restaurant_id(), None);
        assert!(!cart.is_open());
        assert!(cart.add_line(&dish(9, 2, 1_00), 1, None)?.changed());

        Ok(())
    }

    #[test]
    fn can_add_line_checks_owner() -> TestResult {
        let mut cart = cart();
        assert!(cart.can_add_line(RestaurantId(3)));

        cart.add_line(&dish(1, 1, 1_00), 1, None)?;

        assert!(cart.can_add_line(RestaurantId(1)));
        assert!(!cart.can_add_line(RestaurantId(3)));

        Ok(())
    }

    #[test]
    fn delivery_fee_respects_free_threshold() -> TestResult {
        let mut below = cart();
        below.add_line(&dish(1, 1, 24_99), 1, None)?;

        let mut at = cart();
        at.add_line(&dish(1, 1, 25_00), 1, None)?;

        assert_eq!(below.delivery_fee()?, Money::from_minor(2_99, EUR));
        assert_eq!(at.delivery_fee()?, Money::from_minor(0, EUR));

        Ok(())
    }

    #[test]
    fn empty_cart_still_quotes_delivery_fee() -> TestResult {
        let cart = cart();

        assert_eq!(cart.subtotal()?, Money::from_minor(0, EUR));
        assert_eq!(cart.delivery_fee()?, Money::from_minor(2_99, EUR));

        Ok(())
    }

    #[test]
    fn tax_and_total() -> TestResult {
        let mut cart = cart();
        cart.add_line(&dish(1, 1, 10_00), 2, None)?;

        assert_eq!(cart.subtotal()?, Money::from_minor(20_00, EUR));
        assert_eq!(cart.tax()?, Money::from_minor(1_60, EUR));
        assert_eq!(cart.total()?, Money::from_minor(24_59, EUR));

        Ok(())
    }

    #[test]
    fn subtotal_tracks_every_mutation() -> TestResult {
        let mut cart = cart();

        let AddOutcome::Added(a) = cart.add_line(&dish(1, 1, 3_20), 2, None)? else {
            panic!("expected a new line");
        };
        assert_subtotal_matches_lines(&cart)?;

        cart.add_line(&dish(2, 1, 7_45), 1, None)?;
        assert_subtotal_matches_lines(&cart)?;

        cart.update_quantity(a, 7);
        assert_subtotal_matches_lines(&cart)?;

        cart.add_line(&dish(2, 1, 7_45), 4, None)?;
        assert_subtotal_matches_lines(&cart)?;

        cart.remove_line(a);
        assert_subtotal_matches_lines(&cart)?;

        Ok(())
    }

    #[test]
    fn checkout_requires_items_and_minimum() -> TestResult {
        let mut cart = cart();
        assert_eq!(cart.validate_checkout(), Err(CheckoutError::Empty));

        cart.add_line(&dish(1, 1, 9_99), 1, None)?;
        assert_eq!(
            cart.validate_checkout(),
            Err(CheckoutError::BelowMinimum {
                subtotal: Money::from_minor(9_99, EUR),
                minimum: Money::from_minor(10_00, EUR),
            })
        );

        cart.add_line(&dish(2, 1, 1), 1, None)?;
        assert_eq!(cart.validate_checkout(), Ok(()));

        Ok(())
    }

    #[test]
    fn open_and_close_toggle_panel() {
        let mut cart = cart();

        cart.open();
        assert!(cart.is_open());

        cart.close();
        assert!(!cart.is_open());
    }
}

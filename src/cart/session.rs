//! Cart Session

use tracing::{debug, info, warn};

use crate::{
    cart::{AddOutcome, Cart, CartError, CartLine, CartSummary, CheckoutError, QuantityOutcome},
    config::OrderConfig,
    dishes::Dish,
    ids::{CartLineUuid, RestaurantId},
    notifications::{Notification, NotificationAction, NotificationSink},
    pricing::PricingError,
    storage::{CartSnapshot, CartStorage, DEFAULT_CART_KEY},
};

/// A shopper's cart together with its storage and notification sink.
///
/// Every mutation is applied to the cart first and persisted afterwards. A failed write
/// is logged and reported to the sink; the in-memory change is kept.
#[derive(Debug)]
pub struct CartSession<S, N> {
    cart: Cart,
    storage: S,
    sink: N,
    key: String,
}

impl<S: CartStorage, N: NotificationSink> CartSession<S, N> {
    /// Start with an empty cart stored under the default key.
    pub fn new(config: OrderConfig, storage: S, sink: N) -> Self {
        Self::with_key(config, storage, sink, DEFAULT_CART_KEY)
    }

    /// Start with an empty cart stored under `key`.
    pub fn with_key(config: OrderConfig, storage: S, sink: N, key: impl Into<String>) -> Self {
        Self {
            cart: Cart::new(config),
            storage,
            sink,
            key: key.into(),
        }
    }

    /// Rehydrate the cart stored under the default key.
    pub fn restore(config: OrderConfig, storage: S, sink: N) -> Self {
        Self::restore_with_key(config, storage, sink, DEFAULT_CART_KEY)
    }

    /// Rehydrate the cart stored under `key`.
    ///
    /// A missing, unreadable or inconsistent snapshot leaves the session with an empty
    /// cart; the latter two are logged.
    #[tracing::instrument(
        name = "cart.session.restore",
        skip_all,
        fields(key = tracing::field::Empty)
    )]
    pub fn restore_with_key(
        config: OrderConfig,
        storage: S,
        sink: N,
        key: impl Into<String>,
    ) -> Self {
        let key = key.into();

        tracing::Span::current().record("key", key.as_str());

        let cart = match storage.load(&key) {
            Ok(Some(snapshot)) => match snapshot.into_cart(config.clone()) {
                Ok(cart) => {
                    info!(lines = cart.len(), "restored cart");
                    cart
                }
                Err(err) => {
                    warn!(error = %err, "discarding inconsistent cart snapshot");
                    Cart::new(config)
                }
            },
            Ok(None) => Cart::new(config),
            Err(err) => {
                warn!(error = %err, "failed to load cart; starting empty");
                Cart::new(config)
            }
        };

        Self {
            cart,
            storage,
            sink,
            key,
        }
    }

    /// Current cart state.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Storage key of this session.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Add a dish to the cart.
    ///
    /// Unavailable dishes are refused before the cart is touched. Hitting the per-dish
    /// limit is reported to the sink and returned as [`AddOutcome::LimitExceeded`].
    ///
    /// # Errors
    ///
    /// Returns the [`CartError`] raised by the cart, or [`CartError::DishUnavailable`].
    /// A [`CartError::RestaurantMismatch`] is also sent to the sink with a
    /// [`NotificationAction::ClearCart`] action.
    #[tracing::instrument(
        name = "cart.session.add_dish",
        skip(self, dish, special_instructions),
        fields(dish_id = %dish.id, restaurant_id = %dish.restaurant_id),
        err
    )]
    pub fn add_dish(
        &mut self,
        dish: &Dish,
        quantity: u32,
        special_instructions: Option<String>,
    ) -> Result<AddOutcome, CartError> {
        if !dish.is_available {
            self.sink.notify(Notification::error(
                "Dish unavailable",
                format!("{} is not available right now", dish.name),
            ));

            return Err(CartError::DishUnavailable(dish.id));
        }

        let outcome = match self.cart.add_line(dish, quantity, special_instructions) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.sink.notify(rejection(&err));
                return Err(err);
            }
        };

        match outcome {
            AddOutcome::LimitExceeded(limit) => {
                self.sink.notify(Notification::warning(
                    "Maximum quantity exceeded",
                    limit.to_string(),
                ));
            }
            AddOutcome::Added(_) | AddOutcome::Merged { .. } => {
                debug!(?outcome, "added dish");

                self.persist();
                self.sink.notify(Notification::success(
                    "Added to cart",
                    format!("{} added to cart", dish.name),
                ));
            }
        }

        Ok(outcome)
    }

    /// Empty the cart, then add the dish. Resolves a restaurant mismatch.
    ///
    /// # Errors
    ///
    /// See [`CartSession::add_dish`].
    pub fn clear_and_add(
        &mut self,
        dish: &Dish,
        quantity: u32,
        special_instructions: Option<String>,
    ) -> Result<AddOutcome, CartError> {
        self.cart.clear();
        self.persist();

        self.add_dish(dish, quantity, special_instructions)
    }

    /// Remove a line. Unknown ids are ignored.
    pub fn remove_line(&mut self, id: CartLineUuid) -> Option<CartLine> {
        let removed = self.cart.remove_line(id)?;

        debug!(line = %id, dish_id = %removed.dish_id(), "removed line");

        self.persist();
        self.sink.notify(Notification::info(
            "Dish removed",
            format!("{} was removed from the cart", removed.name()),
        ));

        Some(removed)
    }

    /// Change a line's quantity. Anything below one removes the line.
    pub fn update_quantity(&mut self, id: CartLineUuid, quantity: i64) -> QuantityOutcome {
        let outcome = self.cart.update_quantity(id, quantity);

        match &outcome {
            QuantityOutcome::Updated => {
                debug!(line = %id, quantity, "updated quantity");
                self.persist();
            }
            QuantityOutcome::Removed(line) => {
                debug!(line = %id, dish_id = %line.dish_id(), "removed line");
                self.persist();
                self.sink.notify(Notification::info(
                    "Dish removed",
                    format!("{} was removed from the cart", line.name()),
                ));
            }
            QuantityOutcome::LimitExceeded(limit) => {
                self.sink.notify(Notification::warning(
                    "Maximum quantity exceeded",
                    limit.to_string(),
                ));
            }
            QuantityOutcome::Missing => {}
        }

        outcome
    }

    /// Empty the cart. Always persisted.
    pub fn clear(&mut self) {
        self.cart.clear();

        debug!("cleared cart");

        self.persist();
        self.sink.notify(Notification::info(
            "Cart cleared",
            "All dishes were removed from the cart",
        ));
    }

    /// Show the cart panel.
    pub fn open(&mut self) {
        self.cart.open();
    }

    /// Hide the cart panel.
    pub fn close(&mut self) {
        self.cart.close();
    }

    /// Whether a dish from `restaurant_id` may be added right now.
    pub fn can_add_line(&self, restaurant_id: RestaurantId) -> bool {
        self.cart.can_add_line(restaurant_id)
    }

    /// Current cart totals.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if any total cannot be computed.
    pub fn summary(&self) -> Result<CartSummary, PricingError> {
        self.cart.summary()
    }

    /// Check the cart can be ordered, telling the shopper why not.
    ///
    /// # Errors
    ///
    /// See [`Cart::validate_checkout`].
    pub fn validate_checkout(&self) -> Result<(), CheckoutError> {
        let result = self.cart.validate_checkout();

        if let Err(err) = &result {
            self.sink.notify(match err {
                CheckoutError::Empty => {
                    Notification::error("Cart is empty", "Add some dishes before checking out")
                }
                CheckoutError::BelowMinimum { minimum, .. } => Notification::warning(
                    "Minimum order not reached",
                    format!("The minimum order is {minimum}"),
                ),
                CheckoutError::Pricing(err) => {
                    Notification::error("Checkout unavailable", err.to_string())
                }
            });
        }

        result
    }

    fn persist(&self) {
        let snapshot = CartSnapshot::capture(&self.cart);

        if let Err(err) = self.storage.save(&self.key, &snapshot) {
            warn!(key = %self.key, error = %err, "failed to persist cart");

            self.sink.notify(Notification::error(
                "Cart not saved",
                "Your cart could not be saved and may be lost when you leave",
            ));
        }
    }
}

fn rejection(err: &CartError) -> Notification {
    match err {
        CartError::RestaurantMismatch { .. } => Notification::warning(
            "Different restaurant",
            "You can only order from one restaurant at a time. Clear your cart?",
        )
        .with_action(NotificationAction::ClearCart),
        CartError::InvalidQuantity
        | CartError::NegativePrice(_)
        | CartError::CurrencyMismatch { .. }
        | CartError::DishUnavailable(_) => {
            Notification::error("Could not add dish", err.to_string())
        }
    }
}

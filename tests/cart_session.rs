//! Integration tests for a cart session backed by files on disk.
//!
//! Dishes come from the menu fixture; the cart is stored in a temporary directory so
//! that restarting a session exercises the full save and restore path.

use std::{cell::RefCell, fs, path::PathBuf};

use rusty_money::{Money, iso::EUR};
use tempfile::tempdir;
use testresult::TestResult;

use storefront::{
    notifications::MockNotificationSink,
    prelude::*,
    storage::DEFAULT_CART_KEY,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

fn dish(menu: &Menu, id: u64) -> Result<&Dish, String> {
    menu.dish(DishId(id))
        .ok_or_else(|| format!("dish {id} missing from fixture"))
}

#[derive(Debug, Default)]
struct Collected(RefCell<Vec<Notification>>);

impl NotificationSink for Collected {
    fn notify(&self, notification: Notification) {
        self.0.borrow_mut().push(notification);
    }
}

#[test]
fn cart_survives_restart() -> TestResult {
    let dir = tempdir()?;
    let menu = Menu::from_path(fixture("menu.yml"))?;
    let config = OrderConfig::from_path(fixture("order.yml"))?;

    {
        let mut session =
            CartSession::restore(config.clone(), FileStorage::new(dir.path())?, NoopSink);

        session.add_dish(dish(&menu, 11)?, 1, Some("extra lemon".to_string()))?;
        session.add_dish(dish(&menu, 12)?, 2, None)?;
        session.open();
    }

    let session = CartSession::restore(config, FileStorage::new(dir.path())?, NoopSink);
    let cart = session.cart();

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.restaurant_id(), Some(RestaurantId(1)));
    assert!(!cart.is_open(), "panel flag must not survive a restart");
    assert_eq!(
        cart.lines().first().and_then(CartLine::special_instructions),
        Some("extra lemon")
    );

    // 14.50 + 2 * 5.20
    assert_eq!(cart.subtotal()?, Money::from_minor(24_90, EUR));
    assert_eq!(cart.delivery_fee()?, Money::from_minor(2_99, EUR));
    assert_eq!(cart.tax()?, Money::from_minor(1_99, EUR));
    assert_eq!(cart.total()?, Money::from_minor(29_88, EUR));

    Ok(())
}

#[test]
fn corrupt_file_starts_empty_and_is_overwritten() -> TestResult {
    let dir = tempdir()?;
    let menu = Menu::from_path(fixture("menu.yml"))?;

    fs::write(dir.path().join(format!("{DEFAULT_CART_KEY}.json")), "not json")?;

    let mut session = CartSession::restore(
        OrderConfig::default(),
        FileStorage::new(dir.path())?,
        NoopSink,
    );
    assert!(session.cart().is_empty());

    session.add_dish(dish(&menu, 21)?, 1, None)?;

    let stored = FileStorage::new(dir.path())?
        .load(DEFAULT_CART_KEY)?
        .ok_or("cart was not saved")?;
    assert_eq!(stored.restaurant_id, Some(RestaurantId(2)));

    Ok(())
}

#[test]
fn restaurant_switch_flow() -> TestResult {
    let dir = tempdir()?;
    let menu = Menu::from_path(fixture("menu.yml"))?;
    let sink = Collected::default();

    let mut session = CartSession::new(
        OrderConfig::default(),
        FileStorage::new(dir.path())?,
        &sink,
    );

    session.add_dish(dish(&menu, 11)?, 1, None)?;

    let ramen = dish(&menu, 21)?;
    assert!(!session.can_add_line(ramen.restaurant_id));

    let refused = session.add_dish(ramen, 1, None);
    assert!(matches!(refused, Err(CartError::RestaurantMismatch { .. })));

    let action = sink.0.borrow().last().and_then(|n| n.action);
    assert_eq!(action, Some(NotificationAction::ClearCart));

    session.clear_and_add(ramen, 1, None)?;

    assert_eq!(session.cart().restaurant_id(), Some(RestaurantId(2)));
    assert_eq!(session.cart().len(), 1);

    Ok(())
}

#[test]
fn unavailable_dish_is_reported_once() -> TestResult {
    let dir = tempdir()?;
    let menu = Menu::from_path(fixture("menu.yml"))?;

    let mut sink = MockNotificationSink::new();
    sink.expect_notify()
        .withf(|n| n.kind == NotificationKind::Error)
        .times(1)
        .return_const(());

    let mut session = CartSession::new(
        OrderConfig::default(),
        FileStorage::new(dir.path())?,
        sink,
    );

    let crema = dish(&menu, 13)?;
    assert_eq!(
        session.add_dish(crema, 1, None),
        Err(CartError::DishUnavailable(DishId(13)))
    );
    assert!(
        !dir.path().join(format!("{DEFAULT_CART_KEY}.json")).exists(),
        "nothing should be written for a refused dish"
    );

    Ok(())
}

#[test]
fn quantity_limit_flow() -> TestResult {
    let menu = Menu::from_path(fixture("menu.yml"))?;
    let sink = Collected::default();
    let storage = MemoryStorage::new();
    let mut session = CartSession::new(OrderConfig::default(), &storage, &sink);

    let AddOutcome::Added(line) = session.add_dish(dish(&menu, 22)?, 18, None)? else {
        return Err("expected a new line".into());
    };

    let outcome = session.add_dish(dish(&menu, 22)?, 3, None)?;
    assert!(matches!(outcome, AddOutcome::LimitExceeded(_)));

    let outcome = session.update_quantity(line, 25);
    assert!(matches!(outcome, QuantityOutcome::LimitExceeded(_)));

    assert_eq!(session.cart().item_count(), 18);

    let warnings = sink
        .0
        .borrow()
        .iter()
        .filter(|n| n.kind == NotificationKind::Warning)
        .count();
    assert_eq!(warnings, 2);

    session.update_quantity(line, 20);
    assert_eq!(session.cart().item_count(), 20);

    Ok(())
}

#[test]
fn checkout_after_reaching_minimum() -> TestResult {
    let menu = Menu::from_path(fixture("menu.yml"))?;
    let mut session = CartSession::new(OrderConfig::default(), MemoryStorage::new(), NoopSink);

    session.add_dish(dish(&menu, 12)?, 1, None)?;
    assert!(matches!(
        session.validate_checkout(),
        Err(CheckoutError::BelowMinimum { .. })
    ));

    session.add_dish(dish(&menu, 12)?, 1, None)?;
    assert_eq!(session.validate_checkout(), Ok(()));

    let summary = session.summary()?;
    assert!(summary.meets_minimum);
    assert!(!summary.is_free_delivery);
    assert_eq!(summary.item_count, 2);

    Ok(())
}

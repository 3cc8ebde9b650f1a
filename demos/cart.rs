//! Cart Example
//!
//! This example fills a cart from the menu fixture and prints its statement.
//!
//! Use `-a` to pick dishes, e.g. `-a 11:2,12`
//! Use `-s` to persist the cart in a directory, so it survives between runs
//! Use `-c` to load an order configuration, e.g. `-c fixtures/order.yml`
//!
//! Set `RUST_LOG=storefront=debug` to follow every mutation.

use std::io;

use anyhow::{Result, anyhow};
use clap::Parser;
use storefront::{
    prelude::*,
    utils::{ExampleCartArgs, parse_dish_quantity},
};
use tracing_subscriber::EnvFilter;

/// Cart Example
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = ExampleCartArgs::parse();

    let menu = Menu::from_path(&args.menu)?;

    let config = match &args.config {
        Some(path) => OrderConfig::from_path(path)?,
        None => OrderConfig::default(),
    };

    match &args.storage {
        Some(dir) => run(&args, &menu, config, FileStorage::new(dir)?),
        None => run(&args, &menu, config, MemoryStorage::new()),
    }
}

#[expect(clippy::print_stdout, reason = "Example code")]
fn run<S: CartStorage>(
    args: &ExampleCartArgs,
    menu: &Menu,
    config: OrderConfig,
    storage: S,
) -> Result<()> {
    let mut session = CartSession::restore(config, storage, TracingSink);

    for arg in &args.add {
        let (id, quantity) =
            parse_dish_quantity(arg).ok_or_else(|| anyhow!("invalid dish: {arg}"))?;

        let dish = menu
            .dish(DishId(id))
            .ok_or_else(|| anyhow!("dish {id} is not on the menu"))?;

        // Refusals the shopper can act on were already reported through the sink.
        match session.add_dish(dish, quantity, None) {
            Ok(_)
            | Err(CartError::RestaurantMismatch { .. } | CartError::DishUnavailable(_)) => {}
            Err(err) => return Err(err.into()),
        }
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    session.cart().write_statement(&mut handle)?;

    if session.validate_checkout().is_ok() {
        println!("Ready for checkout");
    }

    Ok(())
}

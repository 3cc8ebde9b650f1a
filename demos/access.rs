//! Access Example
//!
//! This example evaluates back-office actors against the admin navigation and a few
//! protected regions.
//!
//! Use `-a` to load a different actors fixture
//! Use `-n` to evaluate a single actor by name

use anyhow::{Result, anyhow};
use clap::Parser;
use storefront::{
    prelude::*,
    utils::{ExampleAccessArgs, load_actors},
};
use tracing_subscriber::EnvFilter;

/// Access Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = ExampleAccessArgs::parse();

    let actors = load_actors(&args.actors)?;

    let mut names: Vec<&String> = match &args.actor {
        Some(name) => vec![
            actors
                .get_key_value(name)
                .map(|(name, _)| name)
                .ok_or_else(|| anyhow!("no actor named {name}"))?,
        ],
        None => actors.keys().collect(),
    };

    names.sort();

    let regions = [
        (
            "User deletion",
            AccessRequirement::none()
                .role(Role::SuperAdmin)
                .permission(Permission::DeleteUsers),
        ),
        (
            "Order desk",
            AccessRequirement::none()
                .any_of([Permission::ViewOrders, Permission::ManageOrderStatus]),
        ),
        (
            "Report export",
            AccessRequirement::none()
                .all_of([Permission::ViewAnalytics, Permission::ExportReports]),
        ),
    ];

    for name in names {
        let actor = actors.get(name);

        println!("\n{name}");

        if let Some(actor) = actor {
            let visible = filter_permitted(actor, admin_navigation());
            let labels: Vec<&str> = visible.iter().map(|entry| entry.label).collect();

            println!("  navigation: {}", labels.join(", "));
        }

        for (region, requirement) in &regions {
            match authorize(actor, requirement) {
                AccessDecision::Allow => println!("  {region}: allowed"),
                AccessDecision::Deny(denial) => println!("  {region}: denied. {denial}"),
            }
        }
    }

    Ok(())
}

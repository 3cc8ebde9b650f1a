//! Cart summary

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::Cart, pricing::PricingError};

/// Errors that can occur when writing a cart statement.
#[derive(Debug, Error)]
pub enum StatementError {
    /// Totals could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Writing to the output failed.
    #[error("failed to write cart statement")]
    Io(#[from] io::Error),
}

/// Every derived total of a cart, computed together.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    /// Sum of line totals
    pub subtotal: Money<'static, Currency>,

    /// Delivery fee after the free delivery threshold
    pub delivery_fee: Money<'static, Currency>,

    /// Tax on the subtotal
    pub tax: Money<'static, Currency>,

    /// Subtotal + delivery fee + tax
    pub total: Money<'static, Currency>,

    /// Units across all lines
    pub item_count: u64,

    /// Whether the cart has any lines
    pub has_items: bool,

    /// Whether the subtotal reaches the minimum order amount
    pub meets_minimum: bool,

    /// Whether delivery is free
    pub is_free_delivery: bool,
}

impl CartSummary {
    /// Compute the summary from the cart's current lines.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if any total cannot be computed.
    pub fn from_cart(cart: &Cart) -> Result<Self, PricingError> {
        let config = cart.config();
        let subtotal = cart.subtotal()?;

        Ok(Self {
            subtotal,
            delivery_fee: cart.delivery_fee()?,
            tax: cart.tax()?,
            total: cart.total()?,
            item_count: cart.item_count(),
            has_items: !cart.is_empty(),
            meets_minimum: subtotal.to_minor_units()
                >= config.minimum_order_amount.to_minor_units(),
            is_free_delivery: subtotal.to_minor_units()
                >= config.free_delivery_threshold.to_minor_units(),
        })
    }
}

impl Cart {
    /// Print the cart's lines followed by its totals.
    ///
    /// # Errors
    ///
    /// Returns a [`StatementError`] if a total cannot be computed or writing fails.
    pub fn write_statement(&self, mut out: impl io::Write) -> Result<(), StatementError> {
        let summary = self.summary()?;
        let mut builder = Builder::default();

        builder.push_record(["Qty", "Dish", "Unit", "Total", "Notes"]);

        for line in self.lines() {
            builder.push_record([
                line.quantity().to_string(),
                line.name().to_string(),
                line.unit_price().to_string(),
                line.total_price()?.to_string(),
                line.special_instructions().unwrap_or_default().to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..4), Alignment::right());

        writeln!(out, "\n{table}")?;

        let rows = [
            ("Items:", summary.item_count.to_string()),
            ("Subtotal:", summary.subtotal.to_string()),
            ("Delivery:", summary.delivery_fee.to_string()),
            ("Tax:", summary.tax.to_string()),
            ("Total:", summary.total.to_string()),
        ];

        let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in rows {
            writeln!(out, " {label:<label_width$} {value:>value_width$}")?;
        }

        if summary.has_items && !summary.meets_minimum {
            writeln!(out, " Minimum order not reached")?;
        }

        writeln!(out)?;

        Ok(())
    }
}

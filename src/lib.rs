//! Storefront
//!
//! The stateful core of a food-delivery storefront: a single-restaurant shopping cart
//! with persistence and derived pricing, and the role/permission gate guarding the
//! back-office.

pub mod access;
pub mod cart;
pub mod config;
pub mod dishes;
pub mod ids;
pub mod menu;
pub mod notifications;
pub mod prelude;
pub mod pricing;
pub mod storage;
pub mod utils;

//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    access::{
        AccessDecision, AccessRequirement, ActorAuthorization, Denial, DenialReason,
        NavigationEntry, Permission, Protected, Role, admin_navigation, authorize, evaluate,
        filter_permitted,
    },
    cart::{
        AddOutcome, Cart, CartError, CartLine, CartSession, CartSummary, CheckoutError,
        QuantityLimitExceeded, QuantityOutcome,
    },
    config::{ConfigError, OrderConfig},
    dishes::Dish,
    ids::{CartLineUuid, DishId, RestaurantId},
    menu::{Menu, MenuError},
    notifications::{
        Notification, NotificationAction, NotificationKind, NotificationSink, NoopSink,
        TracingSink,
    },
    pricing::PricingError,
    storage::{CartSnapshot, CartStorage, FileStorage, MemoryStorage, StorageError},
};

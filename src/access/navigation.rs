//! Back-office navigation

use super::{AccessRequirement, ActorAuthorization, Permission, authorize};

/// Anything guarded by an [`AccessRequirement`].
pub trait Protected {
    /// Rule an actor must satisfy to see this item.
    fn requirement(&self) -> &AccessRequirement;
}

impl<T: Protected + ?Sized> Protected for &T {
    fn requirement(&self) -> &AccessRequirement {
        (**self).requirement()
    }
}

/// One entry of the back-office sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    /// Text shown to the actor
    pub label: &'static str,

    /// Route the entry links to
    pub path: &'static str,

    /// Rule guarding the entry
    pub requirement: AccessRequirement,
}

impl NavigationEntry {
    fn new(label: &'static str, path: &'static str, requirement: AccessRequirement) -> Self {
        Self {
            label,
            path,
            requirement,
        }
    }
}

impl Protected for NavigationEntry {
    fn requirement(&self) -> &AccessRequirement {
        &self.requirement
    }
}

/// The back-office sidebar, in display order.
pub fn admin_navigation() -> Vec<NavigationEntry> {
    let guarded = |permission| AccessRequirement::none().permission(permission);

    vec![
        NavigationEntry::new("Dashboard", "/admin", AccessRequirement::none()),
        NavigationEntry::new(
            "Restaurants",
            "/admin/restaurants",
            guarded(Permission::ViewRestaurants),
        ),
        NavigationEntry::new("Dishes", "/admin/dishes", guarded(Permission::ViewDishes)),
        NavigationEntry::new("Orders", "/admin/orders", guarded(Permission::ViewOrders)),
        NavigationEntry::new("Users", "/admin/users", guarded(Permission::ViewUsers)),
        NavigationEntry::new(
            "Categories",
            "/admin/categories",
            guarded(Permission::ViewCategories),
        ),
        NavigationEntry::new("Reports", "/admin/reports", guarded(Permission::ViewAnalytics)),
        NavigationEntry::new(
            "Settings",
            "/admin/settings",
            guarded(Permission::SystemSettings),
        ),
    ]
}

/// Keep the items `actor` may see, preserving order. An inactive actor sees nothing.
pub fn filter_permitted<T: Protected>(
    actor: &ActorAuthorization,
    items: impl IntoIterator<Item = T>,
) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| authorize(Some(actor), item.requirement()).is_allowed())
        .collect()
}

//! Permissions

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{AccessError, roles::label_of};

/// Capability an actor may hold, independent of role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// List and inspect restaurants
    ViewRestaurants,

    /// Register restaurants
    CreateRestaurants,

    /// Change restaurant details
    EditRestaurants,

    /// Remove restaurants
    DeleteRestaurants,

    /// Open, close or suspend restaurants
    ManageRestaurantStatus,

    /// Browse dishes
    ViewDishes,

    /// Browse categories
    ViewCategories,

    /// List and inspect orders
    ViewOrders,

    /// Move orders through their lifecycle
    ManageOrderStatus,

    /// Cancel orders
    CancelOrders,

    /// List and inspect users
    ViewUsers,

    /// Change user details
    EditUsers,

    /// Remove users
    DeleteUsers,

    /// Suspend users
    DeactivateUsers,

    /// Open reports and dashboards
    ViewAnalytics,

    /// Download reports
    ExportReports,

    /// Change platform settings
    SystemSettings,
}

impl Permission {
    /// Every permission.
    pub const ALL: [Permission; 17] = [
        Permission::ViewRestaurants,
        Permission::CreateRestaurants,
        Permission::EditRestaurants,
        Permission::DeleteRestaurants,
        Permission::ManageRestaurantStatus,
        Permission::ViewDishes,
        Permission::ViewCategories,
        Permission::ViewOrders,
        Permission::ManageOrderStatus,
        Permission::CancelOrders,
        Permission::ViewUsers,
        Permission::EditUsers,
        Permission::DeleteUsers,
        Permission::DeactivateUsers,
        Permission::ViewAnalytics,
        Permission::ExportReports,
        Permission::SystemSettings,
    ];

    /// Wire name, e.g. `VIEW_ORDERS`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ViewRestaurants => "VIEW_RESTAURANTS",
            Self::CreateRestaurants => "CREATE_RESTAURANTS",
            Self::EditRestaurants => "EDIT_RESTAURANTS",
            Self::DeleteRestaurants => "DELETE_RESTAURANTS",
            Self::ManageRestaurantStatus => "MANAGE_RESTAURANT_STATUS",
            Self::ViewDishes => "VIEW_DISHES",
            Self::ViewCategories => "VIEW_CATEGORIES",
            Self::ViewOrders => "VIEW_ORDERS",
            Self::ManageOrderStatus => "MANAGE_ORDER_STATUS",
            Self::CancelOrders => "CANCEL_ORDERS",
            Self::ViewUsers => "VIEW_USERS",
            Self::EditUsers => "EDIT_USERS",
            Self::DeleteUsers => "DELETE_USERS",
            Self::DeactivateUsers => "DEACTIVATE_USERS",
            Self::ViewAnalytics => "VIEW_ANALYTICS",
            Self::ExportReports => "EXPORT_REPORTS",
            Self::SystemSettings => "SYSTEM_SETTINGS",
        }
    }

    /// Human-readable name, e.g. `manage restaurant status`.
    pub fn label(self) -> String {
        label_of(self.as_str())
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace([' ', '-'], "_");

        Self::ALL
            .into_iter()
            .find(|permission| permission.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| AccessError::UnknownPermission(s.to_string()))
    }
}

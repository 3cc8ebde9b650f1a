//! Notifications
//!
//! The cart signals soft conditions (quantity limits, storage hiccups, restaurant
//! conflicts) through a [`NotificationSink`]. Presentation belongs to whoever implements
//! the sink.

use std::fmt;

use mockall::automock;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Operation completed
    Success,

    /// Operation failed or state could not be saved
    Error,

    /// Operation was refused but nothing is broken
    Warning,

    /// Informational
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        })
    }
}

/// Follow-up the user can trigger from a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    /// Empty the cart so a dish from another restaurant can be added.
    ClearCart,
}

impl NotificationAction {
    /// Button label for the action.
    pub fn label(self) -> &'static str {
        match self {
            Self::ClearCart => "Clear cart",
        }
    }
}

/// A single message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity
    pub kind: NotificationKind,

    /// Short headline
    pub title: String,

    /// Body text
    pub message: String,

    /// Optional follow-up action
    pub action: Option<NotificationAction>,
}

impl Notification {
    /// Create a notification without an action.
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            action: None,
        }
    }

    /// Shorthand for a success notification.
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title, message)
    }

    /// Shorthand for an error notification.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, title, message)
    }

    /// Shorthand for a warning notification.
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, title, message)
    }

    /// Shorthand for an info notification.
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, title, message)
    }

    /// Attach a follow-up action.
    #[must_use]
    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// Fire-and-forget receiver of notifications.
#[automock]
pub trait NotificationSink {
    /// Deliver a notification. Must not fail or block the caller.
    fn notify(&self, notification: Notification);
}

/// Sink that writes notifications to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        let Notification {
            kind,
            title,
            message,
            action,
        } = notification;

        let action = action.map(NotificationAction::label);

        match kind {
            NotificationKind::Error => tracing::error!(%kind, %title, ?action, "{message}"),
            NotificationKind::Warning => tracing::warn!(%kind, %title, ?action, "{message}"),
            NotificationKind::Success | NotificationKind::Info => {
                tracing::info!(%kind, %title, ?action, "{message}");
            }
        }
    }
}

/// Sink that drops every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl NotificationSink for NoopSink {
    fn notify(&self, _notification: Notification) {}
}

impl<S: NotificationSink + ?Sized> NotificationSink for &S {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

//! Driving port for the notification inbox.

use async_trait::async_trait;

use crate::domain::{Error, Notification, NotificationFeed, NotificationId, UserId};

/// Notification inbox use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// The caller's notifications, newest first, with the unread count.
    async fn list(&self, user_id: &UserId) -> Result<NotificationFeed, Error>;

    /// Mark one of the caller's notifications as read.
    async fn mark_read(&self, user_id: &UserId, id: &NotificationId)
    -> Result<Notification, Error>;
}

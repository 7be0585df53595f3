//! Port abstraction for notification persistence.

use async_trait::async_trait;

use crate::domain::{Notification, NotificationId, UserId};

use super::RepositoryError;

/// Persistence for in-app notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Insert a notification.
    async fn insert(&self, notification: &Notification) -> Result<(), RepositoryError>;

    /// A user's notifications, newest first.
    async fn list_for_user(&self, user_id: &UserId)
    -> Result<Vec<Notification>, RepositoryError>;

    /// Mark a notification owned by `user_id` as read and return it.
    async fn mark_read(
        &self,
        user_id: &UserId,
        id: &NotificationId,
    ) -> Result<Option<Notification>, RepositoryError>;

    /// Number of unread notifications for `user_id`.
    async fn count_unread(&self, user_id: &UserId) -> Result<usize, RepositoryError>;
}

//! Notification inbox service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{NotificationRepository, NotificationsService};
use crate::domain::{Error, Notification, NotificationFeed, NotificationId, UserId};

/// Service implementing [`NotificationsService`].
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    /// Create a new service.
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }
}

#[async_trait]
impl NotificationsService for NotificationService {
    async fn list(&self, user_id: &UserId) -> Result<NotificationFeed, Error> {
        let items = self.notifications.list_for_user(user_id).await?;
        Ok(NotificationFeed::from_items(items))
    }

    async fn mark_read(
        &self,
        user_id: &UserId,
        id: &NotificationId,
    ) -> Result<Notification, Error> {
        self.notifications
            .mark_read(user_id, id)
            .await?
            .ok_or_else(|| Error::not_found("notification not found"))
    }
}

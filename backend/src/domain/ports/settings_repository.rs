//! Port abstraction for user settings persistence.

use async_trait::async_trait;

use crate::domain::{UserId, UserSettings};

use super::RepositoryError;

/// Persistence for per-user settings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Fetch stored settings, if any.
    async fn find(&self, user_id: &UserId) -> Result<Option<UserSettings>, RepositoryError>;

    /// Insert or replace the settings row.
    async fn save(&self, settings: &UserSettings) -> Result<(), RepositoryError>;
}

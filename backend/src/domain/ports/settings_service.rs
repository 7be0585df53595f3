//! Driving ports for user and vendor settings.

use async_trait::async_trait;

use crate::domain::{
    Error, User, UserId, UserSettings, UserSettingsChanges, VendorProfile, VendorSettingsUpdate,
};

/// Vendor settings view: the owner account plus the business profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorSettings {
    /// Owning user.
    pub owner: User,
    /// Business profile.
    pub profile: VendorProfile,
}

/// User settings use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSettingsService: Send + Sync {
    /// Fetch settings, creating defaults on first access.
    async fn fetch(&self, user_id: &UserId) -> Result<UserSettings, Error>;

    /// Apply a partial update.
    async fn update(
        &self,
        user_id: &UserId,
        changes: UserSettingsChanges,
    ) -> Result<UserSettings, Error>;
}

/// Vendor settings use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VendorSettingsService: Send + Sync {
    /// Fetch the caller's vendor settings.
    async fn fetch(&self, user_id: &UserId) -> Result<VendorSettings, Error>;

    /// Update owner name and profile fields in one transaction.
    async fn update(
        &self,
        user_id: &UserId,
        update: VendorSettingsUpdate,
    ) -> Result<VendorSettings, Error>;
}

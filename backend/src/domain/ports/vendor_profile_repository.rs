//! Port abstraction for vendor profile persistence.

use async_trait::async_trait;

use crate::domain::{User, UserId, VendorId, VendorProfile};

use super::RepositoryError;

/// Persistence for vendor business profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VendorProfileRepository: Send + Sync {
    /// Fetch the profile owned by `user_id`.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<VendorProfile>, RepositoryError>;

    /// Fetch a profile by its own identifier.
    async fn find_by_id(&self, id: &VendorId) -> Result<Option<VendorProfile>, RepositoryError>;

    /// Write the owner's display name and the profile fields atomically.
    ///
    /// Either both rows change or neither does.
    async fn update_with_owner(
        &self,
        owner: &User,
        profile: &VendorProfile,
    ) -> Result<(), RepositoryError>;
}

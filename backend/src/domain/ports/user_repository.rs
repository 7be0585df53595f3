//! Port abstraction for user account persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{EmailAddress, PasswordHash, PhoneNumber, User, UserId, VendorProfile};

use super::RepositoryError;

/// New account written by [`UserRepository::create_account`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    /// User row.
    pub user: User,
    /// Vendor profile row, present for vendor registrations.
    pub vendor_profile: Option<VendorProfile>,
}

/// Persistence for user accounts.
///
/// Unique email and phone collisions are reported as
/// [`RepositoryError::Duplicate`] naming the offending field.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch a user by normalised email.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError>;

    /// Fetch a user by normalised phone.
    async fn find_by_phone(&self, phone: &PhoneNumber) -> Result<Option<User>, RepositoryError>;

    /// Insert a user and, for vendors, their profile in one transaction.
    async fn create_account(&self, account: &AccountRecord) -> Result<(), RepositoryError>;

    /// Persist the profile fields (name, gender, email, phone) of `user`.
    async fn update_profile(&self, user: &User) -> Result<(), RepositoryError>;

    /// Replace the password hash.
    async fn update_password_hash(
        &self,
        id: &UserId,
        hash: &PasswordHash,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;

    /// Delete a user and everything they own. Returns whether a row existed.
    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError>;
}

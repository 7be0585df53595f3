//! Driving ports for account lifecycle and profile management.

use async_trait::async_trait;

use crate::domain::{
    EmailAddress, Error, Gender, NewVendorProfile, Password, PersonName, PhoneNumber,
    ProfileChanges, Role, User, UserId, VendorProfile,
};

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Display name.
    pub name: PersonName,
    /// Login email.
    pub email: Option<EmailAddress>,
    /// Login phone.
    pub phone: Option<PhoneNumber>,
    /// Password; required when an email is supplied.
    pub password: Option<Password>,
    /// Optional gender.
    pub gender: Option<Gender>,
    /// Marketplace role.
    pub role: Role,
    /// Business details; required for vendors.
    pub vendor: Option<NewVendorProfile>,
}

/// A user together with their vendor profile, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    /// User row.
    pub user: User,
    /// Vendor profile for vendor accounts.
    pub vendor: Option<VendorProfile>,
}

/// Password change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    /// Current password; required when the account already has one.
    pub current: Option<Password>,
    /// Replacement password.
    pub new: Password,
}

/// Account lifecycle use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create a user (and vendor profile) atomically.
    async fn register(&self, registration: Registration) -> Result<AccountProfile, Error>;

    /// Replace the caller's password.
    async fn change_password(&self, user_id: &UserId, change: PasswordChange)
    -> Result<(), Error>;

    /// Delete the caller and everything they own.
    async fn delete_account(&self, user_id: &UserId) -> Result<(), Error>;
}

/// Profile read and update use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Fetch the caller's profile.
    async fn fetch(&self, user_id: &UserId) -> Result<AccountProfile, Error>;

    /// Apply profile changes and return the updated profile.
    async fn update(
        &self,
        user_id: &UserId,
        changes: ProfileChanges,
    ) -> Result<AccountProfile, Error>;
}

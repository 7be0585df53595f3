//! Account registration, profile and credential management.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    AccountCommand, AccountProfile, AccountRecord, PasswordChange, PasswordHasher,
    ProfileService, Registration, UserRepository, VendorProfileRepository,
};
use crate::domain::service_support::require_user;
use crate::domain::{EmailAddress, Error, PhoneNumber, ProfileChanges, Role, User, UserId};

/// Service implementing [`AccountCommand`] and [`ProfileService`].
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    vendors: Arc<dyn VendorProfileRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

fn field_error(field: &str, message: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field }))
}

fn duplicate(field: &str) -> Error {
    Error::conflict(format!("{field} is already registered"))
        .with_details(json!({ "field": field, "code": "duplicate" }))
}

impl AccountService {
    /// Create a new service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        vendors: Arc<dyn VendorProfileRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            vendors,
            hasher,
            clock,
        }
    }

    async fn with_vendor_profile(&self, user: User) -> Result<AccountProfile, Error> {
        let vendor = match user.role {
            Role::Vendor => self.vendors.find_by_user_id(&user.id).await?,
            Role::User => None,
        };
        Ok(AccountProfile { user, vendor })
    }

    /// Reject contact details already held by a different account.
    async fn ensure_contacts_available(
        &self,
        user_id: Option<&UserId>,
        email: Option<&EmailAddress>,
        phone: Option<&PhoneNumber>,
    ) -> Result<(), Error> {
        let taken_by_other = |found: Option<User>| found.is_some_and(|u| Some(&u.id) != user_id);
        if let Some(email) = email {
            if taken_by_other(self.users.find_by_email(email).await?) {
                return Err(duplicate("email"));
            }
        }
        if let Some(phone) = phone {
            if taken_by_other(self.users.find_by_phone(phone).await?) {
                return Err(duplicate("phone"));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AccountCommand for AccountService {
    async fn register(&self, registration: Registration) -> Result<AccountProfile, Error> {
        let Registration {
            name,
            email,
            phone,
            password,
            gender,
            role,
            vendor,
        } = registration;

        if email.is_none() && phone.is_none() {
            return Err(field_error("email", "email or phone is required"));
        }
        if email.is_some() && password.is_none() {
            return Err(field_error("password", "password is required with an email"));
        }
        if role == Role::Vendor && vendor.is_none() {
            return Err(field_error(
                "businessName",
                "vendors must supply business details",
            ));
        }
        self.ensure_contacts_available(None, email.as_ref(), phone.as_ref())
            .await?;

        let password_hash = match &password {
            Some(password) => Some(self.hasher.hash(password).await?),
            None => None,
        };
        let now = self.clock.utc();
        let user = User {
            id: UserId::random(),
            email,
            phone,
            password_hash,
            name,
            gender,
            role,
            created_at: now,
            updated_at: now,
        };
        let vendor_profile = match role {
            Role::Vendor => vendor.map(|details| details.into_profile(user.id, now)),
            Role::User => None,
        };
        let record = AccountRecord {
            user,
            vendor_profile,
        };
        self.users.create_account(&record).await?;
        info!(user_id = %record.user.id, role = %role, "registered account");

        Ok(AccountProfile {
            user: record.user,
            vendor: record.vendor_profile,
        })
    }

    async fn change_password(
        &self,
        user_id: &UserId,
        change: PasswordChange,
    ) -> Result<(), Error> {
        let user = require_user(self.users.as_ref(), user_id).await?;
        if let Some(existing) = &user.password_hash {
            let Some(current) = &change.current else {
                return Err(field_error("currentPassword", "current password is required"));
            };
            if !self.hasher.verify(current, existing).await? {
                return Err(field_error("currentPassword", "current password is incorrect"));
            }
        }
        let hash = self.hasher.hash(&change.new).await?;
        self.users
            .update_password_hash(user_id, &hash, self.clock.utc())
            .await?;
        info!(user_id = %user_id, "password changed");
        Ok(())
    }

    async fn delete_account(&self, user_id: &UserId) -> Result<(), Error> {
        if self.users.delete(user_id).await? {
            info!(user_id = %user_id, "account deleted");
            Ok(())
        } else {
            Err(Error::not_found("account not found"))
        }
    }
}

#[async_trait]
impl ProfileService for AccountService {
    async fn fetch(&self, user_id: &UserId) -> Result<AccountProfile, Error> {
        let user = require_user(self.users.as_ref(), user_id).await?;
        self.with_vendor_profile(user).await
    }

    async fn update(
        &self,
        user_id: &UserId,
        changes: ProfileChanges,
    ) -> Result<AccountProfile, Error> {
        let mut user = require_user(self.users.as_ref(), user_id).await?;
        if !changes.is_empty() {
            self.ensure_contacts_available(
                Some(user_id),
                changes.email.as_ref(),
                changes.phone.as_ref(),
            )
            .await?;
            changes.apply_to(&mut user, self.clock.utc());
            self.users.update_profile(&user).await?;
        }
        self.with_vendor_profile(user).await
    }
}

#[cfg(test)]
mod tests;

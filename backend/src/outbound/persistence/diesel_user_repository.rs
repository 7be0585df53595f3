//! PostgreSQL-backed `UserRepository` and `VendorProfileRepository`.
//!
//! Both live in one adapter because account creation and the vendor settings
//! update write `users` and `vendor_profiles` in a single transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{
    AccountRecord, RepositoryError, UserRepository, VendorProfileRepository,
};
use crate::domain::{
    EmailAddress, PasswordHash, PhoneNumber, User, UserId, VendorId, VendorProfile,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{UserProfileUpdate, UserRow, VendorProfileRow};
use super::pool::DbPool;
use super::schema::{users, vendor_profiles};

/// Diesel-backed account repository.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_phone(&self, phone: &PhoneNumber) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::phone.eq(phone.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(User::try_from).transpose()
    }

    async fn create_account(&self, account: &AccountRecord) -> Result<(), RepositoryError> {
        let user_row = UserRow::from(&account.user);
        let profile_row = account.vendor_profile.as_ref().map(VendorProfileRow::from);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(users::table)
                    .values(&user_row)
                    .execute(conn)
                    .await?;
                if let Some(profile_row) = &profile_row {
                    diesel::insert_into(vendor_profiles::table)
                        .values(profile_row)
                        .execute(conn)
                        .await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn update_profile(&self, user: &User) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(users::table.find(*user.id.as_uuid()))
            .set(UserProfileUpdate::from(user))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(RepositoryError::query("user not found"));
        }
        Ok(())
    }

    async fn update_password_hash(
        &self,
        id: &UserId,
        hash: &PasswordHash,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(users::table.find(*id.as_uuid()))
            .set((
                users::password_hash.eq(Some(hash.as_ref())),
                users::updated_at.eq(updated_at),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(RepositoryError::query("user not found"));
        }
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // Owned rows go with the user through ON DELETE CASCADE.
        let deleted = diesel::delete(users::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[async_trait]
impl VendorProfileRepository for DieselUserRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<VendorProfile>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<VendorProfileRow> = vendor_profiles::table
            .filter(vendor_profiles::user_id.eq(user_id.as_uuid()))
            .select(VendorProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(VendorProfile::try_from).transpose()
    }

    async fn find_by_id(&self, id: &VendorId) -> Result<Option<VendorProfile>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<VendorProfileRow> = vendor_profiles::table
            .filter(vendor_profiles::id.eq(id.as_uuid()))
            .select(VendorProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(VendorProfile::try_from).transpose()
    }

    async fn update_with_owner(
        &self,
        owner: &User,
        profile: &VendorProfile,
    ) -> Result<(), RepositoryError> {
        let owner_id = *owner.id.as_uuid();
        let owner_name = owner.name.as_ref().to_owned();
        let owner_updated_at = owner.updated_at;
        let profile_row = VendorProfileRow::from(profile);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let written = conn
            .transaction(|conn| {
                async move {
                    let users_written = diesel::update(users::table.find(owner_id))
                        .set((
                            users::name.eq(owner_name),
                            users::updated_at.eq(owner_updated_at),
                        ))
                        .execute(conn)
                        .await?;
                    let profiles_written =
                        diesel::update(vendor_profiles::table.find(profile_row.id))
                            .set(&profile_row)
                            .execute(conn)
                            .await?;
                    if users_written == 0 || profiles_written == 0 {
                        // Roll back the half that did land.
                        return Err(diesel::result::Error::RollbackTransaction);
                    }
                    Ok(())
                }
                .scope_boxed()
            })
            .await;

        match written {
            Ok(()) => Ok(()),
            Err(diesel::result::Error::RollbackTransaction) => {
                Err(RepositoryError::query("vendor profile not found"))
            }
            Err(error) => Err(map_diesel_error(error)),
        }
    }
}

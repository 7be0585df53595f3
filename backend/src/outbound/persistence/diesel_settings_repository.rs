//! PostgreSQL-backed `SettingsRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, SettingsRepository};
use crate::domain::{UserId, UserSettings};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::UserSettingsRow;
use super::pool::DbPool;
use super::schema::user_settings;

/// Diesel-backed settings store.
#[derive(Clone)]
pub struct DieselSettingsRepository {
    pool: DbPool,
}

impl DieselSettingsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for DieselSettingsRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserSettings>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserSettingsRow> = user_settings::table
            .find(user_id.as_uuid())
            .select(UserSettingsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(UserSettings::try_from).transpose()
    }

    async fn save(&self, settings: &UserSettings) -> Result<(), RepositoryError> {
        let row = UserSettingsRow::from(settings);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(user_settings::table)
            .values(&row)
            .on_conflict(user_settings::user_id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

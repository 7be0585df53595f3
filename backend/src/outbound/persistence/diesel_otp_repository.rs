//! PostgreSQL-backed `OtpRepository` keyed by phone.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{OtpRepository, RepositoryError};
use crate::domain::{OtpCode, OtpRecord, PhoneNumber};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::OtpRow;
use super::pool::DbPool;
use super::schema::otp_codes;

/// Diesel-backed one-time code store.
#[derive(Clone)]
pub struct DieselOtpRepository {
    pool: DbPool,
}

impl DieselOtpRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OtpRepository for DieselOtpRepository {
    async fn upsert(&self, record: &OtpRecord) -> Result<(), RepositoryError> {
        let row = OtpRow::from(record);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(otp_codes::table)
            .values(&row)
            .on_conflict(otp_codes::phone)
            .do_update()
            .set((
                otp_codes::code.eq(excluded(otp_codes::code)),
                otp_codes::expires_at.eq(excluded(otp_codes::expires_at)),
                otp_codes::created_at.eq(excluded(otp_codes::created_at)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find(&self, phone: &PhoneNumber) -> Result<Option<OtpRecord>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<OtpRow> = otp_codes::table
            .find(phone.as_ref())
            .select(OtpRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(OtpRecord::try_from).transpose()
    }

    async fn delete_matching(
        &self,
        phone: &PhoneNumber,
        code: &OtpCode,
    ) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = otp_codes::table
            .filter(otp_codes::phone.eq(phone.as_ref()))
            .filter(otp_codes::code.eq(code.as_ref()));
        let deleted = diesel::delete(target)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

//! PostgreSQL-backed quote template and portfolio repositories.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PortfolioRepository, QuoteTemplateRepository, RepositoryError};
use crate::domain::{PortfolioItem, PortfolioItemId, QuoteTemplate, QuoteTemplateId, VendorId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{PortfolioItemRow, QuoteTemplateRow, convert_rows};
use super::pool::DbPool;
use super::schema::{portfolio_items, quote_templates};

fn count_to_usize(count: i64) -> usize {
    usize::try_from(count).unwrap_or(0)
}

/// Diesel-backed quote template store.
#[derive(Clone)]
pub struct DieselQuoteTemplateRepository {
    pool: DbPool,
}

impl DieselQuoteTemplateRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuoteTemplateRepository for DieselQuoteTemplateRepository {
    async fn list(&self, vendor_id: &VendorId) -> Result<Vec<QuoteTemplate>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<QuoteTemplateRow> = quote_templates::table
            .filter(quote_templates::vendor_id.eq(vendor_id.as_uuid()))
            .order_by(quote_templates::created_at.desc())
            .select(QuoteTemplateRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows)
    }

    async fn insert(&self, template: &QuoteTemplate) -> Result<(), RepositoryError> {
        let row = QuoteTemplateRow::from(template);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(quote_templates::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(
        &self,
        vendor_id: &VendorId,
        id: &QuoteTemplateId,
    ) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            quote_templates::table
                .filter(quote_templates::id.eq(id.as_uuid()))
                .filter(quote_templates::vendor_id.eq(vendor_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn count(&self, vendor_id: &VendorId) -> Result<usize, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = quote_templates::table
            .filter(quote_templates::vendor_id.eq(vendor_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count_to_usize(count))
    }
}

/// Diesel-backed portfolio store.
#[derive(Clone)]
pub struct DieselPortfolioRepository {
    pool: DbPool,
}

impl DieselPortfolioRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortfolioRepository for DieselPortfolioRepository {
    async fn list(&self, vendor_id: &VendorId) -> Result<Vec<PortfolioItem>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PortfolioItemRow> = portfolio_items::table
            .filter(portfolio_items::vendor_id.eq(vendor_id.as_uuid()))
            .order_by(portfolio_items::created_at.desc())
            .select(PortfolioItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows)
    }

    async fn insert(&self, item: &PortfolioItem) -> Result<(), RepositoryError> {
        let row = PortfolioItemRow::from(item);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(portfolio_items::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(
        &self,
        vendor_id: &VendorId,
        id: &PortfolioItemId,
    ) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            portfolio_items::table
                .filter(portfolio_items::id.eq(id.as_uuid()))
                .filter(portfolio_items::vendor_id.eq(vendor_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn count(&self, vendor_id: &VendorId) -> Result<usize, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = portfolio_items::table
            .filter(portfolio_items::vendor_id.eq(vendor_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count_to_usize(count))
    }
}

//! Port abstractions for vendor catalogue persistence.

use async_trait::async_trait;

use crate::domain::{PortfolioItem, PortfolioItemId, QuoteTemplate, QuoteTemplateId, VendorId};

use super::RepositoryError;

/// Persistence for quote templates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteTemplateRepository: Send + Sync {
    /// A vendor's templates, newest first.
    async fn list(&self, vendor_id: &VendorId) -> Result<Vec<QuoteTemplate>, RepositoryError>;

    /// Insert a template.
    async fn insert(&self, template: &QuoteTemplate) -> Result<(), RepositoryError>;

    /// Delete a template owned by `vendor_id`. Returns whether it existed.
    async fn delete(
        &self,
        vendor_id: &VendorId,
        id: &QuoteTemplateId,
    ) -> Result<bool, RepositoryError>;

    /// Number of templates owned by `vendor_id`.
    async fn count(&self, vendor_id: &VendorId) -> Result<usize, RepositoryError>;
}

/// Persistence for portfolio entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    /// A vendor's portfolio, newest first.
    async fn list(&self, vendor_id: &VendorId) -> Result<Vec<PortfolioItem>, RepositoryError>;

    /// Insert an entry.
    async fn insert(&self, item: &PortfolioItem) -> Result<(), RepositoryError>;

    /// Delete an entry owned by `vendor_id`. Returns whether it existed.
    async fn delete(
        &self,
        vendor_id: &VendorId,
        id: &PortfolioItemId,
    ) -> Result<bool, RepositoryError>;

    /// Number of entries owned by `vendor_id`.
    async fn count(&self, vendor_id: &VendorId) -> Result<usize, RepositoryError>;
}

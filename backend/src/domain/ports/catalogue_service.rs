//! Driving port for a vendor's quote templates and portfolio.

use async_trait::async_trait;

use crate::domain::{
    Error, NewPortfolioItem, NewQuoteTemplate, PortfolioItem, PortfolioItemId, QuoteTemplate,
    QuoteTemplateId, UserId,
};

/// Vendor catalogue use-cases, keyed by the calling user's id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VendorCatalogueService: Send + Sync {
    /// List quote templates.
    async fn list_quotes(&self, user_id: &UserId) -> Result<Vec<QuoteTemplate>, Error>;

    /// Create a quote template.
    async fn create_quote(
        &self,
        user_id: &UserId,
        template: NewQuoteTemplate,
    ) -> Result<QuoteTemplate, Error>;

    /// Delete a quote template.
    async fn delete_quote(&self, user_id: &UserId, id: &QuoteTemplateId) -> Result<(), Error>;

    /// List portfolio entries.
    async fn list_portfolio(&self, user_id: &UserId) -> Result<Vec<PortfolioItem>, Error>;

    /// Add a portfolio entry.
    async fn add_portfolio_item(
        &self,
        user_id: &UserId,
        item: NewPortfolioItem,
    ) -> Result<PortfolioItem, Error>;

    /// Delete a portfolio entry.
    async fn delete_portfolio_item(
        &self,
        user_id: &UserId,
        id: &PortfolioItemId,
    ) -> Result<(), Error>;
}

//! Vendor quote templates and portfolio management.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    PortfolioRepository, QuoteTemplateRepository, VendorCatalogueService, VendorProfileRepository,
};
use crate::domain::service_support::require_vendor_profile;
use crate::domain::{
    Error, NewPortfolioItem, NewQuoteTemplate, PortfolioItem, PortfolioItemId, QuoteTemplate,
    QuoteTemplateId, UserId,
};

/// Service implementing [`VendorCatalogueService`].
#[derive(Clone)]
pub struct CatalogueService {
    vendors: Arc<dyn VendorProfileRepository>,
    quotes: Arc<dyn QuoteTemplateRepository>,
    portfolio: Arc<dyn PortfolioRepository>,
    clock: Arc<dyn Clock>,
}

impl CatalogueService {
    /// Create a new service.
    pub fn new(
        vendors: Arc<dyn VendorProfileRepository>,
        quotes: Arc<dyn QuoteTemplateRepository>,
        portfolio: Arc<dyn PortfolioRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            vendors,
            quotes,
            portfolio,
            clock,
        }
    }
}

#[async_trait]
impl VendorCatalogueService for CatalogueService {
    async fn list_quotes(&self, user_id: &UserId) -> Result<Vec<QuoteTemplate>, Error> {
        let vendor = require_vendor_profile(self.vendors.as_ref(), user_id).await?;
        Ok(self.quotes.list(&vendor.id).await?)
    }

    async fn create_quote(
        &self,
        user_id: &UserId,
        template: NewQuoteTemplate,
    ) -> Result<QuoteTemplate, Error> {
        let vendor = require_vendor_profile(self.vendors.as_ref(), user_id).await?;
        let template = template.into_template(vendor.id, self.clock.utc());
        self.quotes.insert(&template).await?;
        info!(vendor_id = %vendor.id, quote_id = %template.id, "quote template created");
        Ok(template)
    }

    async fn delete_quote(&self, user_id: &UserId, id: &QuoteTemplateId) -> Result<(), Error> {
        let vendor = require_vendor_profile(self.vendors.as_ref(), user_id).await?;
        if self.quotes.delete(&vendor.id, id).await? {
            Ok(())
        } else {
            Err(Error::not_found("quote template not found"))
        }
    }

    async fn list_portfolio(&self, user_id: &UserId) -> Result<Vec<PortfolioItem>, Error> {
        let vendor = require_vendor_profile(self.vendors.as_ref(), user_id).await?;
        Ok(self.portfolio.list(&vendor.id).await?)
    }

    async fn add_portfolio_item(
        &self,
        user_id: &UserId,
        item: NewPortfolioItem,
    ) -> Result<PortfolioItem, Error> {
        let vendor = require_vendor_profile(self.vendors.as_ref(), user_id).await?;
        let item = item.into_item(vendor.id, self.clock.utc());
        self.portfolio.insert(&item).await?;
        info!(vendor_id = %vendor.id, item_id = %item.id, "portfolio item added");
        Ok(item)
    }

    async fn delete_portfolio_item(
        &self,
        user_id: &UserId,
        id: &PortfolioItemId,
    ) -> Result<(), Error> {
        let vendor = require_vendor_profile(self.vendors.as_ref(), user_id).await?;
        if self.portfolio.delete(&vendor.id, id).await? {
            Ok(())
        } else {
            Err(Error::not_found("portfolio item not found"))
        }
    }
}

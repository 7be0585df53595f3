//! Dashboard read models backed by the repositories.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::dashboard::{VendorCatalogueCounts, summarise_user, summarise_vendor};
use crate::domain::ports::{
    BookingRepository, DashboardQuery, NotificationRepository, PortfolioRepository,
    QuoteTemplateRepository, VendorProfileRepository,
};
use crate::domain::service_support::require_vendor_profile;
use crate::domain::{Error, UserDashboard, UserId, VendorDashboard};

/// Service implementing [`DashboardQuery`].
#[derive(Clone)]
pub struct DashboardService {
    bookings: Arc<dyn BookingRepository>,
    vendors: Arc<dyn VendorProfileRepository>,
    notifications: Arc<dyn NotificationRepository>,
    quotes: Arc<dyn QuoteTemplateRepository>,
    portfolio: Arc<dyn PortfolioRepository>,
    clock: Arc<dyn Clock>,
}

/// Repositories read by [`DashboardService`].
#[derive(Clone)]
pub struct DashboardPorts {
    /// Booking reads.
    pub bookings: Arc<dyn BookingRepository>,
    /// Vendor profile lookups.
    pub vendors: Arc<dyn VendorProfileRepository>,
    /// Unread counts.
    pub notifications: Arc<dyn NotificationRepository>,
    /// Quote template counts.
    pub quotes: Arc<dyn QuoteTemplateRepository>,
    /// Portfolio counts.
    pub portfolio: Arc<dyn PortfolioRepository>,
}

impl DashboardService {
    /// Create a new service.
    pub fn new(ports: DashboardPorts, clock: Arc<dyn Clock>) -> Self {
        let DashboardPorts {
            bookings,
            vendors,
            notifications,
            quotes,
            portfolio,
        } = ports;
        Self {
            bookings,
            vendors,
            notifications,
            quotes,
            portfolio,
            clock,
        }
    }
}

#[async_trait]
impl DashboardQuery for DashboardService {
    async fn user_dashboard(&self, user_id: &UserId) -> Result<UserDashboard, Error> {
        let bookings = self.bookings.list_for_user(user_id).await?;
        let unread = self.notifications.count_unread(user_id).await?;
        Ok(summarise_user(&bookings, unread, self.clock.utc().date_naive()))
    }

    async fn vendor_dashboard(&self, user_id: &UserId) -> Result<VendorDashboard, Error> {
        let vendor = require_vendor_profile(self.vendors.as_ref(), user_id).await?;
        let leads = self.bookings.list_for_vendor(&vendor.id, None).await?;
        let counts = VendorCatalogueCounts {
            portfolio_items: self.portfolio.count(&vendor.id).await?,
            quote_templates: self.quotes.count(&vendor.id).await?,
        };
        Ok(summarise_vendor(
            &leads,
            counts,
            self.clock.utc().date_naive(),
        ))
    }
}

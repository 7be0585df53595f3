//! Driving port for dashboard summaries.

use async_trait::async_trait;

use crate::domain::{Error, UserDashboard, UserId, VendorDashboard};

/// Dashboard read models.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Customer dashboard for the caller.
    async fn user_dashboard(&self, user_id: &UserId) -> Result<UserDashboard, Error>;

    /// Vendor dashboard for the caller.
    async fn vendor_dashboard(&self, user_id: &UserId) -> Result<VendorDashboard, Error>;
}

//! Port abstraction for booking and lead persistence.

use async_trait::async_trait;

use crate::domain::{Booking, BookingId, BookingStatus, CustomerBooking, Lead, UserId, VendorId};

use super::RepositoryError;

/// Persistence for bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking.
    async fn insert(&self, booking: &Booking) -> Result<(), RepositoryError>;

    /// Fetch a booking by id.
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError>;

    /// Persist status, price, notes and `updated_at` of an existing booking.
    async fn update(&self, booking: &Booking) -> Result<(), RepositoryError>;

    /// A customer's bookings with vendor details, newest first.
    async fn list_for_user(&self, user_id: &UserId)
    -> Result<Vec<CustomerBooking>, RepositoryError>;

    /// A vendor's leads with customer details, newest first, optionally
    /// filtered by status.
    async fn list_for_vendor(
        &self,
        vendor_id: &VendorId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Lead>, RepositoryError>;
}

//! Driving port for customer bookings and vendor leads.

use async_trait::async_trait;

use crate::domain::{
    BookingId, BookingStatus, CustomerBooking, Error, EventDetails, Lead, LeadChanges, LeadDraft,
    UserId, VendorId,
};

/// Customer booking request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// Vendor profile being booked.
    pub vendor_id: VendorId,
    /// Event details.
    pub details: EventDetails,
}

/// Booking and lead use-cases.
///
/// Vendor operations take the caller's user id and resolve their vendor
/// profile; leads belonging to another vendor are reported as not found.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingsService: Send + Sync {
    /// Create a pending booking and notify the vendor.
    async fn request_booking(
        &self,
        user_id: &UserId,
        request: BookingRequest,
    ) -> Result<CustomerBooking, Error>;

    /// The caller's bookings, newest first.
    async fn list_user_bookings(&self, user_id: &UserId) -> Result<Vec<CustomerBooking>, Error>;

    /// The calling vendor's leads, optionally filtered by status.
    async fn list_leads(
        &self,
        user_id: &UserId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Lead>, Error>;

    /// Record a lead for a registered customer.
    async fn create_lead(&self, user_id: &UserId, draft: LeadDraft) -> Result<Lead, Error>;

    /// Update status, price or notes of one of the caller's leads.
    async fn update_lead(
        &self,
        user_id: &UserId,
        booking_id: &BookingId,
        changes: LeadChanges,
    ) -> Result<Lead, Error>;
}

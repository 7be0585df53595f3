//! Customer booking requests and the vendor lead pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    BookingRepository, BookingRequest, BookingsService, NotificationRepository, UserRepository,
    VendorProfileRepository,
};
use crate::domain::service_support::{require_user, require_vendor_profile};
use crate::domain::{
    BookingId, BookingStatus, CustomerBooking, CustomerRef, CustomerSummary, Error, Lead,
    LeadChanges, LeadDraft, LeadTransitionPolicy, Notification, User, UserId,
};

/// Service implementing [`BookingsService`].
#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    users: Arc<dyn UserRepository>,
    vendors: Arc<dyn VendorProfileRepository>,
    notifications: Arc<dyn NotificationRepository>,
    clock: Arc<dyn Clock>,
    policy: LeadTransitionPolicy,
}

/// Repositories used by [`BookingService`].
#[derive(Clone)]
pub struct BookingServicePorts {
    /// Booking storage.
    pub bookings: Arc<dyn BookingRepository>,
    /// User lookups.
    pub users: Arc<dyn UserRepository>,
    /// Vendor profile lookups.
    pub vendors: Arc<dyn VendorProfileRepository>,
    /// Notification storage.
    pub notifications: Arc<dyn NotificationRepository>,
}

fn summary(user: &User) -> CustomerSummary {
    CustomerSummary {
        name: user.name.clone(),
        phone: user.phone.clone(),
        email: user.email.clone(),
    }
}

impl BookingService {
    /// Create a new service enforcing `policy` on lead status changes.
    pub fn new(
        ports: BookingServicePorts,
        clock: Arc<dyn Clock>,
        policy: LeadTransitionPolicy,
    ) -> Self {
        let BookingServicePorts {
            bookings,
            users,
            vendors,
            notifications,
        } = ports;
        Self {
            bookings,
            users,
            vendors,
            notifications,
            clock,
            policy,
        }
    }

    /// Record a notification without failing the surrounding operation.
    async fn notify(&self, notification: Notification) {
        if let Err(error) = self.notifications.insert(&notification).await {
            warn!(
                user_id = %notification.user_id,
                error = %error,
                "failed to record notification"
            );
        }
    }

    async fn find_customer(&self, customer: &CustomerRef) -> Result<User, Error> {
        let found = match customer {
            CustomerRef::Phone(phone) => self.users.find_by_phone(phone).await?,
            CustomerRef::Email(email) => self.users.find_by_email(email).await?,
        };
        found.ok_or_else(|| {
            Error::not_found("no registered customer matches these contact details")
                .with_details(json!({ "field": "customer" }))
        })
    }
}

#[async_trait]
impl BookingsService for BookingService {
    async fn request_booking(
        &self,
        user_id: &UserId,
        request: BookingRequest,
    ) -> Result<CustomerBooking, Error> {
        let customer = require_user(self.users.as_ref(), user_id).await?;
        let vendor = self
            .vendors
            .find_by_id(&request.vendor_id)
            .await?
            .ok_or_else(|| {
                Error::not_found("vendor not found").with_details(json!({ "field": "vendorId" }))
            })?;
        if vendor.user_id == customer.id {
            return Err(Error::invalid_request("vendors cannot book their own business")
                .with_details(json!({ "field": "vendorId" })));
        }

        let now = self.clock.utc();
        let booking =
            request
                .details
                .into_booking(customer.id, vendor.id, BookingStatus::Pending, now);
        self.bookings.insert(&booking).await?;
        info!(booking_id = %booking.id, vendor_id = %vendor.id, "booking requested");

        self.notify(Notification::booking_requested(
            vendor.user_id,
            customer.name.as_ref(),
            booking.event_type.as_ref(),
            now,
        ))
        .await;

        Ok(CustomerBooking {
            booking,
            vendor_name: vendor.business_name,
            vendor_category: vendor.category,
        })
    }

    async fn list_user_bookings(&self, user_id: &UserId) -> Result<Vec<CustomerBooking>, Error> {
        Ok(self.bookings.list_for_user(user_id).await?)
    }

    async fn list_leads(
        &self,
        user_id: &UserId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Lead>, Error> {
        let vendor = require_vendor_profile(self.vendors.as_ref(), user_id).await?;
        Ok(self.bookings.list_for_vendor(&vendor.id, status).await?)
    }

    async fn create_lead(&self, user_id: &UserId, draft: LeadDraft) -> Result<Lead, Error> {
        let vendor = require_vendor_profile(self.vendors.as_ref(), user_id).await?;
        let customer = self.find_customer(&draft.customer).await?;
        if vendor.user_id == customer.id {
            return Err(Error::invalid_request("vendors cannot record leads for themselves")
                .with_details(json!({ "field": "customer" })));
        }
        // A recorded lead starts its life as a fresh request.
        let status = draft.status.unwrap_or_default();
        self.policy.check(BookingStatus::Pending, status)?;
        let booking =
            draft
                .details
                .into_booking(customer.id, vendor.id, status, self.clock.utc());
        self.bookings.insert(&booking).await?;
        info!(booking_id = %booking.id, vendor_id = %vendor.id, "lead recorded");
        Ok(Lead {
            booking,
            customer: summary(&customer),
        })
    }

    async fn update_lead(
        &self,
        user_id: &UserId,
        booking_id: &BookingId,
        changes: LeadChanges,
    ) -> Result<Lead, Error> {
        let vendor = require_vendor_profile(self.vendors.as_ref(), user_id).await?;
        let mut booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .filter(|b| b.vendor_id == vendor.id)
            .ok_or_else(|| Error::not_found("lead not found"))?;

        let previous = booking.status;
        let now = self.clock.utc();
        changes.apply_to(&mut booking, self.policy, now)?;
        self.bookings.update(&booking).await?;

        if booking.status != previous {
            info!(
                booking_id = %booking.id,
                from = %previous,
                to = %booking.status,
                "lead status changed"
            );
            self.notify(Notification::booking_status_changed(
                booking.user_id,
                vendor.business_name.as_ref(),
                booking.status,
                now,
            ))
            .await;
        }

        let customer = self
            .users
            .find_by_id(&booking.user_id)
            .await?
            .ok_or_else(|| Error::not_found("lead customer not found"))?;
        Ok(Lead {
            booking,
            customer: summary(&customer),
        })
    }
}

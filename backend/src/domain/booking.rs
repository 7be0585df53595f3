//! Bookings and the vendor lead pipeline.
//!
//! A booking is created by a customer (or recorded by a vendor as a lead) and
//! then moves through the lead statuses. Whether arbitrary status jumps are
//! allowed is decided by a [`LeadTransitionPolicy`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{
    BookingId, BoundedText, EmailAddress, Error, PersonName, PhoneNumber, UserId, VendorId,
};

/// Lead pipeline status.
///
/// The persisted vocabulary is used on the wire; the lead vocabulary aliases
/// `new`, `won` and `lost` are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Newly requested; shown to vendors as "new".
    #[default]
    Pending,
    /// Vendor has reached out.
    Contacted,
    /// Vendor has sent a quote.
    Quoted,
    /// Customer accepted; shown to vendors as "won".
    Confirmed,
    /// Event delivered.
    Completed,
    /// Abandoned; shown to vendors as "lost".
    Cancelled,
}

/// Error raised for unknown status strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("status must be one of pending, contacted, quoted, confirmed, completed or cancelled")]
pub struct InvalidBookingStatus;

impl BookingStatus {
    /// Every status, in pipeline order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Contacted,
        Self::Quoted,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Stable persisted representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Contacted => "contacted",
            Self::Quoted => "quoted",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transitions leave this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether the booking counts towards revenue.
    #[must_use]
    pub const fn is_won(self) -> bool {
        matches!(self, Self::Confirmed | Self::Completed)
    }

    const fn forward_step(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Contacted),
            Self::Contacted => Some(Self::Quoted),
            Self::Quoted => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::Completed),
            Self::Completed | Self::Cancelled => None,
        }
    }
}

impl FromStr for BookingStatus {
    type Err = InvalidBookingStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" | "new" => Ok(Self::Pending),
            "contacted" => Ok(Self::Contacted),
            "quoted" => Ok(Self::Quoted),
            "confirmed" | "won" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" | "lost" => Ok(Self::Cancelled),
            _ => Err(InvalidBookingStatus),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule set applied to lead status updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadTransitionPolicy {
    /// Any status may follow any other.
    #[default]
    Permissive,
    /// Only single forward steps, cancellation of open leads and no-ops.
    Strict,
}

/// Error raised for unknown policy names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("lead transition policy must be permissive or strict, got {0:?}")]
pub struct InvalidTransitionPolicy(pub String);

impl FromStr for LeadTransitionPolicy {
    type Err = InvalidTransitionPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            other => Err(InvalidTransitionPolicy(other.to_owned())),
        }
    }
}

/// Rejected status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move a lead from {from} to {to}")]
pub struct IllegalTransition {
    /// Current status.
    pub from: BookingStatus,
    /// Requested status.
    pub to: BookingStatus,
}

impl From<IllegalTransition> for Error {
    fn from(value: IllegalTransition) -> Self {
        Error::conflict(value.to_string()).with_details(json!({
            "code": "illegal_transition",
            "from": value.from.as_str(),
            "to": value.to.as_str(),
        }))
    }
}

impl LeadTransitionPolicy {
    /// Check whether a lead may move from `from` to `to`.
    ///
    /// # Examples
    /// ```
    /// use eventhub::domain::{BookingStatus, LeadTransitionPolicy};
    ///
    /// let strict = LeadTransitionPolicy::Strict;
    /// assert!(strict.check(BookingStatus::Pending, BookingStatus::Contacted).is_ok());
    /// assert!(strict.check(BookingStatus::Pending, BookingStatus::Confirmed).is_err());
    /// ```
    pub fn check(self, from: BookingStatus, to: BookingStatus) -> Result<(), IllegalTransition> {
        match self {
            Self::Permissive => Ok(()),
            Self::Strict => {
                let allowed = from == to
                    || from.forward_step() == Some(to)
                    || (to == BookingStatus::Cancelled && !from.is_terminal());
                if allowed {
                    Ok(())
                } else {
                    Err(IllegalTransition { from, to })
                }
            }
        }
    }
}

/// Amount in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

/// Error raised for negative or oversized amounts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("amount must be between 0 and {max}")]
pub struct InvalidPrice {
    /// Largest accepted amount.
    pub max: i64,
}

impl Price {
    /// Largest accepted amount; fits a signed 64-bit column.
    pub const MAX: i64 = 1_000_000_000_000;

    /// Validate a signed amount.
    pub fn new(amount: i64) -> Result<Self, InvalidPrice> {
        match u64::try_from(amount) {
            Ok(value) if amount <= Self::MAX => Ok(Self(value)),
            _ => Err(InvalidPrice { max: Self::MAX }),
        }
    }

    /// Amount as stored.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Amount as a signed column value.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        i64::try_from(self.0).unwrap_or(Self::MAX)
    }
}

/// Booking between a customer and a vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Identifier.
    pub id: BookingId,
    /// Customer.
    pub user_id: UserId,
    /// Vendor profile.
    pub vendor_id: VendorId,
    /// Kind of event, e.g. "Wedding".
    pub event_type: BoundedText,
    /// Event date.
    pub event_date: NaiveDate,
    /// Venue or area.
    pub location: BoundedText,
    /// Expected guests.
    pub guest_count: Option<u32>,
    /// Agreed or quoted price.
    pub price: Option<Price>,
    /// Free-form notes.
    pub notes: Option<BoundedText>,
    /// Pipeline status.
    pub status: BookingStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Largest guest count a booking may carry; stored as a signed 32-bit column.
pub const MAX_GUEST_COUNT: u32 = i32::MAX.unsigned_abs();

/// Event details supplied when requesting a booking or recording a lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    /// Kind of event.
    pub event_type: BoundedText,
    /// Event date.
    pub event_date: NaiveDate,
    /// Venue or area.
    pub location: BoundedText,
    /// Expected guests.
    pub guest_count: Option<u32>,
    /// Budget or price.
    pub price: Option<Price>,
    /// Free-form notes.
    pub notes: Option<BoundedText>,
}

impl EventDetails {
    /// Build a booking row from the details.
    #[must_use]
    pub fn into_booking(
        self,
        user_id: UserId,
        vendor_id: VendorId,
        status: BookingStatus,
        now: DateTime<Utc>,
    ) -> Booking {
        Booking {
            id: BookingId::random(),
            user_id,
            vendor_id,
            event_type: self.event_type,
            event_date: self.event_date,
            location: self.location,
            guest_count: self.guest_count,
            price: self.price,
            notes: self.notes,
            status,
            created_at: now,
            updated_at: now,
        }
    }
}

/// How a vendor identifies the customer of a manually recorded lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerRef {
    /// Registered phone.
    Phone(PhoneNumber),
    /// Registered email.
    Email(EmailAddress),
}

/// Lead recorded by a vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadDraft {
    /// Registered customer.
    pub customer: CustomerRef,
    /// Event details.
    pub details: EventDetails,
    /// Initial status, `pending` when absent.
    pub status: Option<BookingStatus>,
}

/// Vendor-side lead update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadChanges {
    /// New status, subject to the transition policy.
    pub status: Option<BookingStatus>,
    /// New price.
    pub price: Option<Price>,
    /// New notes.
    pub notes: Option<BoundedText>,
}

impl LeadChanges {
    /// Whether the update carries no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.price.is_none() && self.notes.is_none()
    }

    /// Apply the changes after checking the status move against `policy`.
    pub fn apply_to(
        &self,
        booking: &mut Booking,
        policy: LeadTransitionPolicy,
        now: DateTime<Utc>,
    ) -> Result<(), IllegalTransition> {
        if let Some(status) = self.status {
            policy.check(booking.status, status)?;
            booking.status = status;
        }
        if let Some(price) = self.price {
            booking.price = Some(price);
        }
        if let Some(notes) = &self.notes {
            booking.notes = Some(notes.clone());
        }
        booking.updated_at = now;
        Ok(())
    }
}

/// Customer contact details shown alongside a lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSummary {
    /// Customer display name.
    pub name: PersonName,
    /// Customer phone.
    pub phone: Option<PhoneNumber>,
    /// Customer email.
    pub email: Option<EmailAddress>,
}

/// Booking seen from the vendor side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    /// Underlying booking.
    pub booking: Booking,
    /// Customer contact details.
    pub customer: CustomerSummary,
}

/// Booking seen from the customer side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerBooking {
    /// Underlying booking.
    pub booking: Booking,
    /// Vendor trading name.
    pub vendor_name: BoundedText,
    /// Vendor category.
    pub vendor_category: BoundedText,
}

//! JSON response bodies.
//!
//! Domain aggregates do not derive `Serialize` or `ToSchema`; handlers map
//! them into these camelCase views instead.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{AccountProfile, VendorSettings};
use crate::domain::{
    Booking, CustomerBooking, CustomerSummary, Lead, Notification, NotificationFeed,
    PortfolioItem, QuoteTemplate, SessionIdentity, StatusCount, UserDashboard, UserSettings,
    VendorDashboard, VendorProfile,
};

fn text<T: AsRef<str>>(value: Option<&T>) -> Option<String> {
    value.map(|inner| inner.as_ref().to_owned())
}

/// Identity held in the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// User id.
    pub id: String,
    /// `user` or `vendor`.
    #[schema(example = "vendor")]
    pub role: String,
    /// Display name.
    pub name: String,
    /// `male`, `female` or `other`.
    pub gender: Option<String>,
    /// Normalised phone number.
    pub phone: Option<String>,
}

impl From<&SessionIdentity> for SessionResponse {
    fn from(identity: &SessionIdentity) -> Self {
        Self {
            id: identity.id.to_string(),
            role: identity.role.as_str().to_owned(),
            name: identity.name.as_ref().to_owned(),
            gender: identity.gender.map(|g| g.as_str().to_owned()),
            phone: text(identity.phone.as_ref()),
        }
    }
}

/// Vendor business profile.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorProfileResponse {
    /// Vendor id used when booking.
    pub id: String,
    /// Trading name.
    pub business_name: String,
    /// Service category.
    pub category: String,
    /// Operating city.
    pub city: String,
    /// Free-text description.
    pub description: Option<String>,
    /// PAN on file.
    pub pan_number: Option<String>,
    /// GSTIN on file.
    pub gst_number: Option<String>,
    /// `pending`, `submitted`, `verified` or `rejected`.
    pub kyc_status: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<&VendorProfile> for VendorProfileResponse {
    fn from(profile: &VendorProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            business_name: profile.business_name.to_string(),
            category: profile.category.to_string(),
            city: profile.city.to_string(),
            description: text(profile.description.as_ref()),
            pan_number: text(profile.pan_number.as_ref()),
            gst_number: text(profile.gst_number.as_ref()),
            kyc_status: profile.kyc_status.as_str().to_owned(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// Account profile, with the vendor profile for vendors.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// User id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: Option<String>,
    /// Login phone.
    pub phone: Option<String>,
    /// Gender.
    pub gender: Option<String>,
    /// `user` or `vendor`.
    pub role: String,
    /// Whether a password is set.
    pub has_password: bool,
    /// Registration time.
    pub created_at: DateTime<Utc>,
    /// Last profile update.
    pub updated_at: DateTime<Utc>,
    /// Business profile for vendor accounts.
    pub vendor: Option<VendorProfileResponse>,
}

impl From<&AccountProfile> for ProfileResponse {
    fn from(account: &AccountProfile) -> Self {
        let user = &account.user;
        Self {
            id: user.id.to_string(),
            name: user.name.to_string(),
            email: text(user.email.as_ref()),
            phone: text(user.phone.as_ref()),
            gender: user.gender.map(|g| g.as_str().to_owned()),
            role: user.role.as_str().to_owned(),
            has_password: user.password_hash.is_some(),
            created_at: user.created_at,
            updated_at: user.updated_at,
            vendor: account.vendor.as_ref().map(VendorProfileResponse::from),
        }
    }
}

/// User preferences.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsResponse {
    /// Email notifications enabled.
    pub email_notifications: bool,
    /// SMS notifications enabled.
    pub sms_notifications: bool,
    /// Booking reminders enabled.
    pub booking_reminders: bool,
    /// Marketing emails enabled.
    pub marketing_emails: bool,
    /// Interface language tag.
    #[schema(example = "en")]
    pub language: String,
    /// Last change.
    pub updated_at: DateTime<Utc>,
}

impl From<&UserSettings> for UserSettingsResponse {
    fn from(settings: &UserSettings) -> Self {
        Self {
            email_notifications: settings.email_notifications,
            sms_notifications: settings.sms_notifications,
            booking_reminders: settings.booking_reminders,
            marketing_emails: settings.marketing_emails,
            language: settings.language.as_ref().to_owned(),
            updated_at: settings.updated_at,
        }
    }
}

/// Vendor settings: owner name plus the business profile.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorSettingsResponse {
    /// Owner display name.
    pub name: String,
    /// Owner email.
    pub email: Option<String>,
    /// Owner phone.
    pub phone: Option<String>,
    /// Business profile.
    #[serde(flatten)]
    pub profile: VendorProfileResponse,
}

impl From<&VendorSettings> for VendorSettingsResponse {
    fn from(settings: &VendorSettings) -> Self {
        Self {
            name: settings.owner.name.to_string(),
            email: text(settings.owner.email.as_ref()),
            phone: text(settings.owner.phone.as_ref()),
            profile: VendorProfileResponse::from(&settings.profile),
        }
    }
}

/// A booking as stored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    /// Booking id.
    pub id: String,
    /// Customer user id.
    pub user_id: String,
    /// Vendor id.
    pub vendor_id: String,
    /// Kind of event.
    pub event_type: String,
    /// Event date.
    pub event_date: NaiveDate,
    /// Venue or area.
    pub location: String,
    /// Expected guests.
    pub guest_count: Option<u32>,
    /// Agreed or quoted price in whole currency units.
    pub price: Option<u64>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Booking status.
    #[schema(example = "pending")]
    pub status: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<&Booking> for BookingResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id.to_string(),
            user_id: booking.user_id.to_string(),
            vendor_id: booking.vendor_id.to_string(),
            event_type: booking.event_type.to_string(),
            event_date: booking.event_date,
            location: booking.location.to_string(),
            guest_count: booking.guest_count,
            price: booking.price.map(|p| p.amount()),
            notes: text(booking.notes.as_ref()),
            status: booking.status.as_str().to_owned(),
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

/// A customer's booking with the vendor it was made with.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBookingResponse {
    /// Booking fields.
    #[serde(flatten)]
    pub booking: BookingResponse,
    /// Vendor business name.
    pub vendor_name: String,
    /// Vendor category.
    pub vendor_category: String,
}

impl From<&CustomerBooking> for CustomerBookingResponse {
    fn from(entry: &CustomerBooking) -> Self {
        Self {
            booking: BookingResponse::from(&entry.booking),
            vendor_name: entry.vendor_name.to_string(),
            vendor_category: entry.vendor_category.to_string(),
        }
    }
}

/// Customer contact details shown on a lead.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    /// Customer name.
    pub name: String,
    /// Customer phone.
    pub phone: Option<String>,
    /// Customer email.
    pub email: Option<String>,
}

impl From<&CustomerSummary> for CustomerResponse {
    fn from(customer: &CustomerSummary) -> Self {
        Self {
            name: customer.name.to_string(),
            phone: text(customer.phone.as_ref()),
            email: text(customer.email.as_ref()),
        }
    }
}

/// A vendor's lead with the customer's contact details.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadResponse {
    /// Booking fields.
    #[serde(flatten)]
    pub booking: BookingResponse,
    /// Customer contact details.
    pub customer: CustomerResponse,
}

impl From<&Lead> for LeadResponse {
    fn from(lead: &Lead) -> Self {
        Self {
            booking: BookingResponse::from(&lead.booking),
            customer: CustomerResponse::from(&lead.customer),
        }
    }
}

/// Reusable quote.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTemplateResponse {
    /// Template id.
    pub id: String,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Price in whole currency units.
    pub price: u64,
    /// Included services.
    pub inclusions: Vec<String>,
    /// Days the quote stays valid.
    pub valid_days: Option<u16>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<&QuoteTemplate> for QuoteTemplateResponse {
    fn from(template: &QuoteTemplate) -> Self {
        Self {
            id: template.id.to_string(),
            title: template.title.to_string(),
            description: text(template.description.as_ref()),
            price: template.price.amount(),
            inclusions: template.inclusions.iter().map(ToString::to_string).collect(),
            valid_days: template.valid_days,
            created_at: template.created_at,
        }
    }
}

/// Portfolio entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItemResponse {
    /// Entry id.
    pub id: String,
    /// Title.
    pub title: String,
    /// Absolute http(s) URL of the media.
    pub media_url: String,
    /// `image` or `video`.
    pub media_type: String,
    /// Description.
    pub description: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<&PortfolioItem> for PortfolioItemResponse {
    fn from(item: &PortfolioItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title.to_string(),
            media_url: item.media_url.as_ref().to_owned(),
            media_type: item.media_type.as_str().to_owned(),
            description: text(item.description.as_ref()),
            created_at: item.created_at,
        }
    }
}

/// In-app notification.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    /// Notification id.
    pub id: String,
    /// Title.
    pub title: String,
    /// Body.
    pub message: String,
    /// Whether the user has read it.
    pub is_read: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<&Notification> for NotificationResponse {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            title: notification.title.to_string(),
            message: notification.message.to_string(),
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

/// Notification inbox.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFeedResponse {
    /// Notifications, newest first.
    pub notifications: Vec<NotificationResponse>,
    /// Unread count.
    pub unread_count: usize,
}

impl From<&NotificationFeed> for NotificationFeedResponse {
    fn from(feed: &NotificationFeed) -> Self {
        Self {
            notifications: feed.items.iter().map(NotificationResponse::from).collect(),
            unread_count: feed.unread,
        }
    }
}

/// Customer dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDashboardResponse {
    /// All bookings.
    pub total_bookings: usize,
    /// Open bookings dated today or later.
    pub upcoming_bookings: usize,
    /// Completed bookings.
    pub completed_bookings: usize,
    /// Cancelled bookings.
    pub cancelled_bookings: usize,
    /// Spend over confirmed and completed bookings.
    pub total_spent: u64,
    /// Five most recent bookings.
    pub recent_bookings: Vec<CustomerBookingResponse>,
    /// Unread notifications.
    pub unread_notifications: usize,
}

impl From<&UserDashboard> for UserDashboardResponse {
    fn from(dashboard: &UserDashboard) -> Self {
        Self {
            total_bookings: dashboard.total_bookings,
            upcoming_bookings: dashboard.upcoming_bookings,
            completed_bookings: dashboard.completed_bookings,
            cancelled_bookings: dashboard.cancelled_bookings,
            total_spent: dashboard.total_spent,
            recent_bookings: dashboard
                .recent_bookings
                .iter()
                .map(CustomerBookingResponse::from)
                .collect(),
            unread_notifications: dashboard.unread_notifications,
        }
    }
}

/// Leads in one status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountResponse {
    /// Status.
    pub status: String,
    /// Number of leads.
    pub count: usize,
}

impl From<&StatusCount> for StatusCountResponse {
    fn from(entry: &StatusCount) -> Self {
        Self {
            status: entry.status.as_str().to_owned(),
            count: entry.count,
        }
    }
}

/// Vendor dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorDashboardResponse {
    /// All leads.
    pub total_leads: usize,
    /// Leads per status.
    pub status_counts: Vec<StatusCountResponse>,
    /// Leads still pending.
    pub new_leads: usize,
    /// Revenue over confirmed and completed leads.
    pub revenue: u64,
    /// Won leads over all leads, as a percentage with one decimal.
    pub conversion_rate: f64,
    /// Nearest confirmed events.
    pub upcoming_events: Vec<LeadResponse>,
    /// Most recent leads.
    pub recent_leads: Vec<LeadResponse>,
    /// Portfolio entries.
    pub portfolio_items: usize,
    /// Quote templates.
    pub quote_templates: usize,
}

impl From<&VendorDashboard> for VendorDashboardResponse {
    fn from(dashboard: &VendorDashboard) -> Self {
        Self {
            total_leads: dashboard.total_leads,
            status_counts: dashboard
                .status_counts
                .iter()
                .map(StatusCountResponse::from)
                .collect(),
            new_leads: dashboard.new_leads,
            revenue: dashboard.revenue,
            conversion_rate: dashboard.conversion_rate,
            upcoming_events: dashboard.upcoming_events.iter().map(LeadResponse::from).collect(),
            recent_leads: dashboard.recent_leads.iter().map(LeadResponse::from).collect(),
            portfolio_items: dashboard.portfolio_items,
            quote_templates: dashboard.quote_templates,
        }
    }
}

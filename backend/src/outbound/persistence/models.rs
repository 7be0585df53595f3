//! Internal Diesel row structs and their conversions to domain types.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Reading a row re-validates every value so
//! a hand-edited database cannot smuggle malformed data into the services.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    Booking, BookingId, BoundedText, EmailAddress, GstNumber, Language, MediaUrl, Notification,
    NotificationId, OtpCode, OtpRecord, PanNumber, PasswordHash, PersonName, PhoneNumber,
    PortfolioItem, PortfolioItemId, Price, QuoteTemplate, QuoteTemplateId, User, UserId,
    UserSettings, VendorId, VendorProfile,
};

use super::diesel_error_mapping::invalid_row;
use super::schema::{
    bookings, notifications, otp_codes, portfolio_items, quote_templates, user_settings, users,
    vendor_profiles,
};

fn parse<'a, T, E: std::fmt::Display>(
    column: &str,
    value: &'a str,
    parser: impl FnOnce(&'a str) -> Result<T, E>,
) -> Result<T, RepositoryError> {
    parser(value).map_err(|err| invalid_row(column, err))
}

fn parse_opt<'a, T, E: std::fmt::Display>(
    column: &str,
    value: Option<&'a str>,
    parser: impl FnOnce(&'a str) -> Result<T, E>,
) -> Result<Option<T>, RepositoryError> {
    value.map(|raw| parse(column, raw, parser)).transpose()
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for the users table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password_hash: Option<String>,
    pub name: String,
    pub gender: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            email: user.email.as_ref().map(|e| e.as_ref().to_owned()),
            phone: user.phone.as_ref().map(|p| p.as_ref().to_owned()),
            password_hash: user.password_hash.as_ref().map(|h| h.as_ref().to_owned()),
            name: user.name.as_ref().to_owned(),
            gender: user.gender.map(|g| g.as_str().to_owned()),
            role: user.role.as_str().to_owned(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::from_uuid(row.id),
            email: parse_opt("users.email", row.email.as_deref(), EmailAddress::new)?,
            phone: parse_opt("users.phone", row.phone.as_deref(), PhoneNumber::new)?,
            password_hash: row.password_hash.map(PasswordHash::new),
            name: parse("users.name", &row.name, PersonName::new)?,
            gender: parse_opt("users.gender", row.gender.as_deref(), str::parse)?,
            role: parse("users.role", &row.role, str::parse)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Changeset for the editable profile columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserProfileUpdate<'a> {
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub name: &'a str,
    pub gender: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a User> for UserProfileUpdate<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            email: user.email.as_ref().map(|value| value.as_ref()),
            phone: user.phone.as_ref().map(|value| value.as_ref()),
            name: user.name.as_ref(),
            gender: user.gender.map(|g| g.as_str()),
            updated_at: user.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Vendor profiles
// ---------------------------------------------------------------------------

/// Row struct for the vendor_profiles table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = vendor_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct VendorProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_name: String,
    pub category: String,
    pub city: String,
    pub description: Option<String>,
    pub pan_number: Option<String>,
    pub gst_number: Option<String>,
    pub kyc_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&VendorProfile> for VendorProfileRow {
    fn from(profile: &VendorProfile) -> Self {
        Self {
            id: *profile.id.as_uuid(),
            user_id: *profile.user_id.as_uuid(),
            business_name: profile.business_name.as_ref().to_owned(),
            category: profile.category.as_ref().to_owned(),
            city: profile.city.as_ref().to_owned(),
            description: profile.description.as_ref().map(|d| d.as_ref().to_owned()),
            pan_number: profile.pan_number.as_ref().map(|p| p.as_ref().to_owned()),
            gst_number: profile.gst_number.as_ref().map(|g| g.as_ref().to_owned()),
            kyc_status: profile.kyc_status.as_str().to_owned(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

impl TryFrom<VendorProfileRow> for VendorProfile {
    type Error = RepositoryError;

    fn try_from(row: VendorProfileRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: VendorId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            business_name: BoundedText::from_stored(row.business_name),
            category: BoundedText::from_stored(row.category),
            city: BoundedText::from_stored(row.city),
            description: row.description.map(BoundedText::from_stored),
            pan_number: parse_opt(
                "vendor_profiles.pan_number",
                row.pan_number.as_deref(),
                PanNumber::new,
            )?,
            gst_number: parse_opt(
                "vendor_profiles.gst_number",
                row.gst_number.as_deref(),
                GstNumber::new,
            )?,
            kyc_status: parse("vendor_profiles.kyc_status", &row.kyc_status, str::parse)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// One-time codes
// ---------------------------------------------------------------------------

/// Row struct for the otp_codes table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = otp_codes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OtpRow {
    pub phone: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<&OtpRecord> for OtpRow {
    fn from(record: &OtpRecord) -> Self {
        Self {
            phone: record.phone.as_ref().to_owned(),
            code: record.code.as_ref().to_owned(),
            expires_at: record.expires_at,
            created_at: record.created_at,
        }
    }
}

impl TryFrom<OtpRow> for OtpRecord {
    type Error = RepositoryError;

    fn try_from(row: OtpRow) -> Result<Self, Self::Error> {
        Ok(Self {
            phone: parse("otp_codes.phone", &row.phone, PhoneNumber::new)?,
            code: parse("otp_codes.code", &row.code, OtpCode::new)?,
            expires_at: row.expires_at,
            created_at: row.created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

/// Row struct for the bookings table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vendor_id: Uuid,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub location: String,
    pub guest_count: Option<i32>,
    pub price: Option<i64>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<&Booking> for BookingRow {
    type Error = RepositoryError;

    fn try_from(booking: &Booking) -> Result<Self, Self::Error> {
        let guest_count = booking
            .guest_count
            .map(i32::try_from)
            .transpose()
            .map_err(|err| invalid_row("bookings.guest_count", err))?;
        Ok(Self {
            id: *booking.id.as_uuid(),
            user_id: *booking.user_id.as_uuid(),
            vendor_id: *booking.vendor_id.as_uuid(),
            event_type: booking.event_type.as_ref().to_owned(),
            event_date: booking.event_date,
            location: booking.location.as_ref().to_owned(),
            guest_count,
            price: booking.price.map(Price::as_i64),
            notes: booking.notes.as_ref().map(|n| n.as_ref().to_owned()),
            status: booking.status.as_str().to_owned(),
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        })
    }
}

impl TryFrom<BookingRow> for Booking {
    type Error = RepositoryError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let guest_count = row
            .guest_count
            .map(u32::try_from)
            .transpose()
            .map_err(|err| invalid_row("bookings.guest_count", err))?;
        let price = row
            .price
            .map(Price::new)
            .transpose()
            .map_err(|err| invalid_row("bookings.price", err))?;
        Ok(Self {
            id: BookingId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            vendor_id: VendorId::from_uuid(row.vendor_id),
            event_type: BoundedText::from_stored(row.event_type),
            event_date: row.event_date,
            location: BoundedText::from_stored(row.location),
            guest_count,
            price,
            notes: row.notes.map(BoundedText::from_stored),
            status: parse("bookings.status", &row.status, str::parse)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Changeset for the vendor-editable booking columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = bookings)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct BookingUpdate<'a> {
    pub status: &'a str,
    pub price: Option<i64>,
    pub notes: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Booking> for BookingUpdate<'a> {
    fn from(booking: &'a Booking) -> Self {
        Self {
            status: booking.status.as_str(),
            price: booking.price.map(Price::as_i64),
            notes: booking.notes.as_ref().map(|value| value.as_ref()),
            updated_at: booking.updated_at,
        }
    }
}

/// Customer columns joined onto a lead.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CustomerRow {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Vendor columns joined onto a customer booking.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vendor_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VendorSummaryRow {
    pub business_name: String,
    pub category: String,
}

// ---------------------------------------------------------------------------
// Vendor catalogue
// ---------------------------------------------------------------------------

/// Row struct for the portfolio_items table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = portfolio_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PortfolioItemRow {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub title: String,
    pub media_url: String,
    pub media_type: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&PortfolioItem> for PortfolioItemRow {
    fn from(item: &PortfolioItem) -> Self {
        Self {
            id: *item.id.as_uuid(),
            vendor_id: *item.vendor_id.as_uuid(),
            title: item.title.as_ref().to_owned(),
            media_url: item.media_url.as_ref().to_owned(),
            media_type: item.media_type.as_str().to_owned(),
            description: item.description.as_ref().map(|d| d.as_ref().to_owned()),
            created_at: item.created_at,
        }
    }
}

impl TryFrom<PortfolioItemRow> for PortfolioItem {
    type Error = RepositoryError;

    fn try_from(row: PortfolioItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PortfolioItemId::from_uuid(row.id),
            vendor_id: VendorId::from_uuid(row.vendor_id),
            title: BoundedText::from_stored(row.title),
            media_url: parse("portfolio_items.media_url", &row.media_url, MediaUrl::new)?,
            media_type: parse("portfolio_items.media_type", &row.media_type, str::parse)?,
            description: row.description.map(BoundedText::from_stored),
            created_at: row.created_at,
        })
    }
}

/// Row struct for the quote_templates table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = quote_templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct QuoteTemplateRow {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: i64,
    pub inclusions: Vec<String>,
    pub valid_days: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<&QuoteTemplate> for QuoteTemplateRow {
    fn from(template: &QuoteTemplate) -> Self {
        Self {
            id: *template.id.as_uuid(),
            vendor_id: *template.vendor_id.as_uuid(),
            title: template.title.as_ref().to_owned(),
            description: template.description.as_ref().map(|d| d.as_ref().to_owned()),
            price: template.price.as_i64(),
            inclusions: template
                .inclusions
                .iter()
                .map(|item| item.as_ref().to_owned())
                .collect(),
            valid_days: template.valid_days.map(i32::from),
            created_at: template.created_at,
        }
    }
}

impl TryFrom<QuoteTemplateRow> for QuoteTemplate {
    type Error = RepositoryError;

    fn try_from(row: QuoteTemplateRow) -> Result<Self, Self::Error> {
        let valid_days = row
            .valid_days
            .map(u16::try_from)
            .transpose()
            .map_err(|err| invalid_row("quote_templates.valid_days", err))?;
        Ok(Self {
            id: QuoteTemplateId::from_uuid(row.id),
            vendor_id: VendorId::from_uuid(row.vendor_id),
            title: BoundedText::from_stored(row.title),
            description: row.description.map(BoundedText::from_stored),
            price: Price::new(row.price).map_err(|err| invalid_row("quote_templates.price", err))?,
            inclusions: row
                .inclusions
                .into_iter()
                .map(BoundedText::from_stored)
                .collect(),
            valid_days,
            created_at: row.created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Notifications and settings
// ---------------------------------------------------------------------------

/// Row struct for the notifications table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Notification> for NotificationRow {
    fn from(notification: &Notification) -> Self {
        Self {
            id: *notification.id.as_uuid(),
            user_id: *notification.user_id.as_uuid(),
            title: notification.title.as_ref().to_owned(),
            message: notification.message.as_ref().to_owned(),
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: NotificationId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            title: BoundedText::from_stored(row.title),
            message: BoundedText::from_stored(row.message),
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}

/// Row struct for the user_settings table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = user_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserSettingsRow {
    pub user_id: Uuid,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub booking_reminders: bool,
    pub marketing_emails: bool,
    pub language: String,
    pub updated_at: DateTime<Utc>,
}

impl From<&UserSettings> for UserSettingsRow {
    fn from(settings: &UserSettings) -> Self {
        Self {
            user_id: *settings.user_id.as_uuid(),
            email_notifications: settings.email_notifications,
            sms_notifications: settings.sms_notifications,
            booking_reminders: settings.booking_reminders,
            marketing_emails: settings.marketing_emails,
            language: settings.language.as_ref().to_owned(),
            updated_at: settings.updated_at,
        }
    }
}

impl TryFrom<UserSettingsRow> for UserSettings {
    type Error = RepositoryError;

    fn try_from(row: UserSettingsRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::from_uuid(row.user_id),
            email_notifications: row.email_notifications,
            sms_notifications: row.sms_notifications,
            booking_reminders: row.booking_reminders,
            marketing_emails: row.marketing_emails,
            language: parse("user_settings.language", &row.language, Language::new)?,
            updated_at: row.updated_at,
        })
    }
}

/// Convert every row, failing on the first invalid one.
pub(crate) fn convert_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, RepositoryError>
where
    T: TryFrom<R, Error = RepositoryError>,
{
    rows.into_iter().map(T::try_from).collect()
}

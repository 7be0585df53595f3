//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed marketplace entities used by the API and
//! persistence layers, the pure rules over them (OTP checks, lead
//! transitions, dashboard reductions) and the services that implement the
//! driving ports. Types validate on construction so adapters only ever hand
//! the services well-formed values.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - User, VendorProfile, Booking, QuoteTemplate, PortfolioItem,
//!   Notification, UserSettings: the stored aggregates.
//! - Credentials, SessionIdentity: login inputs and session contents.
//! - `*Service` structs: implementations of the driving ports in [`ports`].

pub mod account_service;
pub mod auth;
pub mod auth_service;
pub mod booking;
pub mod booking_service;
pub mod catalogue;
pub mod catalogue_service;
pub mod dashboard;
pub mod dashboard_service;
pub mod error;
pub mod ids;
pub mod notification;
pub mod notification_service;
pub mod otp;
pub mod otp_service;
pub mod ports;
pub(crate) mod service_support;
pub mod settings;
pub mod settings_service;
pub mod text;
pub mod trace_id;
pub mod user;
pub mod vendor;

pub use self::account_service::AccountService;
pub use self::auth::{
    Credentials, CredentialsValidationError, PASSWORD_MAX, PASSWORD_MIN, Password, PasswordHash,
    SessionIdentity,
};
pub use self::auth_service::AuthService;
pub use self::booking::{
    Booking, BookingStatus, CustomerBooking, CustomerRef, CustomerSummary, EventDetails,
    IllegalTransition, InvalidBookingStatus, InvalidPrice, InvalidTransitionPolicy, Lead,
    LeadChanges, LeadDraft, LeadTransitionPolicy, MAX_GUEST_COUNT, Price,
};
pub use self::booking_service::{BookingService, BookingServicePorts};
pub use self::catalogue::{
    InvalidMediaType, InvalidMediaUrl, MediaType, MediaUrl, NewPortfolioItem, NewQuoteTemplate,
    PortfolioItem, QuoteTemplate,
};
pub use self::catalogue_service::CatalogueService;
pub use self::dashboard::{StatusCount, UserDashboard, VendorDashboard};
pub use self::dashboard_service::{DashboardPorts, DashboardService};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{
    BookingId, InvalidId, NotificationId, PortfolioItemId, QuoteTemplateId, UserId, VendorId,
};
pub use self::notification::{Notification, NotificationFeed};
pub use self::notification_service::NotificationService;
pub use self::otp::{InvalidOtpCode, OtpCode, OtpRecord, OtpVerificationError};
pub use self::otp_service::OtpService;
pub use self::settings::{InvalidLanguage, Language, UserSettings, UserSettingsChanges};
pub use self::settings_service::SettingsService;
pub use self::text::{BoundedText, TextValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, Gender, PersonName, PhoneNumber, ProfileChanges, Role, User,
    UserValidationError,
};
pub use self::vendor::{
    GstNumber, KycStatus, KycValidationError, NewVendorProfile, PanNumber, VendorProfile,
    VendorProfileChanges, VendorSettingsUpdate,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use eventhub::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

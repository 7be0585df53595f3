//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Service`, `*Command`, `*Query`) are called by inbound
//! adapters and implemented by the domain services. Driven ports
//! (`*Repository`, [`PasswordHasher`], [`OtpSender`], [`OtpCodeGenerator`])
//! are called by the services and implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod booking_repository;
mod bookings_service;
mod catalogue_repository;
mod catalogue_service;
mod dashboard_query;
mod login_service;
mod notification_repository;
mod notifications_service;
mod otp_command;
mod otp_delivery;
mod otp_repository;
mod password_hasher;
mod repository_error;
mod settings_repository;
mod settings_service;
mod user_repository;
mod vendor_profile_repository;

#[cfg(test)]
pub use account_command::{MockAccountCommand, MockProfileService};
pub use account_command::{
    AccountCommand, AccountProfile, PasswordChange, ProfileService, Registration,
};
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::BookingRepository;
#[cfg(test)]
pub use bookings_service::MockBookingsService;
pub use bookings_service::{BookingRequest, BookingsService};
#[cfg(test)]
pub use catalogue_repository::{MockPortfolioRepository, MockQuoteTemplateRepository};
pub use catalogue_repository::{PortfolioRepository, QuoteTemplateRepository};
#[cfg(test)]
pub use catalogue_service::MockVendorCatalogueService;
pub use catalogue_service::VendorCatalogueService;
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::DashboardQuery;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::NotificationRepository;
#[cfg(test)]
pub use notifications_service::MockNotificationsService;
pub use notifications_service::NotificationsService;
#[cfg(test)]
pub use otp_command::MockOtpCommand;
pub use otp_command::OtpCommand;
#[cfg(test)]
pub use otp_delivery::{MockOtpCodeGenerator, MockOtpSender};
pub use otp_delivery::{OtpCodeGenerator, OtpDeliveryError, OtpSender};
#[cfg(test)]
pub use otp_repository::MockOtpRepository;
pub use otp_repository::OtpRepository;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use settings_repository::MockSettingsRepository;
pub use settings_repository::SettingsRepository;
#[cfg(test)]
pub use settings_service::{MockUserSettingsService, MockVendorSettingsService};
pub use settings_service::{UserSettingsService, VendorSettings, VendorSettingsService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{AccountRecord, UserRepository};
#[cfg(test)]
pub use vendor_profile_repository::MockVendorProfileRepository;
pub use vendor_profile_repository::VendorProfileRepository;

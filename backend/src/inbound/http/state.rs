//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they stay testable without I/O. [`HttpState::new`] wires the
//! domain services over a set of driven ports.

use std::sync::Arc;

use chrono::Duration;
use mockable::Clock;

use crate::domain::otp::DEFAULT_OTP_TTL_SECS;
use crate::domain::ports::{
    AccountCommand, BookingRepository, BookingsService, DashboardQuery, LoginService,
    NotificationRepository, NotificationsService, OtpCodeGenerator, OtpCommand, OtpRepository,
    OtpSender, PasswordHasher, PortfolioRepository, ProfileService, QuoteTemplateRepository,
    SettingsRepository, UserRepository, UserSettingsService, VendorCatalogueService,
    VendorProfileRepository, VendorSettingsService,
};
use crate::domain::{
    AccountService, AuthService, BookingService, BookingServicePorts, CatalogueService,
    DashboardPorts, DashboardService, LeadTransitionPolicy, NotificationService, OtpService,
    SettingsService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential checks and session identity refresh.
    pub login: Arc<dyn LoginService>,
    /// One-time code issuance and verification.
    pub otp: Arc<dyn OtpCommand>,
    /// Registration, password change and account deletion.
    pub accounts: Arc<dyn AccountCommand>,
    /// Profile reads and edits.
    pub profiles: Arc<dyn ProfileService>,
    /// Notification and language preferences.
    pub user_settings: Arc<dyn UserSettingsService>,
    /// Vendor business profile and owner name.
    pub vendor_settings: Arc<dyn VendorSettingsService>,
    /// Customer bookings and vendor leads.
    pub bookings: Arc<dyn BookingsService>,
    /// Quote templates and portfolio.
    pub catalogue: Arc<dyn VendorCatalogueService>,
    /// In-app notification inbox.
    pub notifications: Arc<dyn NotificationsService>,
    /// Customer and vendor dashboards.
    pub dashboards: Arc<dyn DashboardQuery>,
}

/// Credential and time adapters shared by every storage backend.
#[derive(Clone)]
pub struct SecurityPorts {
    /// Password hashing.
    pub hasher: Arc<dyn PasswordHasher>,
    /// One-time code generation.
    pub otp_generator: Arc<dyn OtpCodeGenerator>,
    /// One-time code delivery.
    pub otp_sender: Arc<dyn OtpSender>,
    /// Wall clock.
    pub clock: Arc<dyn Clock>,
}

/// Driven ports the domain services are built over.
#[derive(Clone)]
pub struct DrivenPorts {
    /// Account storage.
    pub users: Arc<dyn UserRepository>,
    /// Vendor profile storage.
    pub vendors: Arc<dyn VendorProfileRepository>,
    /// Outstanding one-time codes.
    pub otp_codes: Arc<dyn OtpRepository>,
    /// Bookings and leads.
    pub bookings: Arc<dyn BookingRepository>,
    /// Quote templates.
    pub quotes: Arc<dyn QuoteTemplateRepository>,
    /// Portfolio entries.
    pub portfolio: Arc<dyn PortfolioRepository>,
    /// Notification inbox.
    pub notifications: Arc<dyn NotificationRepository>,
    /// User preferences.
    pub settings: Arc<dyn SettingsRepository>,
    /// Hashing, code generation, delivery and time.
    pub security: SecurityPorts,
}

impl DrivenPorts {
    /// Use one store for every repository port.
    pub fn from_store<S>(store: Arc<S>, security: SecurityPorts) -> Self
    where
        S: UserRepository
            + VendorProfileRepository
            + OtpRepository
            + BookingRepository
            + QuoteTemplateRepository
            + PortfolioRepository
            + NotificationRepository
            + SettingsRepository
            + 'static,
    {
        Self {
            users: store.clone(),
            vendors: store.clone(),
            otp_codes: store.clone(),
            bookings: store.clone(),
            quotes: store.clone(),
            portfolio: store.clone(),
            notifications: store.clone(),
            settings: store,
            security,
        }
    }
}

/// Tunables applied when wiring the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Lifetime of an issued one-time code.
    pub otp_ttl: Duration,
    /// Rules for vendor lead status changes.
    pub lead_transitions: LeadTransitionPolicy,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            otp_ttl: Duration::seconds(i64::try_from(DEFAULT_OTP_TTL_SECS).unwrap_or(600)),
            lead_transitions: LeadTransitionPolicy::default(),
        }
    }
}

impl HttpState {
    /// Build every domain service over `ports`.
    pub fn new(ports: DrivenPorts, settings: ServiceSettings) -> Self {
        let DrivenPorts {
            users,
            vendors,
            otp_codes,
            bookings,
            quotes,
            portfolio,
            notifications,
            settings: settings_repo,
            security:
                SecurityPorts {
                    hasher,
                    otp_generator,
                    otp_sender,
                    clock,
                },
        } = ports;

        let otp = Arc::new(OtpService::new(
            otp_codes,
            otp_generator,
            otp_sender,
            clock.clone(),
            settings.otp_ttl,
        ));
        let accounts = Arc::new(AccountService::new(
            users.clone(),
            vendors.clone(),
            hasher.clone(),
            clock.clone(),
        ));
        let user_settings = Arc::new(SettingsService::new(
            settings_repo,
            users.clone(),
            vendors.clone(),
            clock.clone(),
        ));

        Self {
            login: Arc::new(AuthService::new(users.clone(), hasher, otp.clone())),
            otp,
            accounts: accounts.clone(),
            profiles: accounts,
            user_settings: user_settings.clone(),
            vendor_settings: user_settings,
            bookings: Arc::new(BookingService::new(
                BookingServicePorts {
                    bookings: bookings.clone(),
                    users,
                    vendors: vendors.clone(),
                    notifications: notifications.clone(),
                },
                clock.clone(),
                settings.lead_transitions,
            )),
            catalogue: Arc::new(CatalogueService::new(
                vendors.clone(),
                quotes.clone(),
                portfolio.clone(),
                clock.clone(),
            )),
            notifications: Arc::new(NotificationService::new(notifications.clone())),
            dashboards: Arc::new(DashboardService::new(
                DashboardPorts {
                    bookings,
                    vendors,
                    notifications,
                    quotes,
                    portfolio,
                },
                clock,
            )),
        }
    }
}

//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, web};

use crate::domain::ports::{
    MockAccountCommand, MockBookingsService, MockDashboardQuery, MockLoginService,
    MockNotificationsService, MockOtpCommand, MockProfileService, MockUserSettingsService,
    MockVendorCatalogueService, MockVendorSettingsService,
};
use chrono::{DateTime, TimeZone, Utc};

use crate::domain::text::limits;
use crate::domain::{
    BoundedText, EmailAddress, Error, KycStatus, PasswordHash, PersonName, PhoneNumber, Role,
    SessionIdentity, User, UserId, VendorId, VendorProfile,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;

/// Customer fixture id.
pub const CUSTOMER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
/// Vendor owner fixture id.
pub const VENDOR_OWNER_ID: &str = "9b2c5a1e-0f4d-4f53-8c7e-2d1f6a9b8c70";

/// Vendor profile fixture id.
pub const VENDOR_ID: &str = "c0a80121-7ac0-4e1c-9f5b-4d8a3e2b1f60";

/// Production session middleware with a fresh key and the `Secure` flag
/// disabled for plain HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
    .middleware()
}

/// Session identity for `role`, using the matching fixture id.
pub fn identity(role: Role) -> SessionIdentity {
    let (id, name) = match role {
        Role::User => (CUSTOMER_ID, "Priya Sharma"),
        Role::Vendor => (VENDOR_OWNER_ID, "Arjun Mehta"),
    };
    SessionIdentity {
        id: UserId::new(id).expect("fixture id"),
        role,
        name: PersonName::new(name).expect("fixture name"),
        gender: None,
        phone: Some(PhoneNumber::new("9876543210").expect("fixture phone")),
    }
}

/// Fixed instant used by response fixtures.
pub fn fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("fixture time")
}

/// Stored account matching [`identity`].
pub fn user(role: Role) -> User {
    let identity = identity(role);
    User {
        id: identity.id,
        email: Some(EmailAddress::new("priya@example.com").expect("fixture email")),
        phone: identity.phone,
        password_hash: Some(PasswordHash::new("$2b$04$fixture")),
        name: identity.name,
        gender: identity.gender,
        role,
        created_at: fixture_time(),
        updated_at: fixture_time(),
    }
}

/// Bounded text fixture.
pub fn text(raw: &str) -> BoundedText {
    BoundedText::new(raw, limits::PARAGRAPH).expect("fixture text")
}

/// Business profile owned by the vendor fixture.
pub fn vendor_profile() -> VendorProfile {
    VendorProfile {
        id: VendorId::new(VENDOR_ID).expect("fixture vendor id"),
        user_id: UserId::new(VENDOR_OWNER_ID).expect("fixture id"),
        business_name: text("Mehta Decorators"),
        category: text("Decoration"),
        city: text("Pune"),
        description: None,
        pan_number: None,
        gst_number: None,
        kyc_status: KycStatus::Pending,
        created_at: fixture_time(),
        updated_at: fixture_time(),
    }
}

/// Mocked driving ports; set expectations, then call [`TestPorts::into_state`].
#[derive(Default)]
pub struct TestPorts {
    pub login: MockLoginService,
    pub otp: MockOtpCommand,
    pub accounts: MockAccountCommand,
    pub profiles: MockProfileService,
    pub user_settings: MockUserSettingsService,
    pub vendor_settings: MockVendorSettingsService,
    pub bookings: MockBookingsService,
    pub catalogue: MockVendorCatalogueService,
    pub notifications: MockNotificationsService,
    pub dashboards: MockDashboardQuery,
}

impl TestPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            login: Arc::new(self.login),
            otp: Arc::new(self.otp),
            accounts: Arc::new(self.accounts),
            profiles: Arc::new(self.profiles),
            user_settings: Arc::new(self.user_settings),
            vendor_settings: Arc::new(self.vendor_settings),
            bookings: Arc::new(self.bookings),
            catalogue: Arc::new(self.catalogue),
            notifications: Arc::new(self.notifications),
            dashboards: Arc::new(self.dashboards),
        }
    }
}

/// Test-only route that stores the posted identity in the session.
pub async fn sign_in(
    session: SessionContext,
    identity: web::Json<SessionIdentity>,
) -> Result<HttpResponse, Error> {
    session.persist_identity(&identity)?;
    Ok(HttpResponse::NoContent().finish())
}

/// The `session` cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Initialise the full `/api` surface over `state` with a `/test/sign-in`
/// helper route.
macro_rules! api_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .app_data(crate::inbound::http::json_config())
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .wrap(crate::middleware::Trace)
                .route(
                    "/test/sign-in",
                    actix_web::web::post().to(crate::inbound::http::test_utils::sign_in),
                )
                .service(
                    actix_web::web::scope("/api").configure(crate::inbound::http::configure),
                ),
        )
        .await
    };
}

/// Sign in as `role` against an [`api_app!`] and return the session cookie.
macro_rules! signed_in {
    ($app:expr, $role:expr) => {{
        let response = actix_web::test::call_service(
            &$app,
            actix_web::test::TestRequest::post()
                .uri("/test/sign-in")
                .set_json(crate::inbound::http::test_utils::identity($role))
                .to_request(),
        )
        .await;
        crate::inbound::http::test_utils::session_cookie(&response)
    }};
}

pub(crate) use {api_app, signed_in};

//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api` handler, the health probes, the request
//! and response DTOs and the session cookie security scheme. Domain types
//! stay free of utoipa; [`ErrorSchema`] and [`ErrorCodeSchema`] stand in for
//! them.
//!
//! The document backs Swagger UI in debug builds and is exported with
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::auth::{
    LoginRequest, OtpSendRequest, OtpSentResponse, OtpVerifiedResponse, OtpVerifyRequest,
    RegisterRequest,
};
use crate::inbound::http::bookings::{
    CreateBookingRequest, CreateLeadRequest, EventDetailsRequest, UpdateLeadRequest,
};
use crate::inbound::http::catalogue::{CreatePortfolioItemRequest, CreateQuoteRequest};
use crate::inbound::http::responses::{
    BookingResponse, CustomerBookingResponse, CustomerResponse, LeadResponse,
    NotificationFeedResponse, NotificationResponse, PortfolioItemResponse, ProfileResponse,
    QuoteTemplateResponse, SessionResponse, StatusCountResponse, UserDashboardResponse,
    UserSettingsResponse, VendorDashboardResponse, VendorProfileResponse,
    VendorSettingsResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::settings::{UserSettingsRequest, VendorSettingsRequest};
use crate::inbound::http::users::{ChangePasswordRequest, ProfileUpdateRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by registration and login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Eventhub API",
        description = "Event marketplace: accounts, bookings, vendor leads, quotes, portfolio, notifications and dashboards."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::send_otp,
        crate::inbound::http::auth::verify_otp,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::auth::refresh_session,
        crate::inbound::http::users::get_profile,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::users::change_password,
        crate::inbound::http::users::delete_account,
        crate::inbound::http::settings::get_user_settings,
        crate::inbound::http::settings::update_user_settings,
        crate::inbound::http::settings::get_vendor_settings,
        crate::inbound::http::settings::update_vendor_settings,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::list_user_bookings,
        crate::inbound::http::bookings::list_leads,
        crate::inbound::http::bookings::create_lead,
        crate::inbound::http::bookings::update_lead,
        crate::inbound::http::catalogue::list_quotes,
        crate::inbound::http::catalogue::create_quote,
        crate::inbound::http::catalogue::delete_quote,
        crate::inbound::http::catalogue::list_portfolio,
        crate::inbound::http::catalogue::add_portfolio_item,
        crate::inbound::http::catalogue::delete_portfolio_item,
        crate::inbound::http::notifications::list_notifications,
        crate::inbound::http::notifications::mark_notification_read,
        crate::inbound::http::dashboard::user_dashboard,
        crate::inbound::http::dashboard::vendor_dashboard,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterRequest,
        OtpSendRequest,
        OtpVerifyRequest,
        LoginRequest,
        OtpSentResponse,
        OtpVerifiedResponse,
        ProfileUpdateRequest,
        ChangePasswordRequest,
        UserSettingsRequest,
        VendorSettingsRequest,
        EventDetailsRequest,
        CreateBookingRequest,
        CreateLeadRequest,
        UpdateLeadRequest,
        CreateQuoteRequest,
        CreatePortfolioItemRequest,
        SessionResponse,
        VendorProfileResponse,
        ProfileResponse,
        UserSettingsResponse,
        VendorSettingsResponse,
        BookingResponse,
        CustomerBookingResponse,
        CustomerResponse,
        LeadResponse,
        QuoteTemplateResponse,
        PortfolioItemResponse,
        NotificationResponse,
        NotificationFeedResponse,
        UserDashboardResponse,
        StatusCountResponse,
        VendorDashboardResponse,
    )),
    tags(
        (name = "auth", description = "Registration, one-time codes and sessions"),
        (name = "users", description = "Profile and account management"),
        (name = "settings", description = "Notification and language preferences"),
        (name = "vendors", description = "Vendor business profile"),
        (name = "bookings", description = "Customer bookings"),
        (name = "leads", description = "Vendor lead pipeline"),
        (name = "catalogue", description = "Quote templates and portfolio"),
        (name = "notifications", description = "In-app notification inbox"),
        (name = "dashboards", description = "Aggregated customer and vendor views"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI registration and schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    fn openapi_booking_schema_uses_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let booking = schemas.get("BookingResponse").expect("BookingResponse schema");

        assert_object_schema_has_field(booking, "eventDate");
        assert_object_schema_has_field(booking, "guestCount");
    }

    #[rstest]
    #[case("/api/register")]
    #[case("/api/auth/login")]
    #[case("/api/auth/otp/send")]
    #[case("/api/user/profile")]
    #[case("/api/vendor/leads/{id}")]
    #[case("/api/vendor/dashboard")]
    #[case("/health/ready")]
    fn openapi_registers_paths(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn openapi_declares_session_cookie_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}

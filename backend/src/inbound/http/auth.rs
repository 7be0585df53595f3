//! Registration, one-time code and session handlers.
//!
//! ```text
//! POST /api/register {"name":"Priya","phone":"9876543210"}
//! POST /api/auth/otp/send {"phone":"9876543210"}
//! POST /api/auth/login {"phone":"9876543210","code":"482913"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::Registration;
use crate::domain::text::limits;
use crate::domain::{
    Credentials, EmailAddress, Error, Gender, NewVendorProfile, OtpCode, Password, PersonName,
    PhoneNumber, Role, SessionIdentity,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{ProfileResponse, SessionResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_optional, parse_required, required_text,
};

const NAME: FieldName = FieldName::new("name");
const EMAIL: FieldName = FieldName::new("email");
const PHONE: FieldName = FieldName::new("phone");
const PASSWORD: FieldName = FieldName::new("password");
const GENDER: FieldName = FieldName::new("gender");
const ROLE: FieldName = FieldName::new("role");
const CODE: FieldName = FieldName::new("code");
const BUSINESS_NAME: FieldName = FieldName::new("businessName");
const CATEGORY: FieldName = FieldName::new("category");
const CITY: FieldName = FieldName::new("city");

/// Registration body for `POST /api/register`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name.
    pub name: Option<String>,
    /// Login email; requires `password`.
    pub email: Option<String>,
    /// Login phone.
    pub phone: Option<String>,
    /// At least 8 characters.
    pub password: Option<String>,
    /// `male`, `female` or `other`.
    pub gender: Option<String>,
    /// `user` (default) or `vendor`.
    pub role: Option<String>,
    /// Vendors only.
    pub business_name: Option<String>,
    /// Vendors only.
    pub category: Option<String>,
    /// Vendors only.
    pub city: Option<String>,
}

/// Body for `POST /api/auth/otp/send`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtpSendRequest {
    /// Phone to send the code to.
    pub phone: Option<String>,
}

/// Body for `POST /api/auth/otp/verify`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerifyRequest {
    /// Phone the code was sent to.
    pub phone: Option<String>,
    /// Six digit code.
    pub code: Option<String>,
}

/// Body for `POST /api/auth/login`: either `email` + `password` or
/// `phone` + `code`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email.
    pub email: Option<String>,
    /// Account password.
    pub password: Option<String>,
    /// Account phone.
    pub phone: Option<String>,
    /// One-time code sent to `phone`.
    pub code: Option<String>,
}

/// Response for `POST /api/auth/otp/send`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtpSentResponse {
    /// When the code stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Response for `POST /api/auth/otp/verify`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerifiedResponse {
    /// Always `true`; failures are reported as errors.
    pub verified: bool,
}

fn parse_phone(value: Option<String>) -> Result<PhoneNumber, Error> {
    parse_required(value, PHONE, |raw| PhoneNumber::new(raw))
}

fn parse_registration(payload: RegisterRequest) -> Result<Registration, Error> {
    let role = parse_optional(payload.role, ROLE, str::parse::<Role>)?.unwrap_or(Role::User);
    let vendor = match role {
        Role::Vendor => Some(NewVendorProfile {
            business_name: required_text(payload.business_name, BUSINESS_NAME, limits::LINE)?,
            category: required_text(payload.category, CATEGORY, limits::LABEL)?,
            city: required_text(payload.city, CITY, limits::LABEL)?,
        }),
        Role::User => None,
    };
    Ok(Registration {
        name: parse_required(payload.name, NAME, |raw| PersonName::new(raw))?,
        email: parse_optional(payload.email, EMAIL, |raw| EmailAddress::new(raw))?,
        phone: parse_optional(payload.phone, PHONE, |raw| PhoneNumber::new(raw))?,
        password: parse_optional(payload.password, PASSWORD, Password::new_secret)?,
        gender: parse_optional(payload.gender, GENDER, str::parse::<Gender>)?,
        role,
        vendor,
    })
}

fn parse_credentials(payload: LoginRequest) -> Result<Credentials, Error> {
    if payload.email.is_some() {
        return Ok(Credentials::EmailPassword {
            email: parse_required(payload.email, EMAIL, |raw| EmailAddress::new(raw))?,
            password: parse_required(payload.password, PASSWORD, Password::for_login)?,
        });
    }
    if payload.phone.is_some() {
        return Ok(Credentials::PhoneOtp {
            phone: parse_phone(payload.phone)?,
            code: parse_required(payload.code, CODE, |raw| OtpCode::new(raw))?,
        });
    }
    Err(missing_field_error(EMAIL))
}

fn session_response(identity: &SessionIdentity) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse::from(identity))
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = ProfileResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email or phone already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = parse_registration(payload.into_inner())?;
    let account = state.accounts.register(registration).await?;
    session.persist_identity(&SessionIdentity::from(&account.user))?;
    Ok(HttpResponse::Created().json(ProfileResponse::from(&account)))
}

/// Issue a one-time code for a phone, replacing any outstanding one.
#[utoipa::path(
    post,
    path = "/api/auth/otp/send",
    request_body = OtpSendRequest,
    responses(
        (status = 200, description = "Code issued", body = OtpSentResponse),
        (status = 400, description = "Invalid phone", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "sendOtp",
    security([])
)]
#[post("/auth/otp/send")]
pub async fn send_otp(
    state: web::Data<HttpState>,
    payload: web::Json<OtpSendRequest>,
) -> ApiResult<web::Json<OtpSentResponse>> {
    let phone = parse_phone(payload.into_inner().phone)?;
    let expires_at = state.otp.send(&phone).await?;
    Ok(web::Json(OtpSentResponse { expires_at }))
}

/// Check and consume a one-time code without signing in.
#[utoipa::path(
    post,
    path = "/api/auth/otp/verify",
    request_body = OtpVerifyRequest,
    responses(
        (status = 200, description = "Code accepted", body = OtpVerifiedResponse),
        (status = 400, description = "Wrong or expired code", body = ErrorSchema),
        (status = 404, description = "No outstanding code", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "verifyOtp",
    security([])
)]
#[post("/auth/otp/verify")]
pub async fn verify_otp(
    state: web::Data<HttpState>,
    payload: web::Json<OtpVerifyRequest>,
) -> ApiResult<web::Json<OtpVerifiedResponse>> {
    let payload = payload.into_inner();
    let phone = parse_phone(payload.phone)?;
    let code = parse_required(payload.code, CODE, |raw| OtpCode::new(raw))?;
    state.otp.verify(&phone, &code).await?;
    Ok(web::Json(OtpVerifiedResponse { verified: true }))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 404, description = "No outstanding code", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = parse_credentials(payload.into_inner())?;
    let identity = state.login.authenticate(&credentials).await?;
    session.persist_identity(&identity)?;
    Ok(session_response(&identity))
}

/// Drop the session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 204, description = "Signed out")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Identity held in the current session.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Current identity", body = SessionResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentSession"
)]
#[get("/auth/session")]
pub async fn current_session(session: SessionContext) -> ApiResult<HttpResponse> {
    let identity = session.require_identity()?;
    Ok(session_response(&identity))
}

/// Re-read the account and rewrite the session identity.
#[utoipa::path(
    post,
    path = "/api/auth/session/refresh",
    responses(
        (status = 200, description = "Refreshed identity", body = SessionResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "refreshSession"
)]
#[post("/auth/session/refresh")]
pub async fn refresh_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let identity = state.login.refresh(&user_id).await?;
    session.persist_identity(&identity)?;
    Ok(session_response(&identity))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;

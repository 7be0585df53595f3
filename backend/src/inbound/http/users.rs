//! Profile and account handlers.
//!
//! ```text
//! GET /api/user/profile
//! PATCH /api/user/profile {"name":"Priya S."}
//! POST /api/user/change-password {"currentPassword":"...","newPassword":"..."}
//! DELETE /api/user/delete-account
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::PasswordChange;
use crate::domain::{EmailAddress, Error, Gender, Password, PersonName, PhoneNumber, ProfileChanges};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::ProfileResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional, parse_required};

const NAME: FieldName = FieldName::new("name");
const GENDER: FieldName = FieldName::new("gender");
const EMAIL: FieldName = FieldName::new("email");
const PHONE: FieldName = FieldName::new("phone");
const CURRENT_PASSWORD: FieldName = FieldName::new("currentPassword");
const NEW_PASSWORD: FieldName = FieldName::new("newPassword");

/// Partial profile update; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    /// Display name.
    pub name: Option<String>,
    /// `male`, `female` or `other`.
    pub gender: Option<String>,
    /// Login email; must not belong to another account.
    pub email: Option<String>,
    /// Login phone; must not belong to another account.
    pub phone: Option<String>,
}

/// Body for `POST /api/user/change-password`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Required when the account already has a password.
    pub current_password: Option<String>,
    /// At least 8 characters.
    pub new_password: Option<String>,
}

fn parse_profile_changes(payload: ProfileUpdateRequest) -> Result<ProfileChanges, Error> {
    Ok(ProfileChanges {
        name: parse_optional(payload.name, NAME, |raw| PersonName::new(raw))?,
        gender: parse_optional(payload.gender, GENDER, str::parse::<Gender>)?,
        email: parse_optional(payload.email, EMAIL, |raw| EmailAddress::new(raw))?,
        phone: parse_optional(payload.phone, PHONE, |raw| PhoneNumber::new(raw))?,
    })
}

fn parse_password_change(payload: ChangePasswordRequest) -> Result<PasswordChange, Error> {
    Ok(PasswordChange {
        current: parse_optional(payload.current_password, CURRENT_PASSWORD, Password::for_login)?,
        new: parse_required(payload.new_password, NEW_PASSWORD, Password::new_secret)?,
    })
}

/// Fetch the caller's profile.
#[utoipa::path(
    get,
    path = "/api/user/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getProfile"
)]
#[get("/user/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = session.require_user_id()?;
    let profile = state.profiles.fetch(&user_id).await?;
    Ok(web::Json(ProfileResponse::from(&profile)))
}

/// Update name, gender, email or phone.
///
/// The session identity is not rewritten; clients call
/// `POST /api/auth/session/refresh` afterwards.
#[utoipa::path(
    patch,
    path = "/api/user/profile",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Email or phone already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[patch("/user/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileUpdateRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = session.require_user_id()?;
    let changes = parse_profile_changes(payload.into_inner())?;
    let profile = state.profiles.update(&user_id, changes).await?;
    Ok(web::Json(ProfileResponse::from(&profile)))
}

/// Replace the caller's password.
#[utoipa::path(
    post,
    path = "/api/user/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Invalid or incorrect password", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "changePassword"
)]
#[post("/user/change-password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ChangePasswordRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let change = parse_password_change(payload.into_inner())?;
    state.accounts.change_password(&user_id, change).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete the caller and everything they own, then end the session.
#[utoipa::path(
    delete,
    path = "/api/user/delete-account",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteAccount"
)]
#[delete("/user/delete-account")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.accounts.delete_account(&user_id).await?;
    session.purge();
    Ok(HttpResponse::NoContent().finish())
}

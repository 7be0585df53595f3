//! User and vendor settings handlers.
//!
//! ```text
//! GET /api/user/settings
//! PATCH /api/user/settings {"smsNotifications":false,"language":"hi"}
//! GET /api/vendor/settings
//! PATCH /api/vendor/settings {"name":"Arjun Mehta","panNumber":"ABCDE1234F"}
//! ```

use actix_web::{get, patch, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::text::limits;
use crate::domain::{
    Error, GstNumber, Language, PanNumber, PersonName, UserSettingsChanges, VendorProfileChanges,
    VendorSettingsUpdate,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{UserSettingsResponse, VendorSettingsResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, optional_text, parse_optional};

const LANGUAGE: FieldName = FieldName::new("language");
const NAME: FieldName = FieldName::new("name");
const BUSINESS_NAME: FieldName = FieldName::new("businessName");
const CATEGORY: FieldName = FieldName::new("category");
const CITY: FieldName = FieldName::new("city");
const DESCRIPTION: FieldName = FieldName::new("description");
const PAN_NUMBER: FieldName = FieldName::new("panNumber");
const GST_NUMBER: FieldName = FieldName::new("gstNumber");

/// Partial update of user preferences.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsRequest {
    /// Email notifications.
    pub email_notifications: Option<bool>,
    /// SMS notifications.
    pub sms_notifications: Option<bool>,
    /// Booking reminders.
    pub booking_reminders: Option<bool>,
    /// Marketing emails.
    pub marketing_emails: Option<bool>,
    /// Language tag such as `en` or `hi`.
    pub language: Option<String>,
}

/// Partial update of the owner name and business profile.
///
/// Blank `description`, `panNumber` and `gstNumber` values are ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorSettingsRequest {
    /// Owner display name.
    pub name: Option<String>,
    /// Trading name.
    pub business_name: Option<String>,
    /// Service category.
    pub category: Option<String>,
    /// Operating city.
    pub city: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Submitting a PAN moves KYC to `submitted`.
    pub pan_number: Option<String>,
    /// GSTIN.
    pub gst_number: Option<String>,
}

fn parse_user_settings(payload: UserSettingsRequest) -> Result<UserSettingsChanges, Error> {
    Ok(UserSettingsChanges {
        email_notifications: payload.email_notifications,
        sms_notifications: payload.sms_notifications,
        booking_reminders: payload.booking_reminders,
        marketing_emails: payload.marketing_emails,
        language: parse_optional(payload.language, LANGUAGE, |raw| Language::new(raw))?,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

fn parse_vendor_settings(payload: VendorSettingsRequest) -> Result<VendorSettingsUpdate, Error> {
    Ok(VendorSettingsUpdate {
        owner_name: parse_optional(payload.name, NAME, |raw| PersonName::new(raw))?,
        profile: VendorProfileChanges {
            business_name: optional_text(payload.business_name, BUSINESS_NAME, limits::LINE)?,
            category: optional_text(payload.category, CATEGORY, limits::LABEL)?,
            city: optional_text(payload.city, CITY, limits::LABEL)?,
            description: optional_text(payload.description, DESCRIPTION, limits::PARAGRAPH)?,
            pan_number: parse_optional(non_blank(payload.pan_number), PAN_NUMBER, |raw| {
                PanNumber::new(raw)
            })?,
            gst_number: parse_optional(non_blank(payload.gst_number), GST_NUMBER, |raw| {
                GstNumber::new(raw)
            })?,
        },
    })
}

/// Fetch the caller's preferences, creating defaults on first access.
#[utoipa::path(
    get,
    path = "/api/user/settings",
    responses(
        (status = 200, description = "User settings", body = UserSettingsResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["settings"],
    operation_id = "getUserSettings"
)]
#[get("/user/settings")]
pub async fn get_user_settings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserSettingsResponse>> {
    let user_id = session.require_user_id()?;
    let settings = state.user_settings.fetch(&user_id).await?;
    Ok(web::Json(UserSettingsResponse::from(&settings)))
}

/// Apply a partial preferences update.
#[utoipa::path(
    patch,
    path = "/api/user/settings",
    request_body = UserSettingsRequest,
    responses(
        (status = 200, description = "Updated settings", body = UserSettingsResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["settings"],
    operation_id = "updateUserSettings"
)]
#[patch("/user/settings")]
pub async fn update_user_settings(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UserSettingsRequest>,
) -> ApiResult<web::Json<UserSettingsResponse>> {
    let user_id = session.require_user_id()?;
    let changes = parse_user_settings(payload.into_inner())?;
    let settings = state.user_settings.update(&user_id, changes).await?;
    Ok(web::Json(UserSettingsResponse::from(&settings)))
}

/// Fetch the owner name and business profile.
#[utoipa::path(
    get,
    path = "/api/vendor/settings",
    responses(
        (status = 200, description = "Vendor settings", body = VendorSettingsResponse),
        (status = 401, description = "Vendor session required", body = ErrorSchema),
        (status = 404, description = "No vendor profile", body = ErrorSchema)
    ),
    tags = ["vendors"],
    operation_id = "getVendorSettings"
)]
#[get("/vendor/settings")]
pub async fn get_vendor_settings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<VendorSettingsResponse>> {
    let user_id = session.require_vendor()?;
    let settings = state.vendor_settings.fetch(&user_id).await?;
    Ok(web::Json(VendorSettingsResponse::from(&settings)))
}

/// Update the owner name and profile fields together.
#[utoipa::path(
    patch,
    path = "/api/vendor/settings",
    request_body = VendorSettingsRequest,
    responses(
        (status = 200, description = "Updated vendor settings", body = VendorSettingsResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Vendor session required", body = ErrorSchema),
        (status = 404, description = "No vendor profile", body = ErrorSchema)
    ),
    tags = ["vendors"],
    operation_id = "updateVendorSettings"
)]
#[patch("/vendor/settings")]
pub async fn update_vendor_settings(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<VendorSettingsRequest>,
) -> ApiResult<web::Json<VendorSettingsResponse>> {
    let user_id = session.require_vendor()?;
    let update = parse_vendor_settings(payload.into_inner())?;
    let settings = state.vendor_settings.update(&user_id, update).await?;
    Ok(web::Json(VendorSettingsResponse::from(&settings)))
}

//! Customer and vendor dashboard handlers.

use actix_web::{get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{UserDashboardResponse, VendorDashboardResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Booking totals, spend, recent bookings and unread notifications.
#[utoipa::path(
    get,
    path = "/api/user/dashboard",
    responses(
        (status = 200, description = "Customer dashboard", body = UserDashboardResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["dashboards"],
    operation_id = "userDashboard"
)]
#[get("/user/dashboard")]
pub async fn user_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserDashboardResponse>> {
    let user_id = session.require_user_id()?;
    let dashboard = state.dashboards.user_dashboard(&user_id).await?;
    Ok(web::Json(UserDashboardResponse::from(&dashboard)))
}

/// Lead pipeline, revenue, conversion and catalogue counts.
#[utoipa::path(
    get,
    path = "/api/vendor/dashboard",
    responses(
        (status = 200, description = "Vendor dashboard", body = VendorDashboardResponse),
        (status = 401, description = "Vendor session required", body = ErrorSchema),
        (status = 404, description = "No vendor profile", body = ErrorSchema)
    ),
    tags = ["dashboards"],
    operation_id = "vendorDashboard"
)]
#[get("/vendor/dashboard")]
pub async fn vendor_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<VendorDashboardResponse>> {
    let user_id = session.require_vendor()?;
    let dashboard = state.dashboards.vendor_dashboard(&user_id).await?;
    Ok(web::Json(VendorDashboardResponse::from(&dashboard)))
}

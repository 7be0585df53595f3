//! Notification inbox handlers.
//!
//! ```text
//! GET /api/user/notifications
//! PATCH /api/user/notifications/{id}
//! ```

use actix_web::{get, patch, web};

use crate::domain::NotificationId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{NotificationFeedResponse, NotificationResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

const ID: FieldName = FieldName::new("id");

/// List the caller's notifications, newest first, with the unread count.
#[utoipa::path(
    get,
    path = "/api/user/notifications",
    responses(
        (status = 200, description = "Inbox", body = NotificationFeedResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/user/notifications")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<NotificationFeedResponse>> {
    let user_id = session.require_user_id()?;
    let feed = state.notifications.list(&user_id).await?;
    Ok(web::Json(NotificationFeedResponse::from(&feed)))
}

/// Mark one of the caller's notifications as read.
#[utoipa::path(
    patch,
    path = "/api/user/notifications/{id}",
    params(("id" = String, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification marked read", body = NotificationResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "markNotificationRead"
)]
#[patch("/user/notifications/{id}")]
pub async fn mark_notification_read(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<NotificationResponse>> {
    let user_id = session.require_user_id()?;
    let id = parse_id::<NotificationId>(&path.into_inner(), ID)?;
    let notification = state.notifications.mark_read(&user_id, &id).await?;
    Ok(web::Json(NotificationResponse::from(&notification)))
}

//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod bookings;
pub mod catalogue;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod notifications;
pub mod responses;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod settings;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Largest accepted JSON body.
pub const JSON_LIMIT_BYTES: usize = 64 * 1024;

/// JSON extractor settings reporting malformed bodies with the standard
/// error payload.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(error::json_error_handler)
}

/// Register every `/api` route; mount inside `web::scope("/api")`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::register)
        .service(auth::send_otp)
        .service(auth::verify_otp)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::current_session)
        .service(auth::refresh_session)
        .service(users::get_profile)
        .service(users::update_profile)
        .service(users::change_password)
        .service(users::delete_account)
        .service(settings::get_user_settings)
        .service(settings::update_user_settings)
        .service(settings::get_vendor_settings)
        .service(settings::update_vendor_settings)
        .service(bookings::create_booking)
        .service(bookings::list_user_bookings)
        .service(bookings::list_leads)
        .service(bookings::create_lead)
        .service(bookings::update_lead)
        .service(catalogue::list_quotes)
        .service(catalogue::create_quote)
        .service(catalogue::delete_quote)
        .service(catalogue::list_portfolio)
        .service(catalogue::add_portfolio_item)
        .service(catalogue::delete_portfolio_item)
        .service(notifications::list_notifications)
        .service(notifications::mark_notification_read)
        .service(dashboard::user_dashboard)
        .service(dashboard::vendor_dashboard);
}

//! Customer booking and vendor lead handlers.
//!
//! ```text
//! POST /api/bookings {"vendorId":"...","eventType":"Wedding","eventDate":"2026-12-12","location":"Pune"}
//! GET /api/user/bookings
//! GET /api/vendor/leads?status=won
//! POST /api/vendor/leads {"customerPhone":"9876543210",...}
//! PATCH /api/vendor/leads/{id} {"status":"quoted","price":85000}
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::BookingRequest;
use crate::domain::text::limits;
use crate::domain::{
    BookingId, BookingStatus, CustomerRef, EmailAddress, Error, EventDetails, LeadChanges,
    LeadDraft, MAX_GUEST_COUNT, PhoneNumber, Price, VendorId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{CustomerBookingResponse, LeadResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, optional_text, parse_date, parse_id, parse_optional,
    require, required_text,
};

const VENDOR_ID: FieldName = FieldName::new("vendorId");
const LEAD_ID: FieldName = FieldName::new("id");
const EVENT_TYPE: FieldName = FieldName::new("eventType");
const EVENT_DATE: FieldName = FieldName::new("eventDate");
const LOCATION: FieldName = FieldName::new("location");
const GUEST_COUNT: FieldName = FieldName::new("guestCount");
const PRICE: FieldName = FieldName::new("price");
const NOTES: FieldName = FieldName::new("notes");
const STATUS: FieldName = FieldName::new("status");
const CUSTOMER_PHONE: FieldName = FieldName::new("customerPhone");
const CUSTOMER_EMAIL: FieldName = FieldName::new("customerEmail");

/// Event fields shared by booking requests and manually recorded leads.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailsRequest {
    /// Kind of event, e.g. `Wedding`.
    pub event_type: Option<String>,
    /// `YYYY-MM-DD`.
    pub event_date: Option<String>,
    /// Venue or area.
    pub location: Option<String>,
    /// Expected guests.
    pub guest_count: Option<i64>,
    /// Budget or agreed price in whole currency units.
    pub price: Option<i64>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Body for `POST /api/bookings`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Vendor profile id to book.
    pub vendor_id: Option<String>,
    /// Event details.
    #[serde(flatten)]
    pub event: EventDetailsRequest,
}

/// Body for `POST /api/vendor/leads`; identify the customer by phone or
/// email.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest {
    /// Registered customer phone.
    pub customer_phone: Option<String>,
    /// Registered customer email, used when no phone is given.
    pub customer_email: Option<String>,
    /// Initial status; `pending` when absent.
    pub status: Option<String>,
    /// Event details.
    #[serde(flatten)]
    pub event: EventDetailsRequest,
}

/// Body for `PATCH /api/vendor/leads/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadRequest {
    /// New status; accepts `new`, `won` and `lost` aliases.
    pub status: Option<String>,
    /// New price.
    pub price: Option<i64>,
    /// New notes.
    pub notes: Option<String>,
}

/// Query for `GET /api/vendor/leads`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeadsQuery {
    /// Only leads in this status.
    pub status: Option<String>,
}

fn parse_status(value: Option<String>) -> Result<Option<BookingStatus>, Error> {
    parse_optional(value, STATUS, str::parse::<BookingStatus>)
}

fn parse_price(value: Option<i64>) -> Result<Option<Price>, Error> {
    value
        .map(|amount| Price::new(amount).map_err(|err| invalid_field_error(PRICE, err)))
        .transpose()
}

fn parse_guest_count(value: Option<i64>) -> Result<Option<u32>, Error> {
    value
        .map(|count| {
            u32::try_from(count)
                .ok()
                .filter(|count| *count <= MAX_GUEST_COUNT)
                .ok_or_else(|| {
                    invalid_field_error(
                        GUEST_COUNT,
                        format_args!("must be between 0 and {MAX_GUEST_COUNT}"),
                    )
                })
        })
        .transpose()
}

fn parse_event_details(payload: EventDetailsRequest) -> Result<EventDetails, Error> {
    Ok(EventDetails {
        event_type: required_text(payload.event_type, EVENT_TYPE, limits::LABEL)?,
        event_date: parse_date(payload.event_date, EVENT_DATE)?,
        location: required_text(payload.location, LOCATION, limits::LINE)?,
        guest_count: parse_guest_count(payload.guest_count)?,
        price: parse_price(payload.price)?,
        notes: optional_text(payload.notes, NOTES, limits::PARAGRAPH)?,
    })
}

fn parse_booking_request(payload: CreateBookingRequest) -> Result<BookingRequest, Error> {
    let vendor_id = require(payload.vendor_id, VENDOR_ID)?;
    Ok(BookingRequest {
        vendor_id: parse_id::<VendorId>(&vendor_id, VENDOR_ID)?,
        details: parse_event_details(payload.event)?,
    })
}

fn parse_customer(phone: Option<String>, email: Option<String>) -> Result<CustomerRef, Error> {
    if let Some(phone) = phone {
        return PhoneNumber::new(&phone)
            .map(CustomerRef::Phone)
            .map_err(|err| invalid_field_error(CUSTOMER_PHONE, err));
    }
    let email = require(email, CUSTOMER_PHONE)?;
    EmailAddress::new(&email)
        .map(CustomerRef::Email)
        .map_err(|err| invalid_field_error(CUSTOMER_EMAIL, err))
}

fn parse_lead_draft(payload: CreateLeadRequest) -> Result<LeadDraft, Error> {
    Ok(LeadDraft {
        customer: parse_customer(payload.customer_phone, payload.customer_email)?,
        status: parse_status(payload.status)?,
        details: parse_event_details(payload.event)?,
    })
}

fn parse_lead_changes(payload: UpdateLeadRequest) -> Result<LeadChanges, Error> {
    let changes = LeadChanges {
        status: parse_status(payload.status)?,
        price: parse_price(payload.price)?,
        notes: optional_text(payload.notes, NOTES, limits::PARAGRAPH)?,
    };
    if changes.is_empty() {
        return Err(Error::invalid_request("supply status, price or notes")
            .with_details(json!({ "field": STATUS.as_str(), "code": "missing_field" })));
    }
    Ok(changes)
}

/// Request a booking with a vendor.
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = CustomerBookingResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown vendor", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateBookingRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let request = parse_booking_request(payload.into_inner())?;
    let booking = state.bookings.request_booking(&user_id, request).await?;
    Ok(HttpResponse::Created().json(CustomerBookingResponse::from(&booking)))
}

/// List the caller's bookings, newest first.
#[utoipa::path(
    get,
    path = "/api/user/bookings",
    responses(
        (status = 200, description = "Bookings", body = [CustomerBookingResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "listUserBookings"
)]
#[get("/user/bookings")]
pub async fn list_user_bookings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CustomerBookingResponse>>> {
    let user_id = session.require_user_id()?;
    let bookings = state.bookings.list_user_bookings(&user_id).await?;
    Ok(web::Json(
        bookings.iter().map(CustomerBookingResponse::from).collect(),
    ))
}

/// List the calling vendor's leads.
#[utoipa::path(
    get,
    path = "/api/vendor/leads",
    params(LeadsQuery),
    responses(
        (status = 200, description = "Leads, newest first", body = [LeadResponse]),
        (status = 400, description = "Unknown status", body = ErrorSchema),
        (status = 401, description = "Vendor session required", body = ErrorSchema)
    ),
    tags = ["leads"],
    operation_id = "listLeads"
)]
#[get("/vendor/leads")]
pub async fn list_leads(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<LeadsQuery>,
) -> ApiResult<web::Json<Vec<LeadResponse>>> {
    let user_id = session.require_vendor()?;
    let status = parse_status(query.into_inner().status)?;
    let leads = state.bookings.list_leads(&user_id, status).await?;
    Ok(web::Json(leads.iter().map(LeadResponse::from).collect()))
}

/// Record a lead for a registered customer.
#[utoipa::path(
    post,
    path = "/api/vendor/leads",
    request_body = CreateLeadRequest,
    responses(
        (status = 201, description = "Lead recorded", body = LeadResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Vendor session required", body = ErrorSchema),
        (status = 404, description = "Customer not registered", body = ErrorSchema)
    ),
    tags = ["leads"],
    operation_id = "createLead"
)]
#[post("/vendor/leads")]
pub async fn create_lead(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateLeadRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_vendor()?;
    let draft = parse_lead_draft(payload.into_inner())?;
    let lead = state.bookings.create_lead(&user_id, draft).await?;
    Ok(HttpResponse::Created().json(LeadResponse::from(&lead)))
}

/// Update status, price or notes of one of the caller's leads.
#[utoipa::path(
    patch,
    path = "/api/vendor/leads/{id}",
    params(("id" = String, Path, description = "Booking id")),
    request_body = UpdateLeadRequest,
    responses(
        (status = 200, description = "Updated lead", body = LeadResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Vendor session required", body = ErrorSchema),
        (status = 404, description = "Lead not found", body = ErrorSchema),
        (status = 409, description = "Illegal status transition", body = ErrorSchema)
    ),
    tags = ["leads"],
    operation_id = "updateLead"
)]
#[patch("/vendor/leads/{id}")]
pub async fn update_lead(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateLeadRequest>,
) -> ApiResult<web::Json<LeadResponse>> {
    let user_id = session.require_vendor()?;
    let booking_id = parse_id::<BookingId>(&path.into_inner(), LEAD_ID)?;
    let changes = parse_lead_changes(payload.into_inner())?;
    let lead = state
        .bookings
        .update_lead(&user_id, &booking_id, changes)
        .await?;
    Ok(web::Json(LeadResponse::from(&lead)))
}

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod tests;

//! Tests for booking and lead handlers.

use super::*;
use crate::domain::{
    Booking, CustomerBooking, CustomerSummary, IllegalTransition, Lead, PersonName, Role, UserId,
};
use crate::inbound::http::test_utils::{
    CUSTOMER_ID, TestPorts, VENDOR_ID as FIXTURE_VENDOR_ID, api_app, fixture_time, signed_in,
    text,
};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::NaiveDate;
use rstest::rstest;
use serde_json::{Value, json};

fn booking(status: BookingStatus) -> Booking {
    EventDetails {
        event_type: text("Wedding"),
        event_date: NaiveDate::from_ymd_opt(2026, 12, 12).expect("date"),
        location: text("Koregaon Park, Pune"),
        guest_count: Some(250),
        price: Some(Price::new(85_000).expect("price")),
        notes: None,
    }
    .into_booking(
        UserId::new(CUSTOMER_ID).expect("id"),
        VendorId::new(FIXTURE_VENDOR_ID).expect("vendor id"),
        status,
        fixture_time(),
    )
}

fn lead(status: BookingStatus) -> Lead {
    Lead {
        booking: booking(status),
        customer: CustomerSummary {
            name: PersonName::new("Priya Sharma").expect("name"),
            phone: Some(PhoneNumber::new("9876543210").expect("phone")),
            email: None,
        },
    }
}

fn booking_body() -> Value {
    json!({
        "vendorId": FIXTURE_VENDOR_ID,
        "eventType": "Wedding",
        "eventDate": "2026-12-12",
        "location": "Koregaon Park, Pune",
        "guestCount": 250,
        "price": 85000,
    })
}

#[actix_web::test]
async fn booking_request_creates_a_pending_booking() {
    let mut ports = TestPorts::default();
    ports
        .bookings
        .expect_request_booking()
        .withf(|_, request| {
            request.vendor_id == VendorId::new(FIXTURE_VENDOR_ID).expect("vendor id")
                && request.details.guest_count == Some(250)
        })
        .times(1)
        .returning(|_, _| {
            Ok(CustomerBooking {
                booking: booking(BookingStatus::Pending),
                vendor_name: text("Mehta Decorators"),
                vendor_category: text("Decoration"),
            })
        });
    let app = api_app!(ports.into_state());
    let cookie = signed_in!(app, Role::User);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/bookings")
            .cookie(cookie)
            .set_json(booking_body())
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["vendorName"], "Mehta Decorators");
    assert_eq!(body["eventDate"], "2026-12-12");
    assert_eq!(body["price"], 85000);
}

#[rstest]
#[case("vendorId", json!("not-a-uuid"))]
#[case("eventDate", json!("12/12/2026"))]
#[case("eventType", json!(null))]
#[case("guestCount", json!(-3))]
#[case("guestCount", json!(3_000_000_000_i64))]
#[case("price", json!(-1))]
#[actix_web::test]
async fn booking_request_names_the_bad_field(#[case] field: &str, #[case] value: Value) {
    let app = api_app!(TestPorts::default().into_state());
    let cookie = signed_in!(app, Role::User);
    let mut body = booking_body();
    body[field] = value;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/bookings")
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], field);
}

#[actix_web::test]
async fn lead_listing_accepts_lead_vocabulary() {
    let mut ports = TestPorts::default();
    ports
        .bookings
        .expect_list_leads()
        .withf(|_, status| *status == Some(BookingStatus::Confirmed))
        .times(1)
        .returning(|_, _| Ok(vec![lead(BookingStatus::Confirmed)]));
    let app = api_app!(ports.into_state());
    let cookie = signed_in!(app, Role::Vendor);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/vendor/leads?status=won")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body[0]["status"], "confirmed");
    assert_eq!(body[0]["customer"]["name"], "Priya Sharma");
}

#[actix_web::test]
async fn leads_are_vendor_only() {
    let app = api_app!(TestPorts::default().into_state());
    let cookie = signed_in!(app, Role::User);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/vendor/leads")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn lead_creation_prefers_the_phone() {
    let mut ports = TestPorts::default();
    ports
        .bookings
        .expect_create_lead()
        .withf(|_, draft| {
            matches!(&draft.customer, CustomerRef::Phone(phone) if phone.as_ref() == "9876543210")
                && draft.status == Some(BookingStatus::Contacted)
        })
        .times(1)
        .returning(|_, _| Ok(lead(BookingStatus::Contacted)));
    let app = api_app!(ports.into_state());
    let cookie = signed_in!(app, Role::Vendor);
    let mut body = booking_body();
    body["customerPhone"] = json!("9876543210");
    body["customerEmail"] = json!("priya@example.com");
    body["status"] = json!("contacted");

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/vendor/leads")
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn lead_creation_requires_a_customer() {
    let app = api_app!(TestPorts::default().into_state());
    let cookie = signed_in!(app, Role::Vendor);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/vendor/leads")
            .cookie(cookie)
            .set_json(booking_body())
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "customerPhone");
}

#[actix_web::test]
async fn empty_lead_update_is_rejected() {
    let app = api_app!(TestPorts::default().into_state());
    let cookie = signed_in!(app, Role::Vendor);
    let id = booking(BookingStatus::Pending).id;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/vendor/leads/{id}"))
            .cookie(cookie)
            .set_json(json!({}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn illegal_transition_is_a_conflict() {
    let mut ports = TestPorts::default();
    ports.bookings.expect_update_lead().returning(|_, _, _| {
        Err(IllegalTransition {
            from: BookingStatus::Pending,
            to: BookingStatus::Confirmed,
        }
        .into())
    });
    let app = api_app!(ports.into_state());
    let cookie = signed_in!(app, Role::Vendor);
    let id = booking(BookingStatus::Pending).id;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/vendor/leads/{id}"))
            .cookie(cookie)
            .set_json(json!({ "status": "won" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "illegal_transition");
}

#[actix_web::test]
async fn lead_path_must_be_a_uuid() {
    let app = api_app!(TestPorts::default().into_state());
    let cookie = signed_in!(app, Role::Vendor);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri("/api/vendor/leads/42")
            .cookie(cookie)
            .set_json(json!({ "status": "quoted" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "invalid_uuid");
}

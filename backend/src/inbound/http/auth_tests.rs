//! Tests for registration and session handlers.

use super::*;
use crate::domain::ports::AccountProfile;
use crate::domain::{ErrorCode, UserId};
use crate::inbound::http::test_utils::{
    CUSTOMER_ID, TestPorts, api_app, fixture_time, identity, session_cookie, signed_in, user,
};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

async fn error_field(response: actix_web::dev::ServiceResponse) -> (ErrorCode, Option<String>) {
    let error: Error = actix_test::read_body_json(response).await;
    let field = error
        .details()
        .and_then(|details| details.get("field"))
        .and_then(Value::as_str)
        .map(str::to_owned);
    (error.code(), field)
}

#[actix_web::test]
async fn register_creates_the_account_and_signs_it_in() {
    let mut ports = TestPorts::default();
    ports
        .accounts
        .expect_register()
        .withf(|registration| {
            registration.role == Role::User
                && registration
                    .phone
                    .as_ref()
                    .is_some_and(|phone| phone.as_ref() == "9876543210")
        })
        .times(1)
        .returning(|_| {
            Ok(AccountProfile {
                user: user(Role::User),
                vendor: None,
            })
        });
    let app = api_app!(ports.into_state());

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({
                "name": "Priya Sharma",
                "email": "priya@example.com",
                "phone": "98765 43210",
                "password": "correct horse",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = session_cookie(&response);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["role"], "user");
    assert_eq!(body["hasPassword"], true);

    let session = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/auth/session")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(session.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(session).await;
    assert_eq!(body["name"], "Priya Sharma");
}

#[rstest]
#[case(json!({ "email": "a@example.com", "password": "long enough" }), "name")]
#[case(json!({ "name": "Arjun", "phone": "9876543210", "role": "vendor" }), "businessName")]
#[case(json!({ "name": "Arjun", "phone": "9876543210", "role": "admin" }), "role")]
#[case(json!({ "name": "Arjun", "email": "a@example.com", "password": "short" }), "password")]
#[case(json!({ "name": "Arjun", "phone": "12" }), "phone")]
#[actix_web::test]
async fn register_rejects_bad_fields(#[case] body: Value, #[case] field: &str) {
    let app = api_app!(TestPorts::default().into_state());

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/register")
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let (code, named) = error_field(response).await;
    assert_eq!(code, ErrorCode::InvalidRequest);
    assert_eq!(named.as_deref(), Some(field));
}

#[actix_web::test]
async fn phone_login_establishes_a_session() {
    let mut ports = TestPorts::default();
    ports
        .login
        .expect_authenticate()
        .withf(|credentials| matches!(credentials, Credentials::PhoneOtp { .. }))
        .times(1)
        .returning(|_| Ok(identity(Role::Vendor)));
    let app = api_app!(ports.into_state());

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "phone": "9876543210", "code": "482913" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["role"], "vendor");
}

#[actix_web::test]
async fn rejected_credentials_are_unauthorised() {
    let mut ports = TestPorts::default();
    ports
        .login
        .expect_authenticate()
        .returning(|_| Err(Error::unauthorized("invalid credentials")));
    let app = api_app!(ports.into_state());

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "priya@example.com", "password": "wrong one" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.response().cookies().next().is_none());
}

#[rstest]
#[case(json!({}), "email")]
#[case(json!({ "email": "priya@example.com" }), "password")]
#[case(json!({ "phone": "9876543210" }), "code")]
#[case(json!({ "phone": "9876543210", "code": "12ab" }), "code")]
#[actix_web::test]
async fn login_names_the_missing_credential(#[case] body: Value, #[case] field: &str) {
    let app = api_app!(TestPorts::default().into_state());

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let (_, named) = error_field(response).await;
    assert_eq!(named.as_deref(), Some(field));
}

#[actix_web::test]
async fn send_otp_reports_the_expiry() {
    let mut ports = TestPorts::default();
    ports
        .otp
        .expect_send()
        .withf(|phone| phone.as_ref() == "+919876543210")
        .times(1)
        .returning(|_| Ok(fixture_time()));
    let app = api_app!(ports.into_state());

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/otp/send")
            .set_json(json!({ "phone": "+91 98765-43210" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: OtpSentResponse = actix_test::read_body_json(response).await;
    assert_eq!(body.expires_at, fixture_time());
}

#[actix_web::test]
async fn verify_otp_passes_through_domain_failures() {
    let mut ports = TestPorts::default();
    ports.otp.expect_verify().returning(|_, _| {
        Err(Error::not_found("no code outstanding")
            .with_details(json!({ "code": "otp_not_found" })))
    });
    let app = api_app!(ports.into_state());

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/otp/verify")
            .set_json(json!({ "phone": "9876543210", "code": "482913" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "otp_not_found");
}

#[actix_web::test]
async fn session_requires_a_cookie() {
    let app = api_app!(TestPorts::default().into_state());

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/auth/session").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn logout_expires_the_cookie() {
    let app = api_app!(TestPorts::default().into_state());
    let cookie = signed_in!(app, Role::User);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let removal = session_cookie(&response);
    assert_eq!(removal.value(), "");
}

#[actix_web::test]
async fn refresh_rewrites_the_identity() {
    let mut ports = TestPorts::default();
    ports
        .login
        .expect_refresh()
        .withf(|id| *id == UserId::new(CUSTOMER_ID).expect("id"))
        .times(1)
        .returning(|_| {
            let mut refreshed = identity(Role::User);
            refreshed.name = PersonName::new("Priya S.").expect("name");
            Ok(refreshed)
        });
    let app = api_app!(ports.into_state());
    let cookie = signed_in!(app, Role::User);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/session/refresh")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: SessionResponse = actix_test::read_body_json(response).await;
    assert_eq!(body.name, "Priya S.");
}

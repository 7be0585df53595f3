//! Shared helpers for driving the full `/api` surface over the in-memory
//! store.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};

use eventhub::Trace;
use eventhub::domain::PhoneNumber;
use eventhub::inbound::http::session_config::SESSION_COOKIE_NAME;
use eventhub::inbound::http::{configure, json_config};
use eventhub::test_support::http::{InMemoryBackend, session_settings};

/// Password used by every registered fixture account.
pub const PASSWORD: &str = "monsoon-2026";

/// Mount the API exactly as the server does.
pub async fn init_app(
    backend: &InMemoryBackend,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .app_data(web::Data::new(backend.state.clone()))
            .app_data(json_config())
            .wrap(Trace)
            .service(
                web::scope("/api")
                    .wrap(session_settings().middleware())
                    .configure(configure),
            ),
    )
    .await
}

/// Status, parsed body and any session cookie set by a response.
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
    pub session: Option<Cookie<'static>>,
}

impl Reply {
    /// Error code of a failure payload.
    pub fn error_code(&self) -> &str {
        self.body["code"].as_str().unwrap_or_default()
    }

    /// Session cookie, failing the test when none was issued.
    pub fn cookie(&self) -> Cookie<'static> {
        self.session.clone().expect("response should set a session cookie")
    }
}

/// Send `request` and collect the reply.
pub async fn send<S, B>(app: &S, request: TestRequest) -> Reply
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let session = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned);
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body should be JSON")
    };
    Reply {
        status,
        body,
        session,
    }
}

/// `method path` with a JSON body and an optional session.
pub fn json_request(
    request: TestRequest,
    body: &Value,
    session: Option<&Cookie<'static>>,
) -> TestRequest {
    let request = request.set_json(body);
    match session {
        Some(cookie) => request.cookie(cookie.clone()),
        None => request,
    }
}

/// Authenticated request without a body.
pub fn with_session(request: TestRequest, session: &Cookie<'static>) -> TestRequest {
    request.cookie(session.clone())
}

/// Register a customer with email, phone and password.
pub async fn register_customer<S, B>(app: &S, name: &str, email: &str, phone: &str) -> Reply
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let body = json!({
        "name": name,
        "email": email,
        "phone": phone,
        "password": PASSWORD,
    });
    let reply = send(app, json_request(TestRequest::post().uri("/api/register"), &body, None)).await;
    assert_eq!(reply.status, StatusCode::CREATED, "register customer: {}", reply.body);
    reply
}

/// Register a vendor owning a decoration business in Pune.
pub async fn register_vendor<S, B>(app: &S, name: &str, email: &str, business: &str) -> Reply
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let body = json!({
        "name": name,
        "email": email,
        "password": PASSWORD,
        "role": "vendor",
        "businessName": business,
        "category": "Decoration",
        "city": "Pune",
    });
    let reply = send(app, json_request(TestRequest::post().uri("/api/register"), &body, None)).await;
    assert_eq!(reply.status, StatusCode::CREATED, "register vendor: {}", reply.body);
    reply
}

/// Vendor profile id from a vendor registration reply.
pub fn vendor_id(registration: &Reply) -> String {
    registration.body["vendor"]["id"]
        .as_str()
        .expect("vendor profile id")
        .to_owned()
}

/// Normalised phone for looking up recorded codes.
pub fn phone(raw: &str) -> PhoneNumber {
    PhoneNumber::new(raw).expect("valid phone")
}

//! Tests for the login service.

use std::sync::Arc;

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    MockOtpCommand, MockPasswordHasher, MockUserRepository, PasswordHashError,
};
use crate::domain::{
    EmailAddress, ErrorCode, OtpCode, OtpVerificationError, Password, PasswordHash, PersonName,
    PhoneNumber, Role, User,
};

fn user(password_hash: Option<&str>) -> User {
    let now = Utc::now();
    User {
        id: UserId::random(),
        email: Some(EmailAddress::new("asha@example.com").expect("email")),
        phone: Some(PhoneNumber::new("9876543210").expect("phone")),
        password_hash: password_hash.map(PasswordHash::new),
        name: PersonName::new("Asha Rao").expect("name"),
        gender: None,
        role: Role::Vendor,
        created_at: now,
        updated_at: now,
    }
}

fn email_credentials() -> Credentials {
    Credentials::EmailPassword {
        email: EmailAddress::new("asha@example.com").expect("email"),
        password: Password::for_login("correct horse").expect("password"),
    }
}

fn phone_credentials() -> Credentials {
    Credentials::PhoneOtp {
        phone: PhoneNumber::new("9876543210").expect("phone"),
        code: OtpCode::new("482913").expect("code"),
    }
}

fn service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
    otp: MockOtpCommand,
) -> AuthService {
    AuthService::new(Arc::new(users), Arc::new(hasher), Arc::new(otp))
}

#[rstest]
#[tokio::test]
async fn email_login_returns_session_identity() {
    let account = user(Some("$2b$04$hash"));
    let expected = SessionIdentity::from(&account);
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(account)));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().times(1).return_once(|_, _| Ok(true));

    let identity = service(users, hasher, MockOtpCommand::new())
        .authenticate(&email_credentials())
        .await
        .expect("login succeeds");

    assert_eq!(identity, expected);
    assert_eq!(identity.role, Role::Vendor);
}

#[rstest]
#[case::unknown_email(None, None)]
#[case::no_password(Some(None), None)]
#[case::wrong_password(Some(Some("$2b$04$hash")), Some(false))]
#[tokio::test]
async fn email_login_rejections_are_unauthorised(
    #[case] stored: Option<Option<&'static str>>,
    #[case] verified: Option<bool>,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(stored.map(user)));
    let mut hasher = MockPasswordHasher::new();
    if let Some(result) = verified {
        hasher
            .expect_verify()
            .times(1)
            .return_once(move |_, _| Ok(result));
    }

    let error = service(users, hasher, MockOtpCommand::new())
        .authenticate(&email_credentials())
        .await
        .expect_err("login rejected");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), "invalid credentials");
}

#[rstest]
#[tokio::test]
async fn hashing_failure_is_internal() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(|_| Ok(Some(user(Some("garbage")))));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .return_once(|_, _| Err(PasswordHashError::malformed_hash("bad prefix")));

    let error = service(users, hasher, MockOtpCommand::new())
        .authenticate(&email_credentials())
        .await
        .expect_err("hash error");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn phone_login_verifies_code_then_loads_user() {
    let account = user(None);
    let mut otp = MockOtpCommand::new();
    otp.expect_verify().times(1).return_once(|_, _| Ok(()));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_phone()
        .times(1)
        .return_once(move |_| Ok(Some(account)));

    let identity = service(users, MockPasswordHasher::new(), otp)
        .authenticate(&phone_credentials())
        .await
        .expect("login succeeds");

    assert_eq!(identity.name.as_ref(), "Asha Rao");
}

#[rstest]
#[tokio::test]
async fn phone_login_without_account_is_unauthorised() {
    let mut otp = MockOtpCommand::new();
    otp.expect_verify().times(1).return_once(|_, _| Ok(()));
    let mut users = MockUserRepository::new();
    users.expect_find_by_phone().times(1).return_once(|_| Ok(None));

    let error = service(users, MockPasswordHasher::new(), otp)
        .authenticate(&phone_credentials())
        .await
        .expect_err("no account");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn phone_login_stops_at_failed_verification() {
    let mut otp = MockOtpCommand::new();
    otp.expect_verify()
        .times(1)
        .return_once(|_, _| Err(OtpVerificationError::Expired.into()));
    let mut users = MockUserRepository::new();
    users.expect_find_by_phone().never();

    let error = service(users, MockPasswordHasher::new(), otp)
        .authenticate(&phone_credentials())
        .await
        .expect_err("expired");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn refresh_of_deleted_account_is_unauthorised() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let error = service(users, MockPasswordHasher::new(), MockOtpCommand::new())
        .refresh(&UserId::random())
        .await
        .expect_err("stale session");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

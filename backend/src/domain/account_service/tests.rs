//! Tests for account registration and profile management.

use std::sync::Arc;

use chrono::Utc;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ports::MockPasswordHasher;
use crate::domain::text::limits;
use crate::domain::{
    BoundedText, EmailAddress, ErrorCode, NewVendorProfile, Password, PasswordHash, PersonName,
    PhoneNumber,
};
use crate::outbound::memory::InMemoryStore;
use crate::test_support::MutableClock;

fn hasher() -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|password| Ok(PasswordHash::new(format!("hashed:{}", password.expose()))));
    hasher
        .expect_verify()
        .returning(|password, hash| Ok(hash.as_ref() == format!("hashed:{}", password.expose())));
    hasher
}

#[fixture]
fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::default())
}

fn service(store: &Arc<InMemoryStore>) -> AccountService {
    AccountService::new(
        store.clone(),
        store.clone(),
        Arc::new(hasher()),
        Arc::new(MutableClock::new(Utc::now())),
    )
}

fn registration(email: Option<&str>, phone: Option<&str>, role: Role) -> Registration {
    let text = |raw: &str| BoundedText::new(raw, limits::LINE).expect("text");
    Registration {
        name: PersonName::new("Asha Rao").expect("name"),
        email: email.map(|e| EmailAddress::new(e).expect("email")),
        phone: phone.map(|p| PhoneNumber::new(p).expect("phone")),
        password: email.map(|_| Password::new_secret("s3cret-pass").expect("password")),
        gender: None,
        role,
        vendor: (role == Role::Vendor).then(|| NewVendorProfile {
            business_name: text("Lens & Light"),
            category: text("Photography"),
            city: text("Pune"),
        }),
    }
}

#[rstest]
#[tokio::test]
async fn vendor_registration_creates_user_and_profile(store: Arc<InMemoryStore>) {
    let service = service(&store);

    let account = service
        .register(registration(Some("asha@example.com"), None, Role::Vendor))
        .await
        .expect("registered");

    let vendor = account.vendor.expect("vendor profile");
    assert_eq!(vendor.user_id, account.user.id);
    let stored = VendorProfileRepository::find_by_user_id(store.as_ref(), &account.user.id)
        .await
        .expect("lookup");
    assert_eq!(stored, Some(vendor));
    assert_eq!(
        account.user.password_hash.as_ref().map(AsRef::as_ref),
        Some("hashed:s3cret-pass")
    );
}

#[rstest]
#[case::phone(
    registration(None, Some("9876543210"), Role::User),
    registration(None, Some("98765 43210"), Role::User),
    "phone"
)]
#[case::email(
    registration(Some("asha@example.com"), None, Role::User),
    registration(Some("ASHA@example.com"), None, Role::Vendor),
    "email"
)]
#[tokio::test]
async fn duplicate_contacts_conflict(
    store: Arc<InMemoryStore>,
    #[case] first: Registration,
    #[case] second: Registration,
    #[case] field: &str,
) {
    let service = service(&store);
    service.register(first).await.expect("first registration");

    let error = service.register(second).await.expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.details().and_then(|d| d.get("field")), Some(&json!(field)));
}

#[rstest]
#[tokio::test]
async fn email_registration_requires_password(store: Arc<InMemoryStore>) {
    let mut request = registration(Some("asha@example.com"), None, Role::User);
    request.password = None;

    let error = service(&store).register(request).await.expect_err("no password");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details().and_then(|d| d.get("field")),
        Some(&json!("password"))
    );
}

#[rstest]
#[tokio::test]
async fn vendor_registration_requires_business_details(store: Arc<InMemoryStore>) {
    let mut request = registration(None, Some("9876543210"), Role::Vendor);
    request.vendor = None;

    let error = service(&store).register(request).await.expect_err("no details");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert!(
        UserRepository::find_by_phone(store.as_ref(), &PhoneNumber::new("9876543210").expect("phone"))
            .await
            .expect("lookup")
            .is_none()
    );
}

#[rstest]
#[tokio::test]
async fn change_password_checks_current_password(store: Arc<InMemoryStore>) {
    let service = service(&store);
    let account = service
        .register(registration(Some("asha@example.com"), None, Role::User))
        .await
        .expect("registered");
    let new = Password::new_secret("another-pass").expect("password");

    let missing = service
        .change_password(
            &account.user.id,
            PasswordChange {
                current: None,
                new: new.clone(),
            },
        )
        .await
        .expect_err("current required");
    assert_eq!(missing.code(), ErrorCode::InvalidRequest);

    service
        .change_password(
            &account.user.id,
            PasswordChange {
                current: Some(Password::for_login("s3cret-pass").expect("password")),
                new,
            },
        )
        .await
        .expect("password changed");

    let stored = UserRepository::find_by_id(store.as_ref(), &account.user.id)
        .await
        .expect("lookup")
        .expect("user");
    assert_eq!(
        stored.password_hash.as_ref().map(AsRef::as_ref),
        Some("hashed:another-pass")
    );
}

#[rstest]
#[tokio::test]
async fn phone_only_account_can_set_first_password(store: Arc<InMemoryStore>) {
    let service = service(&store);
    let account = service
        .register(registration(None, Some("9876543210"), Role::User))
        .await
        .expect("registered");

    service
        .change_password(
            &account.user.id,
            PasswordChange {
                current: None,
                new: Password::new_secret("first-pass").expect("password"),
            },
        )
        .await
        .expect("first password set");
}

#[rstest]
#[tokio::test]
async fn profile_update_rejects_email_of_another_account(store: Arc<InMemoryStore>) {
    let service = service(&store);
    service
        .register(registration(Some("taken@example.com"), None, Role::User))
        .await
        .expect("first account");
    let account = service
        .register(registration(None, Some("9876543210"), Role::User))
        .await
        .expect("second account");

    let changes = ProfileChanges {
        email: Some(EmailAddress::new("taken@example.com").expect("email")),
        ..ProfileChanges::default()
    };
    let error = service
        .update(&account.user.id, changes)
        .await
        .expect_err("email taken");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn profile_update_persists_changes(store: Arc<InMemoryStore>) {
    let service = service(&store);
    let account = service
        .register(registration(None, Some("9876543210"), Role::User))
        .await
        .expect("registered");

    let changes = ProfileChanges {
        name: Some(PersonName::new("Asha R. Rao").expect("name")),
        gender: Some(crate::domain::Gender::Female),
        ..ProfileChanges::default()
    };
    let updated = service
        .update(&account.user.id, changes)
        .await
        .expect("updated");

    let fetched = ProfileService::fetch(&service, &account.user.id)
        .await
        .expect("fetched");
    assert_eq!(fetched, updated);
    assert_eq!(fetched.user.name.as_ref(), "Asha R. Rao");
}

#[rstest]
#[tokio::test]
async fn deleting_unknown_account_is_not_found(store: Arc<InMemoryStore>) {
    let error = service(&store)
        .delete_account(&UserId::random())
        .await
        .expect_err("missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

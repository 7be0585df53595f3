//! Tests for the user value types.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case("9876543210", "9876543210")]
#[case("98765 43210", "9876543210")]
#[case("+91 98765-43210", "+919876543210")]
#[case("(022) 2345 6789", "02223456789")]
fn phone_numbers_are_normalised(#[case] raw: &str, #[case] expected: &str) {
    let phone = PhoneNumber::new(raw).expect("valid phone");
    assert_eq!(phone.as_ref(), expected);
}

#[rstest]
#[case("", UserValidationError::EmptyPhone)]
#[case("12345", UserValidationError::InvalidPhone { min: PHONE_DIGITS_MIN, max: PHONE_DIGITS_MAX })]
#[case("98765abcde", UserValidationError::InvalidPhone { min: PHONE_DIGITS_MIN, max: PHONE_DIGITS_MAX })]
#[case("1234567890123456", UserValidationError::InvalidPhone { min: PHONE_DIGITS_MIN, max: PHONE_DIGITS_MAX })]
fn invalid_phone_numbers_are_rejected(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(PhoneNumber::new(raw), Err(expected));
}

#[rstest]
fn emails_are_trimmed_and_lowercased() {
    let email = EmailAddress::new("  Priya@Example.COM ").expect("valid email");
    assert_eq!(email.as_ref(), "priya@example.com");
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("priya", UserValidationError::InvalidEmail)]
#[case("priya@example", UserValidationError::InvalidEmail)]
#[case("pri ya@example.com", UserValidationError::InvalidEmail)]
fn invalid_emails_are_rejected(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::new(raw), Err(expected));
}

#[rstest]
#[case("Priya Sharma")]
#[case("D'Souza")]
#[case("José Ramírez-Núñez")]
#[case("Dr. K. Rao")]
fn names_accept_common_forms(#[case] raw: &str) {
    let name = PersonName::new(raw).expect("valid name");
    assert_eq!(name.as_ref(), raw);
}

#[rstest]
#[case("   ", UserValidationError::EmptyName)]
#[case("A", UserValidationError::NameTooShort { min: NAME_MIN })]
#[case("bad$name", UserValidationError::NameInvalidCharacters)]
fn invalid_names_are_rejected(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(PersonName::new(raw), Err(expected));
}

#[rstest]
fn overlong_names_are_rejected() {
    let raw = "a".repeat(NAME_MAX + 1);
    assert_eq!(
        PersonName::new(raw),
        Err(UserValidationError::NameTooLong { max: NAME_MAX })
    );
}

#[rstest]
#[case("vendor", Role::Vendor)]
#[case(" USER ", Role::User)]
fn roles_parse_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
    assert_eq!(raw.parse::<Role>(), Ok(expected));
}

#[rstest]
fn gender_rejects_unknown_values() {
    assert_eq!("unknown".parse::<Gender>(), Err(UserValidationError::InvalidGender));
}

#[rstest]
fn value_types_deserialise_through_validation() {
    let phone: Result<PhoneNumber, _> = serde_json::from_value(json!("123"));
    assert!(phone.is_err());
    let email: EmailAddress =
        serde_json::from_value(json!("A@B.io")).expect("email deserialises");
    assert_eq!(email.as_ref(), "a@b.io");
}

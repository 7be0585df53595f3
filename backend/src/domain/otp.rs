//! One-time passcodes used for phone logins.
//!
//! A phone owns at most one outstanding code. Issuing a new code replaces the
//! previous one and verifying a code consumes it. Checks run in a fixed
//! order: existence, code match, then expiry.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use super::{Error, PhoneNumber};

/// Smallest code the generator may produce.
pub const OTP_CODE_MIN: u32 = 100_000;
/// Largest code the generator may produce.
pub const OTP_CODE_MAX: u32 = 999_999;
/// Default lifetime of an issued code, in seconds.
pub const DEFAULT_OTP_TTL_SECS: u64 = 600;

/// Error returned when a submitted code is not six ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("otp code must be exactly 6 digits")]
pub struct InvalidOtpCode;

/// Six digit one-time code.
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Parse a code submitted by a client.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidOtpCode> {
        let code = raw.as_ref().trim();
        if code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit()) && !code.starts_with('0') {
            Ok(Self(code.to_owned()))
        } else {
            Err(InvalidOtpCode)
        }
    }

    /// Build a code from a generated number within
    /// [`OTP_CODE_MIN`]..=[`OTP_CODE_MAX`].
    pub fn from_number(value: u32) -> Result<Self, InvalidOtpCode> {
        if (OTP_CODE_MIN..=OTP_CODE_MAX).contains(&value) {
            Ok(Self(value.to_string()))
        } else {
            Err(InvalidOtpCode)
        }
    }

    /// Build a code from any number, clamping it into the valid range.
    #[must_use]
    pub fn clamped(value: u32) -> Self {
        Self(value.clamp(OTP_CODE_MIN, OTP_CODE_MAX).to_string())
    }
}

impl AsRef<str> for OtpCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

// Codes are credentials; keep them out of debug logs.
impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(******)")
    }
}

/// Reasons a verification attempt is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OtpVerificationError {
    /// No outstanding code for the phone.
    #[error("no verification code was requested for this phone")]
    NotFound,
    /// The submitted code differs from the stored one.
    #[error("verification code is incorrect")]
    Invalid,
    /// The stored code has passed its expiry.
    #[error("verification code has expired")]
    Expired,
}

impl OtpVerificationError {
    /// Stable detail code reported to clients.
    #[must_use]
    pub const fn detail_code(self) -> &'static str {
        match self {
            Self::NotFound => "otp_not_found",
            Self::Invalid => "otp_invalid",
            Self::Expired => "otp_expired",
        }
    }
}

impl From<OtpVerificationError> for Error {
    fn from(value: OtpVerificationError) -> Self {
        let details = json!({ "field": "otp", "code": value.detail_code() });
        match value {
            OtpVerificationError::NotFound => Error::not_found(value.to_string()),
            OtpVerificationError::Invalid | OtpVerificationError::Expired => {
                Error::invalid_request(value.to_string())
            }
        }
        .with_details(details)
    }
}

/// Stored one-time code for a phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpRecord {
    /// Phone the code was sent to; the record key.
    pub phone: PhoneNumber,
    /// Issued code.
    pub code: OtpCode,
    /// Instant after which the code no longer verifies.
    pub expires_at: DateTime<Utc>,
    /// Issue instant.
    pub created_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Build a record issued at `now` that lives for `ttl`.
    #[must_use]
    pub fn issue(phone: PhoneNumber, code: OtpCode, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            phone,
            code,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    /// Check a submitted code against this record.
    ///
    /// The code comparison happens before the expiry check, so a wrong code
    /// is reported as [`OtpVerificationError::Invalid`] even when the record
    /// has also expired.
    pub fn check(&self, code: &OtpCode, now: DateTime<Utc>) -> Result<(), OtpVerificationError> {
        if self.code != *code {
            return Err(OtpVerificationError::Invalid);
        }
        if now > self.expires_at {
            return Err(OtpVerificationError::Expired);
        }
        Ok(())
    }
}

/// Verify `code` against an optional stored record.
pub fn verify_record(
    record: Option<&OtpRecord>,
    code: &OtpCode,
    now: DateTime<Utc>,
) -> Result<(), OtpVerificationError> {
    record
        .ok_or(OtpVerificationError::NotFound)?
        .check(code, now)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[fixture]
    fn record(issued_at: DateTime<Utc>) -> OtpRecord {
        OtpRecord::issue(
            PhoneNumber::new("9876543210").expect("phone"),
            OtpCode::new("482913").expect("code"),
            issued_at,
            Duration::seconds(600),
        )
    }

    #[rstest]
    #[case("12345")]
    #[case("1234567")]
    #[case("12a456")]
    #[case("012345")]
    fn rejects_malformed_codes(#[case] raw: &str) {
        assert_eq!(OtpCode::new(raw), Err(InvalidOtpCode));
    }

    #[rstest]
    #[case(OTP_CODE_MIN - 1)]
    #[case(OTP_CODE_MAX + 1)]
    fn from_number_enforces_range(#[case] value: u32) {
        assert_eq!(OtpCode::from_number(value), Err(InvalidOtpCode));
    }

    #[rstest]
    fn matching_code_within_ttl_verifies(record: OtpRecord, issued_at: DateTime<Utc>) {
        let code = OtpCode::new("482913").expect("code");
        assert_eq!(record.check(&code, issued_at + Duration::seconds(600)), Ok(()));
    }

    #[rstest]
    fn correct_code_after_expiry_is_expired(record: OtpRecord, issued_at: DateTime<Utc>) {
        let code = OtpCode::new("482913").expect("code");
        assert_eq!(
            record.check(&code, issued_at + Duration::seconds(601)),
            Err(OtpVerificationError::Expired)
        );
    }

    #[rstest]
    fn mismatch_is_reported_before_expiry(record: OtpRecord, issued_at: DateTime<Utc>) {
        let code = OtpCode::new("111111").expect("code");
        assert_eq!(
            record.check(&code, issued_at + Duration::hours(1)),
            Err(OtpVerificationError::Invalid)
        );
    }

    #[rstest]
    fn missing_record_is_not_found(issued_at: DateTime<Utc>) {
        let code = OtpCode::new("482913").expect("code");
        assert_eq!(
            verify_record(None, &code, issued_at),
            Err(OtpVerificationError::NotFound)
        );
    }

    #[rstest]
    #[case(OtpVerificationError::NotFound, ErrorCode::NotFound, "otp_not_found")]
    #[case(OtpVerificationError::Invalid, ErrorCode::InvalidRequest, "otp_invalid")]
    #[case(OtpVerificationError::Expired, ErrorCode::InvalidRequest, "otp_expired")]
    fn maps_to_domain_errors(
        #[case] failure: OtpVerificationError,
        #[case] code: ErrorCode,
        #[case] detail: &str,
    ) {
        let error = Error::from(failure);
        assert_eq!(error.code(), code);
        assert_eq!(
            error.details().and_then(|d| d.get("code")),
            Some(&json!(detail))
        );
    }

    #[rstest]
    fn debug_output_hides_the_code() {
        let code = OtpCode::new("482913").expect("code");
        assert!(!format!("{code:?}").contains("482913"));
    }
}

//! Authentication primitives: passwords, password hashes, login credentials
//! and the identity carried by a session.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{EmailAddress, Gender, OtpCode, PersonName, PhoneNumber, Role, User, UserId};

/// Minimum length for newly chosen passwords.
pub const PASSWORD_MIN: usize = 8;
/// Maximum password length accepted by bcrypt without truncation.
pub const PASSWORD_MAX: usize = 72;

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// New password shorter than [`PASSWORD_MIN`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum length.
        min: usize,
    },
    /// New password longer than [`PASSWORD_MAX`] bytes.
    #[error("password must be at most {max} bytes")]
    PasswordTooLong {
        /// Maximum length.
        max: usize,
    },
}

/// Plain-text password held in memory that is wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Accept any non-empty password, as typed at login.
    ///
    /// Caller-provided whitespace is preserved to avoid surprising
    /// credential comparisons.
    pub fn for_login(raw: &str) -> Result<Self, CredentialsValidationError> {
        if raw.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Accept a newly chosen password, enforcing length rules.
    pub fn new_secret(raw: &str) -> Result<Self, CredentialsValidationError> {
        if raw.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        if raw.chars().count() < PASSWORD_MIN {
            return Err(CredentialsValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if raw.len() > PASSWORD_MAX {
            return Err(CredentialsValidationError::PasswordTooLong { max: PASSWORD_MAX });
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Opaque password hash produced by the password hashing port.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a hash string produced by a hasher or loaded from storage.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Validated login credentials.
///
/// # Examples
/// ```
/// use eventhub::domain::{Credentials, EmailAddress, Password};
///
/// let creds = Credentials::EmailPassword {
///     email: EmailAddress::new("priya@example.com").unwrap(),
///     password: Password::for_login("secret").unwrap(),
/// };
/// assert!(matches!(creds, Credentials::EmailPassword { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Email and password.
    EmailPassword {
        /// Login email.
        email: EmailAddress,
        /// Plain-text password.
        password: Password,
    },
    /// Phone number and a previously issued one-time code.
    PhoneOtp {
        /// Login phone.
        phone: PhoneNumber,
        /// One-time code sent to the phone.
        code: OtpCode,
    },
}

/// Minimal identity stored in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    /// Authenticated user id.
    pub id: UserId,
    /// Marketplace role.
    pub role: Role,
    /// Display name.
    pub name: PersonName,
    /// Optional gender.
    pub gender: Option<Gender>,
    /// Optional phone.
    pub phone: Option<PhoneNumber>,
}

impl From<&User> for SessionIdentity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            name: user.name.clone(),
            gender: user.gender,
            phone: user.phone.clone(),
        }
    }
}

//! Driving port for issuing and checking one-time codes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, OtpCode, PhoneNumber};

/// One-time code use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OtpCommand: Send + Sync {
    /// Issue a fresh code for `phone`, replacing any outstanding one, and
    /// return its expiry.
    async fn send(&self, phone: &PhoneNumber) -> Result<DateTime<Utc>, Error>;

    /// Check and consume the outstanding code for `phone`.
    async fn verify(&self, phone: &PhoneNumber, code: &OtpCode) -> Result<(), Error>;
}

//! Ports for generating one-time codes and delivering them to phones.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, OtpCode, PhoneNumber};

use super::define_port_error;

define_port_error! {
    /// Errors raised while delivering a code.
    pub enum OtpDeliveryError {
        /// The delivery channel refused or failed the message.
        Delivery { message: String } => "otp delivery failed: {message}",
    }
}

impl From<OtpDeliveryError> for Error {
    fn from(value: OtpDeliveryError) -> Self {
        Self::service_unavailable(value.to_string())
    }
}

/// Source of fresh six digit codes.
#[cfg_attr(test, mockall::automock)]
pub trait OtpCodeGenerator: Send + Sync {
    /// Produce a uniformly random code.
    fn generate(&self) -> OtpCode;
}

/// Channel that delivers codes to phones.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OtpSender: Send + Sync {
    /// Deliver `code` to `phone`.
    async fn send(
        &self,
        phone: &PhoneNumber,
        code: &OtpCode,
        expires_at: DateTime<Utc>,
    ) -> Result<(), OtpDeliveryError>;
}

//! Credential adapters: bcrypt hashing and one-time code generation and
//! delivery.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use rand::rngs::OsRng;
use tracing::info;

use crate::domain::otp::{OTP_CODE_MAX, OTP_CODE_MIN};
use crate::domain::ports::{
    OtpCodeGenerator, OtpDeliveryError, OtpSender, PasswordHashError, PasswordHasher,
};
use crate::domain::{OtpCode, Password, PasswordHash, PhoneNumber};

/// Bcrypt password hashing on the blocking thread pool.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher using `cost` rounds.
    ///
    /// Costs outside bcrypt's accepted range (4..=31) are clamped.
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
        }
    }

    /// Configured cost.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let secret = password.clone();
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(secret.expose(), cost))
            .await
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(PasswordHash::new(hashed))
    }

    async fn verify(
        &self,
        password: &Password,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let secret = password.clone();
        let stored = hash.as_ref().to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(secret.expose(), &stored))
            .await
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?
            .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))
    }
}

/// Uniform six digit codes from the operating system RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomOtpCodeGenerator;

impl OtpCodeGenerator for RandomOtpCodeGenerator {
    fn generate(&self) -> OtpCode {
        OtpCode::clamped(OsRng.gen_range(OTP_CODE_MIN..=OTP_CODE_MAX))
    }
}

/// Sender that writes codes to the log instead of an SMS gateway.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingOtpSender;

#[async_trait]
impl OtpSender for LoggingOtpSender {
    async fn send(
        &self,
        phone: &PhoneNumber,
        code: &OtpCode,
        expires_at: DateTime<Utc>,
    ) -> Result<(), OtpDeliveryError> {
        info!(
            phone = %phone,
            code = code.as_ref(),
            expires_at = %expires_at,
            "one-time code issued"
        );
        Ok(())
    }
}

//! One-time code issuance and verification.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{OtpCodeGenerator, OtpCommand, OtpRepository, OtpSender};
use crate::domain::{
    Error, OtpCode, OtpRecord, OtpVerificationError, PhoneNumber, otp::verify_record,
};

/// Service implementing [`OtpCommand`].
#[derive(Clone)]
pub struct OtpService {
    repo: Arc<dyn OtpRepository>,
    generator: Arc<dyn OtpCodeGenerator>,
    sender: Arc<dyn OtpSender>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl OtpService {
    /// Create a service issuing codes that live for `ttl`.
    pub fn new(
        repo: Arc<dyn OtpRepository>,
        generator: Arc<dyn OtpCodeGenerator>,
        sender: Arc<dyn OtpSender>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            repo,
            generator,
            sender,
            clock,
            ttl,
        }
    }
}

#[async_trait]
impl OtpCommand for OtpService {
    async fn send(&self, phone: &PhoneNumber) -> Result<DateTime<Utc>, Error> {
        let code = self.generator.generate();
        let record = OtpRecord::issue(phone.clone(), code, self.clock.utc(), self.ttl);
        self.repo.upsert(&record).await?;
        self.sender
            .send(&record.phone, &record.code, record.expires_at)
            .await?;
        info!(phone = %phone, expires_at = %record.expires_at, "issued one-time code");
        Ok(record.expires_at)
    }

    async fn verify(&self, phone: &PhoneNumber, code: &OtpCode) -> Result<(), Error> {
        let record = self.repo.find(phone).await?;
        verify_record(record.as_ref(), code, self.clock.utc())?;
        if !self.repo.delete_matching(phone, code).await? {
            return Err(OtpVerificationError::NotFound.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;

//! Port abstraction for one-time code storage.

use async_trait::async_trait;

use crate::domain::{OtpCode, OtpRecord, PhoneNumber};

use super::RepositoryError;

/// Storage for outstanding one-time codes, keyed by phone.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Insert the record, replacing any existing record for the phone.
    async fn upsert(&self, record: &OtpRecord) -> Result<(), RepositoryError>;

    /// Fetch the outstanding record for `phone`.
    async fn find(&self, phone: &PhoneNumber) -> Result<Option<OtpRecord>, RepositoryError>;

    /// Remove the record for `phone` only while it still holds `code`.
    ///
    /// Returns whether a record was removed. Of two concurrent calls for
    /// the same code at most one sees `true`, and a code re-issued in the
    /// meantime is left in place.
    async fn delete_matching(
        &self,
        phone: &PhoneNumber,
        code: &OtpCode,
    ) -> Result<bool, RepositoryError>;
}

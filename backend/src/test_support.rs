//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled when running tests or
//! when the `test-support` feature is enabled.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{OtpDeliveryError, OtpSender};
use crate::domain::text::limits;
use crate::domain::{
    BoundedText, EventDetails, KycStatus, OtpCode, PersonName, PhoneNumber, Role, User, UserId,
    VendorId, VendorProfile,
};

pub mod http;

/// Clock whose current instant only moves when a test advances it.
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward by `delta`.
    ///
    /// # Panics
    ///
    /// Panics if `delta` does not fit a `chrono` duration.
    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => {
                panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}")
            }
        };
        *self.lock_clock() += delta;
    }

    /// Move the clock forward by whole seconds.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// OTP sender that keeps every delivered code in memory.
#[derive(Debug, Default)]
pub struct RecordingOtpSender {
    sent: Mutex<HashMap<String, Vec<OtpCode>>>,
}

impl RecordingOtpSender {
    /// Most recent code delivered to `phone`.
    pub fn last_code_for(&self, phone: &PhoneNumber) -> Option<OtpCode> {
        self.lock()
            .get(phone.as_ref())
            .and_then(|codes| codes.last().cloned())
    }

    /// Number of codes delivered to `phone`.
    pub fn deliveries_to(&self, phone: &PhoneNumber) -> usize {
        self.lock().get(phone.as_ref()).map_or(0, Vec::len)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<OtpCode>>> {
        match self.sent.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("otp sender mutex"),
        }
    }
}

#[async_trait]
impl OtpSender for RecordingOtpSender {
    async fn send(
        &self,
        phone: &PhoneNumber,
        code: &OtpCode,
        _expires_at: DateTime<Utc>,
    ) -> Result<(), OtpDeliveryError> {
        self.lock()
            .entry(phone.as_ref().to_owned())
            .or_default()
            .push(code.clone());
        Ok(())
    }
}

/// Shared sender handle for wiring into services and asserting on later.
pub fn recording_sender() -> Arc<RecordingOtpSender> {
    Arc::new(RecordingOtpSender::default())
}

fn text(raw: &str) -> BoundedText {
    match BoundedText::new(raw, limits::LINE) {
        Ok(text) => text,
        Err(error) => panic!("fixture text {raw:?}: {error}"),
    }
}

/// Phone-only user without a password.
///
/// # Panics
///
/// Panics if `name` or `phone` fail validation.
pub fn user_fixture(name: &str, phone: &str, role: Role) -> User {
    let now = Utc::now();
    let name = match PersonName::new(name) {
        Ok(name) => name,
        Err(error) => panic!("fixture name {name:?}: {error}"),
    };
    let phone = match PhoneNumber::new(phone) {
        Ok(phone) => phone,
        Err(error) => panic!("fixture phone {phone:?}: {error}"),
    };
    User {
        id: UserId::random(),
        email: None,
        phone: Some(phone),
        password_hash: None,
        name,
        gender: None,
        role,
        created_at: now,
        updated_at: now,
    }
}

/// Photography profile in Pune owned by `owner`.
pub fn vendor_profile_fixture(owner: &User, business: &str) -> VendorProfile {
    let now = Utc::now();
    VendorProfile {
        id: VendorId::random(),
        user_id: owner.id,
        business_name: text(business),
        category: text("Photography"),
        city: text("Pune"),
        description: None,
        pan_number: None,
        gst_number: None,
        kyc_status: KycStatus::Pending,
        created_at: now,
        updated_at: now,
    }
}

/// Event at a fixed venue with no guests, price or notes.
pub fn event_details(event_type: &str, event_date: NaiveDate) -> EventDetails {
    EventDetails {
        event_type: text(event_type),
        event_date,
        location: text("Koregaon Park, Pune"),
        guest_count: None,
        price: None,
        notes: None,
    }
}

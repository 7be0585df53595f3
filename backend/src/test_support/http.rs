//! In-memory application state for HTTP integration tests.

use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use chrono::{DateTime, TimeZone, Utc};

use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::{DrivenPorts, HttpState, SecurityPorts, ServiceSettings};
use crate::outbound::memory::InMemoryStore;
use crate::outbound::security::{BcryptPasswordHasher, RandomOtpCodeGenerator};

use super::{MutableClock, RecordingOtpSender};

/// Lowest bcrypt cost, keeping password round trips fast.
pub const TEST_BCRYPT_COST: u32 = 4;

/// Services wired over the in-memory store, with handles for steering time
/// and reading delivered codes.
pub struct InMemoryBackend {
    /// Shared tables behind every repository port.
    pub store: Arc<InMemoryStore>,
    /// Clock seen by every service.
    pub clock: Arc<MutableClock>,
    /// Captures one-time codes instead of sending them.
    pub otp_sender: Arc<RecordingOtpSender>,
    /// State to register with `web::Data`.
    pub state: HttpState,
}

impl InMemoryBackend {
    /// Wire the services with `settings`, starting the clock at
    /// [`start_time`].
    pub fn new(settings: ServiceSettings) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(MutableClock::new(start_time()));
        let otp_sender = Arc::new(RecordingOtpSender::default());
        let security = SecurityPorts {
            hasher: Arc::new(BcryptPasswordHasher::new(TEST_BCRYPT_COST)),
            otp_generator: Arc::new(RandomOtpCodeGenerator),
            otp_sender: otp_sender.clone(),
            clock: clock.clone(),
        };
        let state = HttpState::new(DrivenPorts::from_store(store.clone(), security), settings);
        Self {
            store,
            clock,
            otp_sender,
            state,
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new(ServiceSettings::default())
    }
}

/// Instant the test clock starts at: 2026-05-04 10:00 UTC.
///
/// # Panics
///
/// Never in practice; the literal date is valid.
#[must_use]
pub fn start_time() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2026, 5, 4, 10, 0, 0).single() {
        Some(instant) => instant,
        None => panic!("valid start time"),
    }
}

/// Session settings with a fresh key and insecure cookies for plain HTTP.
pub fn session_settings() -> SessionSettings {
    SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}

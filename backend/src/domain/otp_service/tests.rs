//! Tests for the one-time code service.

use std::sync::Arc;

use chrono::TimeZone;
use mockall::Sequence;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{
    MockOtpCodeGenerator, MockOtpSender, OtpDeliveryError, RepositoryError,
};
use crate::outbound::memory::InMemoryStore;
use crate::test_support::{MutableClock, RecordingOtpSender};

const PHONE: &str = "9876543210";

struct Harness {
    service: OtpService,
    clock: Arc<MutableClock>,
    sender: Arc<RecordingOtpSender>,
    store: Arc<InMemoryStore>,
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0)
        .single()
        .expect("timestamp")
}

fn generator(codes: &[&'static str]) -> MockOtpCodeGenerator {
    let mut generator = MockOtpCodeGenerator::new();
    let mut seq = Sequence::new();
    for &code in codes {
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || OtpCode::new(code).expect("code"));
    }
    generator
}

fn harness(codes: &[&'static str]) -> Harness {
    let clock = Arc::new(MutableClock::new(start()));
    let sender = Arc::new(RecordingOtpSender::default());
    let store = Arc::new(InMemoryStore::default());
    let service = OtpService::new(
        store.clone(),
        Arc::new(generator(codes)),
        sender.clone(),
        clock.clone(),
        Duration::minutes(10),
    );
    Harness {
        service,
        clock,
        sender,
        store,
    }
}

/// Store that hands control back to the runtime after every lookup, so
/// concurrent verifications interleave between the read and the delete.
struct InterleavingStore {
    inner: InMemoryStore,
    reissue_after_find: Option<OtpCode>,
}

#[async_trait]
impl OtpRepository for InterleavingStore {
    async fn upsert(&self, record: &OtpRecord) -> Result<(), RepositoryError> {
        self.inner.upsert(record).await
    }

    async fn find(&self, phone: &PhoneNumber) -> Result<Option<OtpRecord>, RepositoryError> {
        let found = self.inner.find(phone).await?;
        if let (Some(record), Some(code)) = (&found, &self.reissue_after_find) {
            let replacement = OtpRecord::issue(
                phone.clone(),
                code.clone(),
                record.created_at,
                Duration::minutes(10),
            );
            self.inner.upsert(&replacement).await?;
        }
        tokio::task::yield_now().await;
        Ok(found)
    }

    async fn delete_matching(
        &self,
        phone: &PhoneNumber,
        code: &OtpCode,
    ) -> Result<bool, RepositoryError> {
        self.inner.delete_matching(phone, code).await
    }
}

fn interleaving_service(store: Arc<InterleavingStore>) -> OtpService {
    OtpService::new(
        store,
        Arc::new(generator(&[])),
        Arc::new(RecordingOtpSender::default()),
        Arc::new(MutableClock::new(start())),
        Duration::minutes(10),
    )
}

#[fixture]
fn phone() -> PhoneNumber {
    PhoneNumber::new(PHONE).expect("phone")
}

fn code(raw: &str) -> OtpCode {
    OtpCode::new(raw).expect("code")
}

#[rstest]
#[tokio::test]
async fn send_stores_code_with_expiry_and_delivers_it(phone: PhoneNumber) {
    let h = harness(&["482913"]);

    let expires_at = h.service.send(&phone).await.expect("send");

    assert_eq!(expires_at, start() + Duration::minutes(10));
    assert_eq!(h.sender.last_code_for(&phone), Some(code("482913")));
    let stored = h.store.find(&phone).await.expect("find").expect("record");
    assert_eq!(stored.expires_at, expires_at);
}

#[rstest]
#[tokio::test]
async fn verify_succeeds_once_then_reports_not_found(phone: PhoneNumber) {
    let h = harness(&["482913"]);
    h.service.send(&phone).await.expect("send");

    h.service
        .verify(&phone, &code("482913"))
        .await
        .expect("first verification");
    let second = h
        .service
        .verify(&phone, &code("482913"))
        .await
        .expect_err("consumed");

    assert_eq!(second.code(), ErrorCode::NotFound);
    assert!(h.store.find(&phone).await.expect("find").is_none());
}

#[rstest]
#[tokio::test]
async fn resending_invalidates_the_previous_code(phone: PhoneNumber) {
    let h = harness(&["111111", "222222"]);
    h.service.send(&phone).await.expect("first send");
    h.service.send(&phone).await.expect("second send");

    let stale = h
        .service
        .verify(&phone, &code("111111"))
        .await
        .expect_err("stale code");
    assert_eq!(stale.code(), ErrorCode::InvalidRequest);

    h.service
        .verify(&phone, &code("222222"))
        .await
        .expect("latest code verifies");
}

#[rstest]
#[tokio::test]
async fn correct_code_fails_after_ttl(phone: PhoneNumber) {
    let h = harness(&["482913"]);
    h.service.send(&phone).await.expect("send");
    h.clock.advance_seconds(601);

    let error = h
        .service
        .verify(&phone, &code("482913"))
        .await
        .expect_err("expired");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details().and_then(|d| d.get("code")),
        Some(&serde_json::json!("otp_expired"))
    );
}

#[rstest]
#[tokio::test]
async fn failed_verification_keeps_the_record(phone: PhoneNumber) {
    let h = harness(&["482913"]);
    h.service.send(&phone).await.expect("send");

    h.service
        .verify(&phone, &code("999999"))
        .await
        .expect_err("wrong code");

    h.service
        .verify(&phone, &code("482913"))
        .await
        .expect("correct code still verifies");
}

#[rstest]
#[tokio::test]
async fn delivery_failure_surfaces_as_service_unavailable(phone: PhoneNumber) {
    let mut sender = MockOtpSender::new();
    sender
        .expect_send()
        .times(1)
        .returning(|_, _, _| Err(OtpDeliveryError::delivery("gateway down")));
    let service = OtpService::new(
        Arc::new(InMemoryStore::default()),
        Arc::new(generator(&["482913"])),
        Arc::new(sender),
        Arc::new(MutableClock::new(start())),
        Duration::minutes(10),
    );

    let error = service.send(&phone).await.expect_err("delivery fails");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn concurrent_verifications_consume_the_code_once(phone: PhoneNumber) {
    let store = Arc::new(InterleavingStore {
        inner: InMemoryStore::default(),
        reissue_after_find: None,
    });
    store
        .upsert(&OtpRecord::issue(
            phone.clone(),
            code("482913"),
            start(),
            Duration::minutes(10),
        ))
        .await
        .expect("seed");
    let service = interleaving_service(store.clone());

    let submitted = code("482913");
    let (first, second) = tokio::join!(
        service.verify(&phone, &submitted),
        service.verify(&phone, &submitted)
    );

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
    let rejected = outcomes
        .into_iter()
        .find_map(Result::err)
        .expect("one verification fails");
    assert_eq!(rejected.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn code_reissued_during_verification_survives(phone: PhoneNumber) {
    let store = Arc::new(InterleavingStore {
        inner: InMemoryStore::default(),
        reissue_after_find: Some(code("777777")),
    });
    store
        .upsert(&OtpRecord::issue(
            phone.clone(),
            code("482913"),
            start(),
            Duration::minutes(10),
        ))
        .await
        .expect("seed");
    let service = interleaving_service(store.clone());

    let error = service
        .verify(&phone, &code("482913"))
        .await
        .expect_err("superseded code");

    assert_eq!(error.code(), ErrorCode::NotFound);
    let outstanding = store.inner.find(&phone).await.expect("find").expect("record");
    assert_eq!(outstanding.code, code("777777"));
}

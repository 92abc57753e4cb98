//! End-to-end synchronization tests
//!
//! The doctors API is served by mockito and the store is the in-memory
//! backend, so every test exercises the real HTTP client and decoder.

use slotsync::adapters::doctors::HttpDoctorsSource;
use slotsync::adapters::store::{MemoryStore, SlotStore};
use slotsync::config::{secret_string, DoctorsApiConfig};
use slotsync::core::sync::DoctorSlotsSynchronizer;
use slotsync::domain::{DoctorId, SyncError};
use chrono::{TimeZone, Utc};
use std::sync::Arc;

fn api_config(url: &str) -> DoctorsApiConfig {
    DoctorsApiConfig {
        base_url: url.to_string(),
        username: "user".to_string(),
        password: secret_string("pass".to_string()),
        timeout_seconds: Some(5),
        tls_verify: true,
    }
}

fn synchronizer(url: &str, store: Arc<MemoryStore>) -> DoctorSlotsSynchronizer {
    let source = Arc::new(HttpDoctorsSource::new(&api_config(url)).unwrap());
    DoctorSlotsSynchronizer::new(source, store)
}

#[tokio::test]
async fn test_single_doctor_single_slot() {
    let mut server = mockito::Server::new_async().await;
    let doctors = server
        .mock("GET", "/api/doctors")
        .match_header("authorization", "Basic dXNlcjpwYXNz")
        .with_status(200)
        .with_body(r#"[{"id":1,"name":"John Doe"}]"#)
        .create_async()
        .await;
    let slots = server
        .mock("GET", "/api/doctors/1/slots")
        .match_header("authorization", "Basic dXNlcjpwYXNz")
        .with_status(200)
        .with_body(r#"[{"start":"2023-07-01T10:00:00+00:00","end":"2023-07-01T11:00:00+00:00"}]"#)
        .create_async()
        .await;

    let store = Arc::new(MemoryStore::new());
    synchronizer(&server.url(), store.clone())
        .synchronize()
        .await
        .unwrap();

    doctors.assert_async().await;
    slots.assert_async().await;

    let stored = store.list_doctors().await.unwrap();
    assert_eq!(stored.len(), 1);
    let doctor = &stored[0];
    assert_eq!(doctor.id(), &DoctorId::from_remote(1));
    assert_eq!(doctor.name(), "John Doe");
    assert!(!doctor.has_error());
    assert_eq!(doctor.slots().len(), 1);
    assert_eq!(
        doctor.slots()[0].start(),
        Utc.with_ymd_and_hms(2023, 7, 1, 10, 0, 0).unwrap()
    );
    assert_eq!(
        doctor.slots()[0].end(),
        Utc.with_ymd_and_hms(2023, 7, 1, 11, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn test_malformed_records_are_skipped() {
    let mut server = mockito::Server::new_async().await;
    let _doctors = server
        .mock("GET", "/api/doctors")
        .with_status(200)
        .with_body(r#"[{"id":1},{"id":2,"name":"conor o'brien"},{"name":"No Id"}]"#)
        .create_async()
        .await;
    let _slots = server
        .mock("GET", "/api/doctors/2/slots")
        .with_status(200)
        .with_body(
            r#"[
                {"start":"invalid-date","end":"2023-07-03T11:00:00+00:00"},
                {"start":"2023-07-02T10:00:00+00:00"},
                {"start":"2023-07-04T09:00:00+00:00","end":"2023-07-04T09:30:00+00:00"}
            ]"#,
        )
        .create_async()
        .await;

    let store = Arc::new(MemoryStore::new());
    let summary = synchronizer(&server.url(), store.clone())
        .synchronize()
        .await
        .unwrap();

    let stored = store.list_doctors().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name(), "Conor O'Brien");
    assert_eq!(stored[0].slots().len(), 1);
    assert_eq!(summary.doctors_seen, 1);
    assert_eq!(summary.slots_created, 1);
}

#[tokio::test]
async fn test_slot_endpoint_failure_flags_doctor() {
    let mut server = mockito::Server::new_async().await;
    let _doctors = server
        .mock("GET", "/api/doctors")
        .with_status(200)
        .with_body(r#"[{"id":1,"name":"john doe"},{"id":2,"name":"jane smith"}]"#)
        .create_async()
        .await;
    let _broken = server
        .mock("GET", "/api/doctors/1/slots")
        .with_status(200)
        .with_body("{invalid json}")
        .create_async()
        .await;
    let _ok = server
        .mock("GET", "/api/doctors/2/slots")
        .with_status(200)
        .with_body(r#"[{"start":"2023-07-01T10:00:00+00:00","end":"2023-07-01T11:00:00+00:00"}]"#)
        .create_async()
        .await;

    let store = Arc::new(MemoryStore::new());
    let summary = synchronizer(&server.url(), store.clone())
        .synchronize()
        .await
        .unwrap();

    let first = store
        .find_doctor(&DoctorId::from_remote(1))
        .await
        .unwrap()
        .unwrap();
    assert!(first.has_error());
    assert!(first.slots().is_empty());
    assert_eq!(first.name(), "John Doe");

    let second = store
        .find_doctor(&DoctorId::from_remote(2))
        .await
        .unwrap()
        .unwrap();
    assert!(!second.has_error());
    assert_eq!(second.slots().len(), 1);

    assert_eq!(summary.doctors_flagged, 1);
}

#[tokio::test]
async fn test_doctor_list_failure_aborts_run() {
    let mut server = mockito::Server::new_async().await;
    let _doctors = server
        .mock("GET", "/api/doctors")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let store = Arc::new(MemoryStore::new());
    let err = synchronizer(&server.url(), store.clone())
        .synchronize()
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Fetch(_)));
    assert_eq!(store.commit_count(), 0);
}

#[tokio::test]
async fn test_repeated_run_creates_no_new_slots() {
    let mut server = mockito::Server::new_async().await;
    let _doctors = server
        .mock("GET", "/api/doctors")
        .with_status(200)
        .with_body(r#"[{"id":1,"name":"john doe"}]"#)
        .expect(2)
        .create_async()
        .await;
    let _slots = server
        .mock("GET", "/api/doctors/1/slots")
        .with_status(200)
        .with_body(
            r#"[
                {"start":"2023-07-01T10:00:00+00:00","end":"2023-07-01T11:00:00+00:00"},
                {"start":"2023-07-01T12:00:00+00:00","end":"2023-07-01T13:00:00+00:00"}
            ]"#,
        )
        .expect(2)
        .create_async()
        .await;

    let store = Arc::new(MemoryStore::new());
    let first = synchronizer(&server.url(), store.clone())
        .synchronize()
        .await
        .unwrap();
    let before = store.list_doctors().await.unwrap();

    let second = synchronizer(&server.url(), store.clone())
        .synchronize()
        .await
        .unwrap();
    let after = store.list_doctors().await.unwrap();

    assert_eq!(first.slots_created, 2);
    assert_eq!(second.slots_created, 0);
    assert_eq!(second.slots_unchanged, 2);
    assert_eq!(before, after);
    assert_eq!(store.commit_count(), 2);
}

#[tokio::test]
async fn test_dry_run_leaves_store_empty() {
    let mut server = mockito::Server::new_async().await;
    let _doctors = server
        .mock("GET", "/api/doctors")
        .with_status(200)
        .with_body(r#"[{"id":1,"name":"john doe"}]"#)
        .create_async()
        .await;
    let _slots = server
        .mock("GET", "/api/doctors/1/slots")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let store = Arc::new(MemoryStore::new());
    let summary = synchronizer(&server.url(), store.clone())
        .with_dry_run(true)
        .synchronize()
        .await
        .unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.doctors_created, 1);
    assert!(store.list_doctors().await.unwrap().is_empty());
}

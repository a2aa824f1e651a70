//! End-to-end tests of the faculty status dashboard endpoint.

#![allow(clippy::panic, clippy::indexing_slicing)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::stream::{self, BoxStream};
use futures_util::{FutureExt, StreamExt};
use serde_json::Value;

use checkin_gateway::domain::{
    ClassRoster, FacultyMatch, RosterEdit, StoredCheckIn, StudentSnapshot,
};
use checkin_gateway::error::GatewayError;
use checkin_gateway::persistence::models::SeedDocument;
use checkin_gateway::persistence::{CheckInStore, MemoryStore, RosterStore};

use common::{check_in, class, dr_lee_store, spawn, spawn_with, spawn_with_timeout, url};

async fn get_statuses(base: &str, faculty: &str) -> reqwest::Response {
    let Ok(resp) = reqwest::Client::new()
        .get(url(base, &["api", "v1", "faculty", "statuses"]))
        .query(&[("facultyName", faculty)])
        .send()
        .await
    else {
        panic!("request failed");
    };
    resp
}

async fn snapshots(resp: reqwest::Response) -> Vec<StudentSnapshot> {
    let Ok(mut list) = resp.json::<Vec<StudentSnapshot>>().await else {
        panic!("body is not a snapshot list");
    };
    list.sort_by(|a, b| a.name.cmp(&b.name));
    list
}

#[tokio::test]
async fn dr_lee_sees_only_latest_of_enrolled_students() {
    let store = dr_lee_store();
    let base = spawn(&store).await;

    let resp = get_statuses(&base, "Dr. Lee").await;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let list = snapshots(resp).await;

    assert_eq!(list.len(), 1);
    let Some(alice) = list.first() else {
        panic!("missing Alice");
    };
    assert_eq!(alice.name, "Alice");
    assert_eq!(alice.place, "Cafe");
    assert_eq!(alice.date, "2024-01-02");
    assert_eq!(alice.time, "10:00");
    assert!(list.iter().all(|s| s.name != "Bob" && s.name != "Carol"));
}

#[tokio::test]
async fn post_body_carries_faculty_name() {
    let store = dr_lee_store();
    let base = spawn(&store).await;

    let Ok(resp) = reqwest::Client::new()
        .post(format!("{base}/api/v1/faculty/statuses"))
        .json(&serde_json::json!({ "facultyName": "Dr. Lee" }))
        .send()
        .await
    else {
        panic!("request failed");
    };
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(snapshots(resp).await.len(), 1);
}

#[tokio::test]
async fn missing_faculty_name_is_a_client_error_without_store_access() {
    let store = dr_lee_store();
    let base = spawn(&store).await;

    let Ok(resp) = reqwest::get(format!("{base}/api/v1/faculty/statuses")).await else {
        panic!("request failed");
    };
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    let Ok(body) = resp.json::<Value>().await else {
        panic!("error body is not JSON");
    };
    assert_eq!(body["error"]["code"], 1002);

    let Ok(resp) = reqwest::Client::new()
        .post(format!("{base}/api/v1/faculty/statuses"))
        .json(&serde_json::json!({ "somethingElse": true }))
        .send()
        .await
    else {
        panic!("request failed");
    };
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

    assert_eq!(store.roster_queries(), 0);
    assert_eq!(store.check_in_scans(), 0);
}

#[tokio::test]
async fn faculty_name_with_reserved_characters_is_matched() {
    let store = Arc::new(MemoryStore::from_seed(SeedDocument {
        classes: vec![class("C9", &["Dr. O'Neil & Co + Partners"], &["Eve"])],
        check_ins: vec![check_in("Eve", "2024-02-01", "08:15", "Harbor")],
    }));
    let base = spawn(&store).await;

    let resp = get_statuses(&base, "Dr. O'Neil & Co + Partners").await;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let list = snapshots(resp).await;
    assert_eq!(list.first().map(|s| s.name.as_str()), Some("Eve"));
}

#[tokio::test]
async fn surrounding_whitespace_in_faculty_name_is_ignored() {
    let store = dr_lee_store();
    let base = spawn(&store).await;

    let resp = get_statuses(&base, "  Dr. Lee ").await;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(snapshots(resp).await.len(), 1);
}

#[tokio::test]
async fn unknown_faculty_gets_empty_list() {
    let store = dr_lee_store();
    let base = spawn(&store).await;

    let resp = get_statuses(&base, "Dr. Nobody").await;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert!(snapshots(resp).await.is_empty());
}

#[tokio::test]
async fn repeated_calls_return_the_same_set() {
    let store = Arc::new(MemoryStore::from_seed(SeedDocument {
        classes: vec![
            class("C1", &["Dr. Lee"], &["Alice", "Bob"]),
            class("C2", &["Dr. Lee", "Dr. Kim"], &["Dan"]),
        ],
        check_ins: vec![
            check_in("Bob", "2024-02-01", "08:00", "Station"),
            check_in("Dan", "2024-02-01", "08:30", "Museum"),
            check_in("Alice", "2024-02-01", "07:00", "Hostel"),
            check_in("Dan", "2024-01-31", "23:00", "Bar"),
        ],
    }));
    let base = spawn(&store).await;

    let first = snapshots(get_statuses(&base, "Dr. Lee").await).await;
    let second = snapshots(get_statuses(&base, "Dr. Lee").await).await;
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
    let names: Vec<&str> = first.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Dan"]);
}

#[tokio::test]
async fn omitted_fields_take_documented_defaults() {
    let store = Arc::new(MemoryStore::from_seed(SeedDocument {
        classes: vec![class("C1", &["Dr. Lee"], &["Alice"])],
        check_ins: vec![StoredCheckIn {
            name: Some("Alice".into()),
            date: Some("2024-01-01".into()),
            time: Some("09:00".into()),
            latitude: Some(1.25),
            longitude: Some(-2.5),
            address: Some("Somewhere".into()),
            maps_link: Some("https://www.google.com/maps?q=1.25,-2.5".into()),
            ..StoredCheckIn::default()
        }],
    }));
    let base = spawn(&store).await;

    let Ok(body) = get_statuses(&base, "Dr. Lee").await.json::<Value>().await else {
        panic!("body is not JSON");
    };
    let Some(entry) = body.as_array().and_then(|a| a.first()) else {
        panic!("expected one entry");
    };
    assert_eq!(entry["emergency"], false);
    assert_eq!(entry["peers"], "None");
    assert_eq!(entry["place"], "");
    assert_eq!(entry["studentStatus"], "None");
    assert_eq!(entry["comments"], "");
    assert_eq!(entry["emergencyDetails"], "");
    assert_eq!(entry["latitude"], 1.25);
    assert_eq!(entry["longitude"], -2.5);
    assert!(entry.get("timestamp").is_none());
}

#[tokio::test]
async fn malformed_rows_are_skipped() {
    let mut broken = check_in("Alice", "2024-03-01", "12:00", "Later but broken");
    broken.date = Some("yesterday".into());
    let mut no_name = check_in("Alice", "2024-03-01", "12:00", "Nameless");
    no_name.name = None;

    let store = Arc::new(MemoryStore::from_seed(SeedDocument {
        classes: vec![class("C1", &["Dr. Lee"], &["Alice"])],
        check_ins: vec![
            check_in("Alice", "2024-01-01", "09:00", "Library"),
            broken,
            no_name,
        ],
    }));
    let base = spawn(&store).await;

    let resp = get_statuses(&base, "Dr. Lee").await;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let list = snapshots(resp).await;
    assert_eq!(list.len(), 1);
    assert_eq!(list.first().map(|s| s.place.as_str()), Some("Library"));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let store = dr_lee_store();
    let base = spawn(&store).await;

    let Ok(resp) = reqwest::Client::new()
        .get(url(&base, &["api", "v1", "faculty", "statuses"]))
        .query(&[("facultyName", "Dr. Lee")])
        .header("Origin", "https://dashboard.example")
        .send()
        .await
    else {
        panic!("request failed");
    };
    let origin = resp
        .headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok());
    assert_eq!(origin, Some("*"));
}

/// Store whose every operation fails.
#[derive(Debug)]
struct UnavailableStore;

fn unavailable<T: Send + 'static>() -> BoxFuture<'static, Result<T, GatewayError>> {
    async { Err(GatewayError::StoreError("store unavailable".into())) }.boxed()
}

impl RosterStore for UnavailableStore {
    fn classes_for_faculty<'a>(
        &'a self,
        _faculty: &'a str,
        _mode: FacultyMatch,
    ) -> BoxFuture<'a, Result<Vec<ClassRoster>, GatewayError>> {
        unavailable()
    }

    fn classes_for_student<'a>(
        &'a self,
        _student: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ClassRoster>, GatewayError>> {
        unavailable()
    }

    fn classes_for_member<'a>(
        &'a self,
        _user: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ClassRoster>, GatewayError>> {
        unavailable()
    }

    fn list_classes(&self) -> BoxFuture<'_, Result<Vec<ClassRoster>, GatewayError>> {
        unavailable()
    }

    fn get_class<'a>(
        &'a self,
        _class_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<ClassRoster>, GatewayError>> {
        unavailable()
    }

    fn insert_class(&self, _roster: ClassRoster) -> BoxFuture<'_, Result<(), GatewayError>> {
        unavailable()
    }

    fn delete_class<'a>(&'a self, _class_id: &'a str) -> BoxFuture<'a, Result<(), GatewayError>> {
        unavailable()
    }

    fn update_class<'a>(
        &'a self,
        _class_id: &'a str,
        _edit: RosterEdit,
    ) -> BoxFuture<'a, Result<ClassRoster, GatewayError>> {
        unavailable()
    }
}

/// Check-in store that yields one good row, then fails.
#[derive(Debug)]
struct FailingScan;

impl CheckInStore for FailingScan {
    fn scan_check_ins(&self) -> BoxStream<'_, Result<StoredCheckIn, GatewayError>> {
        stream::iter(vec![
            Ok(check_in("Alice", "2024-01-01", "09:00", "Library")),
            Err(GatewayError::StoreError("connection reset".into())),
        ])
        .boxed()
    }

    fn append_check_in(&self, _row: StoredCheckIn) -> BoxFuture<'_, Result<(), GatewayError>> {
        unavailable()
    }
}

#[tokio::test]
async fn roster_store_failure_is_a_server_error() {
    let check_ins = dr_lee_store();
    let base = spawn_with(
        Arc::new(UnavailableStore),
        check_ins as Arc<dyn CheckInStore>,
        FacultyMatch::Exact,
    )
    .await;

    let resp = get_statuses(&base, "Dr. Lee").await;
    assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let Ok(body) = resp.json::<Value>().await else {
        panic!("error body is not JSON");
    };
    assert_eq!(body["error"]["code"], 3001);
}

#[tokio::test]
async fn scan_failure_mid_stream_returns_no_partial_result() {
    let rosters = dr_lee_store();
    let base = spawn_with(
        rosters as Arc<dyn RosterStore>,
        Arc::new(FailingScan),
        FacultyMatch::Exact,
    )
    .await;

    let resp = get_statuses(&base, "Dr. Lee").await;
    assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
}

/// Roster store whose operations never complete.
#[derive(Debug)]
struct HangingStore;

fn hang<T: Send + 'static>() -> BoxFuture<'static, Result<T, GatewayError>> {
    futures_util::future::pending().boxed()
}

impl RosterStore for HangingStore {
    fn classes_for_faculty<'a>(
        &'a self,
        _faculty: &'a str,
        _mode: FacultyMatch,
    ) -> BoxFuture<'a, Result<Vec<ClassRoster>, GatewayError>> {
        hang()
    }

    fn classes_for_student<'a>(
        &'a self,
        _student: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ClassRoster>, GatewayError>> {
        hang()
    }

    fn classes_for_member<'a>(
        &'a self,
        _user: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ClassRoster>, GatewayError>> {
        hang()
    }

    fn list_classes(&self) -> BoxFuture<'_, Result<Vec<ClassRoster>, GatewayError>> {
        hang()
    }

    fn get_class<'a>(
        &'a self,
        _class_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<ClassRoster>, GatewayError>> {
        hang()
    }

    fn insert_class(&self, _roster: ClassRoster) -> BoxFuture<'_, Result<(), GatewayError>> {
        hang()
    }

    fn delete_class<'a>(&'a self, _class_id: &'a str) -> BoxFuture<'a, Result<(), GatewayError>> {
        hang()
    }

    fn update_class<'a>(
        &'a self,
        _class_id: &'a str,
        _edit: RosterEdit,
    ) -> BoxFuture<'a, Result<ClassRoster, GatewayError>> {
        hang()
    }
}

#[tokio::test]
async fn stalled_store_times_out_with_408() {
    let check_ins = dr_lee_store();
    let base = spawn_with_timeout(
        Arc::new(HangingStore),
        check_ins as Arc<dyn CheckInStore>,
        FacultyMatch::Exact,
        Duration::from_millis(200),
    )
    .await;

    let resp = get_statuses(&base, "Dr. Lee").await;
    assert_eq!(resp.status(), reqwest::StatusCode::REQUEST_TIMEOUT);
}

//! Shared helpers for integration tests: seeded stores and a live server.

#![allow(dead_code, clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use checkin_gateway::api;
use checkin_gateway::app_state::AppState;
use checkin_gateway::domain::{ClassRoster, FacultyMatch, StoredCheckIn};
use checkin_gateway::persistence::models::SeedDocument;
use checkin_gateway::persistence::{CheckInStore, MemoryStore, RosterStore};

/// A complete, valid check-in row.
pub fn check_in(name: &str, date: &str, time: &str, place: &str) -> StoredCheckIn {
    StoredCheckIn {
        id: Some(format!("{name}-{date}-{time}")),
        name: Some(name.to_string()),
        date: Some(date.to_string()),
        time: Some(time.to_string()),
        latitude: Some(41.9028),
        longitude: Some(12.4964),
        address: Some("Piazza Venezia, Rome".to_string()),
        place: Some(place.to_string()),
        ..StoredCheckIn::default()
    }
}

/// A roster with a fixed ID.
pub fn class(id: &str, faculty: &[&str], students: &[&str]) -> ClassRoster {
    let mut c = ClassRoster::new(id, faculty.first().copied().unwrap_or_default());
    c.class_id = id.to_string();
    c.faculty_list = faculty.iter().map(|f| (*f).to_string()).collect();
    c.students_list = students.iter().map(|s| (*s).to_string()).collect();
    c
}

/// Class C1 taught by Dr. Lee with Alice and Bob; Alice checked in twice,
/// Carol (not enrolled) once.
pub fn dr_lee_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::from_seed(SeedDocument {
        classes: vec![class("C1", &["Dr. Lee"], &["Alice", "Bob"])],
        check_ins: vec![
            check_in("Alice", "2024-01-01", "09:00", "Library"),
            check_in("Alice", "2024-01-02", "10:00", "Cafe"),
            check_in("Carol", "2024-01-01", "09:00", "Park"),
        ],
    }))
}

/// Serves the router over `rosters` and `check_ins` on an ephemeral port
/// and returns its base URL.
pub async fn spawn_with(
    rosters: Arc<dyn RosterStore>,
    check_ins: Arc<dyn CheckInStore>,
    mode: FacultyMatch,
) -> String {
    spawn_with_timeout(rosters, check_ins, mode, Duration::from_secs(5)).await
}

/// Like [`spawn_with`], with an explicit per-request timeout.
pub async fn spawn_with_timeout(
    rosters: Arc<dyn RosterStore>,
    check_ins: Arc<dyn CheckInStore>,
    mode: FacultyMatch,
    request_timeout: Duration,
) -> String {
    let state = AppState::from_stores(rosters, check_ins, mode);
    let app = api::build_app(state, request_timeout);

    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

/// Serves the router over one memory store.
pub async fn spawn(store: &Arc<MemoryStore>) -> String {
    spawn_with(
        Arc::clone(store) as Arc<dyn RosterStore>,
        Arc::clone(store) as Arc<dyn CheckInStore>,
        FacultyMatch::Exact,
    )
    .await
}

/// `base` extended with `segments`, each percent-encoded as one path
/// segment.
pub fn url(base: &str, segments: &[&str]) -> reqwest::Url {
    let Ok(mut url) = reqwest::Url::parse(base) else {
        panic!("bad base URL {base}");
    };
    let Ok(mut path) = url.path_segments_mut() else {
        panic!("base URL cannot have a path");
    };
    path.pop_if_empty().extend(segments);
    drop(path);
    url
}

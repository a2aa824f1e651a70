//! Process-local store for development, demos and tests.
//!
//! Each table sits behind its own [`tokio::sync::RwLock`]: scans and
//! lookups proceed concurrently, roster edits are serialized. A check-in
//! scan takes the read lock once per row, so it never copies the table and
//! never holds the lock while the consumer works; rows appended during a
//! scan are seen by it.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future::BoxFuture;
use futures_util::stream::{self, BoxStream};
use futures_util::{FutureExt, StreamExt};
use tokio::sync::RwLock;

use super::models::SeedDocument;
use super::{CheckInStore, RosterStore};
use crate::domain::{ClassRoster, FacultyMatch, RosterEdit, StoredCheckIn};
use crate::error::GatewayError;

/// In-memory implementation of [`RosterStore`] and [`CheckInStore`].
///
/// Counts roster queries and check-in scans so callers can assert which
/// store operations a request performed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    classes: RwLock<HashMap<String, ClassRoster>>,
    check_ins: RwLock<Vec<StoredCheckIn>>,
    roster_queries: AtomicUsize,
    check_in_scans: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the contents of `seed`.
    #[must_use]
    pub fn from_seed(seed: SeedDocument) -> Self {
        let classes = seed
            .classes
            .into_iter()
            .map(|c| (c.class_id.clone(), c))
            .collect();
        Self {
            classes: RwLock::new(classes),
            check_ins: RwLock::new(seed.check_ins),
            ..Self::default()
        }
    }

    /// Reads a [`SeedDocument`] from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreError`] if the file cannot be read or
    /// is not a valid seed document.
    pub async fn from_seed_file(path: &Path) -> Result<Self, GatewayError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| GatewayError::StoreError(format!("{}: {e}", path.display())))?;
        let seed: SeedDocument = serde_json::from_slice(&bytes)
            .map_err(|e| GatewayError::StoreError(format!("{}: {e}", path.display())))?;
        tracing::info!(
            path = %path.display(),
            classes = seed.classes.len(),
            check_ins = seed.check_ins.len(),
            "loaded seed file"
        );
        Ok(Self::from_seed(seed))
    }

    /// Number of roster queries served so far.
    #[must_use]
    pub fn roster_queries(&self) -> usize {
        self.roster_queries.load(Ordering::Relaxed)
    }

    /// Number of check-in scans started so far.
    #[must_use]
    pub fn check_in_scans(&self) -> usize {
        self.check_in_scans.load(Ordering::Relaxed)
    }

    /// Number of stored check-ins.
    pub async fn check_in_count(&self) -> usize {
        self.check_ins.read().await.len()
    }

    async fn select<F>(&self, predicate: F) -> Vec<ClassRoster>
    where
        F: Fn(&ClassRoster) -> bool,
    {
        self.roster_queries.fetch_add(1, Ordering::Relaxed);
        let map = self.classes.read().await;
        let mut out: Vec<ClassRoster> = map.values().filter(|c| predicate(c)).cloned().collect();
        out.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.class_id.cmp(&b.class_id))
        });
        out
    }
}

impl RosterStore for MemoryStore {
    fn classes_for_faculty<'a>(
        &'a self,
        faculty: &'a str,
        mode: FacultyMatch,
    ) -> BoxFuture<'a, Result<Vec<ClassRoster>, GatewayError>> {
        async move { Ok(self.select(|c| c.is_taught_by(faculty, mode)).await) }.boxed()
    }

    fn classes_for_student<'a>(
        &'a self,
        student: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ClassRoster>, GatewayError>> {
        async move { Ok(self.select(|c| c.has_student(student)).await) }.boxed()
    }

    fn classes_for_member<'a>(
        &'a self,
        user: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ClassRoster>, GatewayError>> {
        async move { Ok(self.select(|c| c.has_member(user)).await) }.boxed()
    }

    fn list_classes(&self) -> BoxFuture<'_, Result<Vec<ClassRoster>, GatewayError>> {
        async move { Ok(self.select(|_| true).await) }.boxed()
    }

    fn get_class<'a>(
        &'a self,
        class_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<ClassRoster>, GatewayError>> {
        async move { Ok(self.classes.read().await.get(class_id).cloned()) }.boxed()
    }

    fn insert_class(&self, roster: ClassRoster) -> BoxFuture<'_, Result<(), GatewayError>> {
        async move {
            let mut map = self.classes.write().await;
            if map.contains_key(&roster.class_id) {
                return Err(GatewayError::InvalidRequest(format!(
                    "class {} already exists",
                    roster.class_id
                )));
            }
            map.insert(roster.class_id.clone(), roster);
            Ok(())
        }
        .boxed()
    }

    fn delete_class<'a>(&'a self, class_id: &'a str) -> BoxFuture<'a, Result<(), GatewayError>> {
        async move {
            self.classes
                .write()
                .await
                .remove(class_id)
                .map(|_| ())
                .ok_or_else(|| GatewayError::ClassNotFound(class_id.to_string()))
        }
        .boxed()
    }

    fn update_class<'a>(
        &'a self,
        class_id: &'a str,
        edit: RosterEdit,
    ) -> BoxFuture<'a, Result<ClassRoster, GatewayError>> {
        async move {
            let mut map = self.classes.write().await;
            let roster = map
                .get_mut(class_id)
                .ok_or_else(|| GatewayError::ClassNotFound(class_id.to_string()))?;
            roster.apply(&edit)?;
            Ok(roster.clone())
        }
        .boxed()
    }
}

impl CheckInStore for MemoryStore {
    fn scan_check_ins(&self) -> BoxStream<'_, Result<StoredCheckIn, GatewayError>> {
        self.check_in_scans.fetch_add(1, Ordering::Relaxed);
        stream::unfold(0usize, move |next| async move {
            let row = self.check_ins.read().await.get(next).cloned()?;
            Some((Ok::<_, GatewayError>(row), next + 1))
        })
        .boxed()
    }

    fn append_check_in(&self, row: StoredCheckIn) -> BoxFuture<'_, Result<(), GatewayError>> {
        async move {
            self.check_ins.write().await.push(row);
            Ok(())
        }
        .boxed()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::time::Duration;

    use super::*;
    use futures_util::TryStreamExt;

    fn class(id: &str, faculty: &str, students: &[&str]) -> ClassRoster {
        let mut c = ClassRoster::new(id, faculty);
        c.class_id = id.to_string();
        c.students_list = students.iter().map(|s| (*s).to_string()).collect();
        c
    }

    fn seeded() -> MemoryStore {
        MemoryStore::from_seed(SeedDocument {
            classes: vec![
                class("c1", "Dr. Lee", &["Alice", "Bob"]),
                class("c2", "Dr. Leeann Park", &["Carol"]),
            ],
            check_ins: vec![StoredCheckIn {
                name: Some("Alice".into()),
                ..StoredCheckIn::default()
            }],
        })
    }

    #[tokio::test]
    async fn faculty_query_respects_match_mode() {
        let store = seeded();
        let Ok(exact) = store.classes_for_faculty("Dr. Lee", FacultyMatch::Exact).await else {
            panic!("query failed");
        };
        assert_eq!(exact.len(), 1);
        let Ok(contains) = store
            .classes_for_faculty("Dr. Lee", FacultyMatch::Contains)
            .await
        else {
            panic!("query failed");
        };
        assert_eq!(contains.len(), 2);
        assert_eq!(store.roster_queries(), 2);
    }

    #[tokio::test]
    async fn student_query_finds_enrolled_classes() {
        let store = seeded();
        let Ok(found) = store.classes_for_student("Carol").await else {
            panic!("query failed");
        };
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().map(|c| c.class_id.as_str()), Some("c2"));
    }

    #[tokio::test]
    async fn member_query_covers_both_lists() {
        let store = seeded();
        let Ok(as_student) = store.classes_for_member("Bob").await else {
            panic!("query failed");
        };
        assert_eq!(as_student.len(), 1);
        let Ok(as_faculty) = store.classes_for_member("Dr. Leeann Park").await else {
            panic!("query failed");
        };
        assert_eq!(as_faculty.first().map(|c| c.class_id.as_str()), Some("c2"));
        let Ok(partial) = store.classes_for_member("Dr. Lee").await else {
            panic!("query failed");
        };
        assert_eq!(partial.len(), 1);
    }

    #[tokio::test]
    async fn scan_streams_all_rows_and_counts() {
        let store = seeded();
        let Ok(()) = store.append_check_in(StoredCheckIn::default()).await else {
            panic!("append failed");
        };
        let Ok(rows) = store.scan_check_ins().try_collect::<Vec<_>>().await else {
            panic!("scan failed");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(store.check_in_scans(), 1);
    }

    #[tokio::test]
    async fn append_during_scan_is_not_blocked_and_is_seen() {
        let store = seeded();
        let mut scan = store.scan_check_ins();
        let Some(Ok(first)) = scan.next().await else {
            panic!("first row missing");
        };
        assert_eq!(first.student_name(), Some("Alice"));

        let late = StoredCheckIn {
            name: Some("Bob".into()),
            ..StoredCheckIn::default()
        };
        let appended =
            tokio::time::timeout(Duration::from_secs(1), store.append_check_in(late)).await;
        assert!(matches!(appended, Ok(Ok(()))));

        let Some(Ok(second)) = scan.next().await else {
            panic!("appended row not streamed");
        };
        assert_eq!(second.student_name(), Some("Bob"));
        assert!(scan.next().await.is_none());
    }

    #[tokio::test]
    async fn update_missing_class_is_not_found() {
        let store = seeded();
        let result = store
            .update_class("nope", RosterEdit::AddStudent("Dan".into()))
            .await;
        assert!(matches!(result, Err(GatewayError::ClassNotFound(_))));
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id_and_delete_removes() {
        let store = seeded();
        assert!(store.insert_class(class("c1", "x", &[])).await.is_err());
        assert!(store.delete_class("c1").await.is_ok());
        assert!(matches!(
            store.delete_class("c1").await,
            Err(GatewayError::ClassNotFound(_))
        ));
        let Ok(left) = store.list_classes().await else {
            panic!("list failed");
        };
        assert_eq!(left.len(), 1);
    }
}

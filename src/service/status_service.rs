//! Status service: latest check-in per student for a faculty member.

use std::sync::Arc;

use futures_util::StreamExt;

use crate::domain::{FacultyMatch, LatestStatusReducer, MembershipFilter, Outcome, StudentSnapshot};
use crate::error::GatewayError;
use crate::persistence::{CheckInStore, RosterStore};

/// Computes faculty dashboards from the roster and check-in stores.
///
/// Stateless apart from the injected store handles; concurrent requests
/// share nothing mutable.
#[derive(Debug, Clone)]
pub struct StatusService {
    rosters: Arc<dyn RosterStore>,
    check_ins: Arc<dyn CheckInStore>,
    faculty_match: FacultyMatch,
}

impl StatusService {
    /// Creates a new `StatusService`.
    #[must_use]
    pub fn new(
        rosters: Arc<dyn RosterStore>,
        check_ins: Arc<dyn CheckInStore>,
        faculty_match: FacultyMatch,
    ) -> Self {
        Self {
            rosters,
            check_ins,
            faculty_match,
        }
    }

    /// Returns the latest check-in of every student enrolled in any class
    /// taught by `faculty_name`.
    ///
    /// The roster query and the check-in scan are started together; rows are
    /// reduced only once the membership filter is complete. Malformed rows
    /// are skipped and logged. The result order is unspecified.
    /// Surrounding whitespace in `faculty_name` is ignored; roster entries
    /// are compared as stored.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingField`] for a blank name, before any
    /// store is touched. Any store failure fails the whole request.
    pub async fn latest_statuses_for_faculty(
        &self,
        faculty_name: &str,
    ) -> Result<Vec<StudentSnapshot>, GatewayError> {
        let faculty = faculty_name.trim();
        if faculty.is_empty() {
            return Err(GatewayError::MissingField("facultyName"));
        }

        let mut scan = self.check_ins.scan_check_ins();
        let (classes, mut next) = tokio::join!(
            self.rosters.classes_for_faculty(faculty, self.faculty_match),
            scan.next()
        );
        let classes = classes.inspect_err(|e| {
            tracing::error!(faculty, error = %e, "roster query failed");
        })?;

        let members = MembershipFilter::from_classes(&classes);
        tracing::debug!(
            faculty,
            classes = classes.len(),
            students = members.len(),
            "membership filter built"
        );
        if members.is_empty() {
            return Ok(Vec::new());
        }

        let mut reducer = LatestStatusReducer::new(members);
        while let Some(item) = next {
            let row = item.inspect_err(|e| {
                tracing::error!(faculty, error = %e, "check-in scan failed");
            })?;
            let id = row.id.clone();
            if let Outcome::Malformed(reason) = reducer.push(row) {
                tracing::warn!(row_id = ?id, %reason, "skipping malformed check-in");
            }
            next = scan.next().await;
        }

        tracing::info!(
            faculty,
            scanned = reducer.scanned(),
            skipped = reducer.malformed(),
            "latest statuses computed"
        );
        Ok(reducer.finish())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{ClassRoster, StoredCheckIn};
    use crate::persistence::MemoryStore;
    use crate::persistence::models::SeedDocument;

    fn check_in(name: &str, date: &str, time: &str, place: &str) -> StoredCheckIn {
        StoredCheckIn {
            name: Some(name.into()),
            date: Some(date.into()),
            time: Some(time.into()),
            latitude: Some(48.85),
            longitude: Some(2.35),
            address: Some("Paris".into()),
            place: Some(place.into()),
            ..StoredCheckIn::default()
        }
    }

    fn service(store: &Arc<MemoryStore>, mode: FacultyMatch) -> StatusService {
        StatusService::new(
            Arc::clone(store) as Arc<dyn RosterStore>,
            Arc::clone(store) as Arc<dyn CheckInStore>,
            mode,
        )
    }

    fn dr_lee_store() -> Arc<MemoryStore> {
        let mut c1 = ClassRoster::new("C1", "Dr. Lee");
        c1.students_list = vec!["Alice".into(), "Bob".into()];
        Arc::new(MemoryStore::from_seed(SeedDocument {
            classes: vec![c1],
            check_ins: vec![
                check_in("Alice", "2024-01-01", "09:00", "Library"),
                check_in("Alice", "2024-01-02", "10:00", "Cafe"),
                check_in("Carol", "2024-01-01", "09:00", "Park"),
            ],
        }))
    }

    #[tokio::test]
    async fn returns_latest_for_enrolled_students_only() {
        let store = dr_lee_store();
        let Ok(out) = service(&store, FacultyMatch::Exact)
            .latest_statuses_for_faculty("Dr. Lee")
            .await
        else {
            panic!("aggregation failed");
        };
        assert_eq!(out.len(), 1);
        let Some(alice) = out.first() else {
            panic!("missing Alice");
        };
        assert_eq!(alice.name, "Alice");
        assert_eq!(alice.place, "Cafe");
    }

    #[tokio::test]
    async fn blank_faculty_touches_no_store() {
        let store = dr_lee_store();
        let result = service(&store, FacultyMatch::Exact)
            .latest_statuses_for_faculty("  ")
            .await;
        assert!(matches!(result, Err(GatewayError::MissingField("facultyName"))));
        assert_eq!(store.roster_queries(), 0);
        assert_eq!(store.check_in_scans(), 0);
    }

    #[tokio::test]
    async fn padded_faculty_name_matches_roster_entry() {
        let store = dr_lee_store();
        let Ok(out) = service(&store, FacultyMatch::Exact)
            .latest_statuses_for_faculty(" Dr. Lee\t")
            .await
        else {
            panic!("aggregation failed");
        };
        assert_eq!(out.len(), 1);
    }

    #[tokio::test]
    async fn unknown_faculty_yields_empty_list() {
        let store = dr_lee_store();
        let Ok(out) = service(&store, FacultyMatch::Exact)
            .latest_statuses_for_faculty("Dr. Nobody")
            .await
        else {
            panic!("aggregation failed");
        };
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn substring_mode_widens_the_match() {
        let store = dr_lee_store();
        let Ok(exact) = service(&store, FacultyMatch::Exact)
            .latest_statuses_for_faculty("Lee")
            .await
        else {
            panic!("aggregation failed");
        };
        assert!(exact.is_empty());
        let Ok(contains) = service(&store, FacultyMatch::Contains)
            .latest_statuses_for_faculty("Lee")
            .await
        else {
            panic!("aggregation failed");
        };
        assert_eq!(contains.len(), 1);
    }
}

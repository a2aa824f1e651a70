//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::FacultyMatch;
use crate::persistence::{CheckInStore, RosterStore};
use crate::service::{CheckInService, RosterService, StatusService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Faculty dashboards.
    pub status_service: Arc<StatusService>,
    /// Class management.
    pub roster_service: Arc<RosterService>,
    /// Check-in submission.
    pub check_in_service: Arc<CheckInService>,
}

impl AppState {
    /// Wires every service over the given store handles.
    #[must_use]
    pub fn from_stores(
        rosters: Arc<dyn RosterStore>,
        check_ins: Arc<dyn CheckInStore>,
        faculty_match: FacultyMatch,
    ) -> Self {
        Self {
            status_service: Arc::new(StatusService::new(
                Arc::clone(&rosters),
                Arc::clone(&check_ins),
                faculty_match,
            )),
            roster_service: Arc::new(RosterService::new(rosters, faculty_match)),
            check_in_service: Arc::new(CheckInService::new(check_ins)),
        }
    }
}

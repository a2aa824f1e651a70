//! Domain layer: check-ins, rosters, and the latest-status reduction.
//!
//! This module contains the server-side domain model including the stored
//! and validated check-in shapes, class rosters with their atomic edits,
//! the membership filter and the streaming reducer that produces one
//! [`StudentSnapshot`] per student.

pub mod aggregator;
pub mod check_in;
pub mod roster;
pub mod snapshot;

pub use aggregator::{LatestStatusReducer, MembershipFilter, Outcome};
pub use check_in::{CheckIn, CheckInSubmission, MalformedRecord, StoredCheckIn};
pub use roster::{ClassRoster, FacultyMatch, RosterEdit};
pub use snapshot::StudentSnapshot;

//! Latest-status reduction over an unbounded check-in stream.
//!
//! [`MembershipFilter`] is the set of student names reachable from one
//! faculty member through the rosters. [`LatestStatusReducer`] consumes
//! check-in rows one at a time and keeps, per member, only the row with the
//! greatest `date`+`time`. Memory is bounded by the number of members, not
//! by the number of rows.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use super::check_in::{CheckIn, MalformedRecord, StoredCheckIn};
use super::roster::ClassRoster;
use super::snapshot::StudentSnapshot;

/// Student names enrolled in any class of a faculty member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipFilter {
    students: HashSet<String>,
}

impl MembershipFilter {
    /// Unions the student lists of `classes`.
    #[must_use]
    pub fn from_classes<'a, I>(classes: I) -> Self
    where
        I: IntoIterator<Item = &'a ClassRoster>,
    {
        let students = classes
            .into_iter()
            .flat_map(|c| c.students_list.iter().cloned())
            .collect();
        Self { students }
    }

    /// Returns `true` if `name` is a member.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.students.contains(name)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Returns `true` if no student is reachable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

/// What happened to one row pushed into the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Row belongs to a non-member and was ignored.
    NotMember,
    /// Row became the latest for its student.
    Latest,
    /// Row is not newer than the retained one.
    Superseded,
    /// Row could not be validated and was skipped.
    Malformed(MalformedRecord),
}

/// Streaming "latest row per student" reduction.
///
/// Equal timestamps keep the first row seen, so the result is deterministic
/// for a fixed scan order.
#[derive(Debug)]
pub struct LatestStatusReducer {
    members: MembershipFilter,
    latest: HashMap<String, CheckIn>,
    scanned: usize,
    malformed: usize,
}

impl LatestStatusReducer {
    /// Creates a reducer that retains rows of `members` only.
    #[must_use]
    pub fn new(members: MembershipFilter) -> Self {
        Self {
            members,
            latest: HashMap::new(),
            scanned: 0,
            malformed: 0,
        }
    }

    /// Folds one stored row into the state.
    pub fn push(&mut self, row: StoredCheckIn) -> Outcome {
        self.scanned += 1;

        let Some(name) = row.student_name() else {
            self.malformed += 1;
            return Outcome::Malformed(MalformedRecord::MissingField("name"));
        };
        if !self.members.contains(name) {
            return Outcome::NotMember;
        }

        let check_in = match row.validate() {
            Ok(c) => c,
            Err(err) => {
                self.malformed += 1;
                return Outcome::Malformed(err);
            }
        };

        match self.latest.entry(check_in.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(check_in);
                Outcome::Latest
            }
            Entry::Occupied(mut slot) => {
                if check_in.occurred_at > slot.get().occurred_at {
                    slot.insert(check_in);
                    Outcome::Latest
                } else {
                    Outcome::Superseded
                }
            }
        }
    }

    /// Rows pushed so far.
    #[must_use]
    pub fn scanned(&self) -> usize {
        self.scanned
    }

    /// Rows skipped as malformed so far.
    #[must_use]
    pub fn malformed(&self) -> usize {
        self.malformed
    }

    /// Consumes the reducer, yielding one snapshot per student seen.
    ///
    /// The order of the result is unspecified.
    #[must_use]
    pub fn finish(self) -> Vec<StudentSnapshot> {
        self.latest.into_values().map(StudentSnapshot::from).collect()
    }
}

//! Class/trip rosters and the edits applied to them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// How a faculty name is matched against a roster's faculty list.
///
/// `Exact` compares whole list elements. `Contains` accepts any element
/// that has the name as a substring, so `"Lee"` also matches
/// `"Dr. Leeann Park"`; it exists for parity with rosters written by the
/// older system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacultyMatch {
    /// Element equality.
    #[default]
    Exact,
    /// Substring of any element.
    Contains,
}

impl FacultyMatch {
    /// Returns `true` if `candidate` (a faculty list element) matches `name`.
    #[must_use]
    pub fn matches(self, candidate: &str, name: &str) -> bool {
        match self {
            Self::Exact => candidate == name,
            Self::Contains => candidate.contains(name),
        }
    }
}

impl FromStr for FacultyMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "contains" | "substring" => Ok(Self::Contains),
            other => Err(format!("unknown faculty match mode: {other}")),
        }
    }
}

impl fmt::Display for FacultyMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Contains => f.write_str("contains"),
        }
    }
}

/// One class or trip: its faculty, enrolled students and the custom
/// statuses students may pick when checking in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRoster {
    /// Unique class identifier.
    pub class_id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Faculty names, without duplicates.
    #[serde(default)]
    pub faculty_list: Vec<String>,
    /// Student names, without duplicates.
    #[serde(default)]
    pub students_list: Vec<String>,
    /// Custom status labels, without duplicates.
    #[serde(default)]
    pub custom_statuses: Vec<String>,
    /// Creation timestamp.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl ClassRoster {
    /// Creates a roster with a fresh UUID, one faculty member and no
    /// students.
    #[must_use]
    pub fn new(name: impl Into<String>, faculty: impl Into<String>) -> Self {
        Self {
            class_id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            faculty_list: vec![faculty.into()],
            students_list: Vec::new(),
            custom_statuses: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Returns `true` if `faculty` teaches this class under `mode`.
    #[must_use]
    pub fn is_taught_by(&self, faculty: &str, mode: FacultyMatch) -> bool {
        self.faculty_list.iter().any(|f| mode.matches(f, faculty))
    }

    /// Returns `true` if `user` is enrolled or teaches, by exact name.
    #[must_use]
    pub fn has_member(&self, user: &str) -> bool {
        self.has_student(user) || self.faculty_list.iter().any(|f| f == user)
    }

    /// Returns `true` if `student` is enrolled.
    #[must_use]
    pub fn has_student(&self, student: &str) -> bool {
        self.students_list.iter().any(|s| s == student)
    }

    /// Applies `edit` in place.
    ///
    /// Adds are idempotent and report `false` when nothing changed.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StudentNotEnrolled`] or
    /// [`GatewayError::FacultyNotAssigned`] when removing a name that is
    /// not on the roster.
    pub fn apply(&mut self, edit: &RosterEdit) -> Result<bool, GatewayError> {
        match edit {
            RosterEdit::AddStudent(name) => Ok(push_unique(&mut self.students_list, name)),
            RosterEdit::RemoveStudent(name) => {
                if remove_value(&mut self.students_list, name) {
                    Ok(true)
                } else {
                    Err(GatewayError::StudentNotEnrolled(name.clone()))
                }
            }
            RosterEdit::AddFaculty(name) => Ok(push_unique(&mut self.faculty_list, name)),
            RosterEdit::RemoveFaculty(name) => {
                if remove_value(&mut self.faculty_list, name) {
                    Ok(true)
                } else {
                    Err(GatewayError::FacultyNotAssigned(name.clone()))
                }
            }
            RosterEdit::AddCustomStatus(status) => {
                Ok(push_unique(&mut self.custom_statuses, status))
            }
        }
    }
}

/// A single atomic roster mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEdit {
    /// Enroll a student.
    AddStudent(String),
    /// Unenroll a student.
    RemoveStudent(String),
    /// Assign a faculty member.
    AddFaculty(String),
    /// Unassign a faculty member.
    RemoveFaculty(String),
    /// Offer a new custom status label.
    AddCustomStatus(String),
}

fn push_unique(list: &mut Vec<String>, value: &str) -> bool {
    if list.iter().any(|v| v == value) {
        return false;
    }
    list.push(value.to_string());
    true
}

fn remove_value(list: &mut Vec<String>, value: &str) -> bool {
    let before = list.len();
    list.retain(|v| v != value);
    list.len() != before
}

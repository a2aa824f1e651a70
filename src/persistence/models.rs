//! Database row models and the seed document format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ClassRoster, StoredCheckIn};

/// A row of the `check_ins` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CheckInRow {
    /// Row identifier.
    pub id: String,
    /// Submitting student's name.
    pub student_name: Option<String>,
    /// Calendar date as text.
    pub check_date: Option<String>,
    /// Wall-clock time as text.
    pub check_time: Option<String>,
    /// Latitude.
    pub latitude: Option<f64>,
    /// Longitude.
    pub longitude: Option<f64>,
    /// Address.
    pub address: Option<String>,
    /// Map link.
    pub maps_link: Option<String>,
    /// SOS flag.
    pub emergency: Option<bool>,
    /// Emergency description.
    pub emergency_details: Option<String>,
    /// Companions.
    pub peers: Option<String>,
    /// Named place.
    pub place: Option<String>,
    /// Comments.
    pub comments: Option<String>,
    /// Status label.
    pub student_status: Option<String>,
}

impl From<CheckInRow> for StoredCheckIn {
    fn from(row: CheckInRow) -> Self {
        Self {
            id: Some(row.id),
            name: row.student_name,
            date: row.check_date,
            time: row.check_time,
            latitude: row.latitude,
            longitude: row.longitude,
            address: row.address,
            maps_link: row.maps_link,
            emergency: row.emergency,
            emergency_details: row.emergency_details,
            peers: row.peers,
            place: row.place,
            comments: row.comments,
            student_status: row.student_status,
        }
    }
}

/// A row of the `class_rosters` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClassRosterRow {
    /// Class identifier.
    pub class_id: String,
    /// Display name.
    pub name: String,
    /// Faculty names.
    pub faculty_list: Vec<String>,
    /// Student names.
    pub students_list: Vec<String>,
    /// Custom status labels.
    pub custom_statuses: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<ClassRosterRow> for ClassRoster {
    fn from(row: ClassRosterRow) -> Self {
        Self {
            class_id: row.class_id,
            name: row.name,
            faculty_list: row.faculty_list,
            students_list: row.students_list,
            custom_statuses: row.custom_statuses,
            created_at: row.created_at,
        }
    }
}

/// JSON document accepted by `SEED_FILE`: an export of both tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedDocument {
    /// Class rosters.
    #[serde(default)]
    pub classes: Vec<ClassRoster>,
    /// Check-in rows, possibly including malformed legacy rows.
    #[serde(default)]
    pub check_ins: Vec<StoredCheckIn>,
}

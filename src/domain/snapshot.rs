//! Latest known status of one student.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::check_in::CheckIn;

/// The most recent check-in of a student, as shown on faculty dashboards.
///
/// Derived on every request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentSnapshot {
    /// Student name.
    pub name: String,
    /// Address at check-in.
    pub address: String,
    /// Check-in date (`YYYY-MM-DD`).
    pub date: String,
    /// Check-in time (`HH:MM[:SS]`).
    pub time: String,
    /// Latitude; `null` only for an emergency signal sent without a fix.
    pub latitude: Option<f64>,
    /// Longitude; `null` only for an emergency signal sent without a fix.
    pub longitude: Option<f64>,
    /// Map link.
    pub maps_link: String,
    /// SOS flag.
    pub emergency: bool,
    /// Emergency description.
    pub emergency_details: String,
    /// Companions.
    pub peers: String,
    /// Named place.
    pub place: String,
    /// Status label.
    pub student_status: String,
    /// Comments.
    pub comments: String,
}

impl From<CheckIn> for StudentSnapshot {
    fn from(c: CheckIn) -> Self {
        Self {
            name: c.name,
            address: c.address,
            date: c.date,
            time: c.time,
            latitude: c.latitude,
            longitude: c.longitude,
            maps_link: c.maps_link,
            emergency: c.emergency,
            emergency_details: c.emergency_details,
            peers: c.peers,
            place: c.place,
            student_status: c.student_status,
            comments: c.comments,
        }
    }
}

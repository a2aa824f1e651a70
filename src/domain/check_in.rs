//! Check-in records as stored and as validated.
//!
//! Stores hand back [`StoredCheckIn`] rows with every field optional, the
//! way legacy rows were written. [`StoredCheckIn::validate`] is the single
//! boundary where required fields are enforced and defaults applied.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Default for `peers` when a check-in names nobody.
pub const DEFAULT_PEERS: &str = "None";

/// Default for `studentStatus` when a check-in carries none.
pub const DEFAULT_STUDENT_STATUS: &str = "None";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// A check-in row exactly as persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCheckIn {
    /// Row identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Submitting student's name.
    #[serde(default)]
    pub name: Option<String>,
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    /// Wall-clock time, `HH:MM[:SS]`.
    #[serde(default)]
    pub time: Option<String>,
    /// Latitude in degrees.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Reverse-geocoded address.
    #[serde(default)]
    pub address: Option<String>,
    /// Link to the position on a map.
    #[serde(default)]
    pub maps_link: Option<String>,
    /// SOS flag.
    #[serde(default)]
    pub emergency: Option<bool>,
    /// Free-form emergency description.
    #[serde(default)]
    pub emergency_details: Option<String>,
    /// Comma-joined names of companions.
    #[serde(default)]
    pub peers: Option<String>,
    /// Named place (e.g. "Library").
    #[serde(default)]
    pub place: Option<String>,
    /// Free-form comments.
    #[serde(default)]
    pub comments: Option<String>,
    /// Status label picked by the student.
    #[serde(default)]
    pub student_status: Option<String>,
}

/// Why a stored row could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedRecord {
    /// A required field is absent or blank.
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    /// `date` does not parse as `YYYY-MM-DD`.
    #[error("unparseable date {0:?}")]
    BadDate(String),
    /// `time` does not parse as `HH:MM[:SS]`.
    #[error("unparseable time {0:?}")]
    BadTime(String),
}

/// A validated check-in with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckIn {
    /// Submitting student's name.
    pub name: String,
    /// Date as stored.
    pub date: String,
    /// Time as stored.
    pub time: String,
    /// `date` and `time` combined.
    pub occurred_at: NaiveDateTime,
    /// Latitude; `None` only for emergency-only signals.
    pub latitude: Option<f64>,
    /// Longitude; `None` only for emergency-only signals.
    pub longitude: Option<f64>,
    /// Address, `""` when unknown.
    pub address: String,
    /// Map link, derived from the coordinates when not stored.
    pub maps_link: String,
    /// SOS flag.
    pub emergency: bool,
    /// Emergency description.
    pub emergency_details: String,
    /// Companions.
    pub peers: String,
    /// Named place.
    pub place: String,
    /// Comments.
    pub comments: String,
    /// Status label.
    pub student_status: String,
}

impl StoredCheckIn {
    /// Returns the student name if present and non-blank.
    #[must_use]
    pub fn student_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }

    /// Enforces required fields and applies defaults.
    ///
    /// Coordinates are required unless the row is an emergency signal.
    ///
    /// # Errors
    ///
    /// Returns a [`MalformedRecord`] describing the first problem found.
    pub fn validate(self) -> Result<CheckIn, MalformedRecord> {
        let name = non_blank(self.name).ok_or(MalformedRecord::MissingField("name"))?;
        let date = non_blank(self.date).ok_or(MalformedRecord::MissingField("date"))?;
        let time = non_blank(self.time).ok_or(MalformedRecord::MissingField("time"))?;
        let occurred_at = combine(&date, &time)?;

        let emergency = self.emergency.unwrap_or(false);
        if !emergency {
            if self.latitude.is_none() {
                return Err(MalformedRecord::MissingField("latitude"));
            }
            if self.longitude.is_none() {
                return Err(MalformedRecord::MissingField("longitude"));
            }
        }

        let maps_link = match (self.maps_link, self.latitude, self.longitude) {
            (Some(link), _, _) => link,
            (None, Some(lat), Some(lon)) => maps_link(lat, lon),
            _ => String::new(),
        };

        Ok(CheckIn {
            name,
            date,
            time,
            occurred_at,
            latitude: self.latitude,
            longitude: self.longitude,
            address: self.address.unwrap_or_default(),
            maps_link,
            emergency,
            emergency_details: self.emergency_details.unwrap_or_default(),
            peers: self.peers.unwrap_or_else(|| DEFAULT_PEERS.to_string()),
            place: self.place.unwrap_or_default(),
            comments: self.comments.unwrap_or_default(),
            student_status: self
                .student_status
                .unwrap_or_else(|| DEFAULT_STUDENT_STATUS.to_string()),
        })
    }
}

/// A check-in as submitted by a student, before the server stamps it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckInSubmission {
    /// Client-chosen identifier; generated when absent.
    pub id: Option<String>,
    /// Student name.
    pub name: String,
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
    /// Reverse-geocoded address.
    pub address: Option<String>,
    /// Companions.
    pub peers: Option<String>,
    /// Named place.
    pub place: Option<String>,
    /// Comments.
    pub comments: Option<String>,
    /// SOS flag.
    pub emergency: bool,
    /// Emergency description.
    pub emergency_details: Option<String>,
    /// Status label.
    pub student_status: Option<String>,
}

impl CheckInSubmission {
    /// Validates the submission and stamps it with `now`.
    ///
    /// Regular check-ins need coordinates and an address; emergency signals
    /// may omit them. Companions are not recorded for emergencies.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingField`] or
    /// [`GatewayError::InvalidRequest`] describing the first problem.
    pub fn into_stored(self, now: NaiveDateTime) -> Result<StoredCheckIn, GatewayError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(GatewayError::MissingField("name"));
        }
        let address = self.address.filter(|a| !a.trim().is_empty());
        if !self.emergency {
            if self.latitude.is_none() {
                return Err(GatewayError::MissingField("latitude"));
            }
            if self.longitude.is_none() {
                return Err(GatewayError::MissingField("longitude"));
            }
            if address.is_none() {
                return Err(GatewayError::MissingField("address"));
            }
        }
        if let Some(lat) = self.latitude
            && !(-90.0..=90.0).contains(&lat)
        {
            return Err(GatewayError::InvalidRequest(format!(
                "latitude out of range: {lat}"
            )));
        }
        if let Some(lon) = self.longitude
            && !(-180.0..=180.0).contains(&lon)
        {
            return Err(GatewayError::InvalidRequest(format!(
                "longitude out of range: {lon}"
            )));
        }

        let maps_link = match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(maps_link(lat, lon)),
            _ => None,
        };

        Ok(StoredCheckIn {
            id: Some(
                self.id
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            ),
            name: Some(name.to_string()),
            date: Some(now.format(DATE_FORMAT).to_string()),
            time: Some(now.format("%H:%M:%S").to_string()),
            latitude: self.latitude,
            longitude: self.longitude,
            address,
            maps_link,
            emergency: Some(self.emergency),
            emergency_details: Some(self.emergency_details.unwrap_or_default()),
            peers: if self.emergency {
                None
            } else {
                Some(self.peers.unwrap_or_else(|| DEFAULT_PEERS.to_string()))
            },
            place: Some(self.place.unwrap_or_default()),
            comments: Some(self.comments.unwrap_or_default()),
            student_status: Some(
                self.student_status
                    .unwrap_or_else(|| DEFAULT_STUDENT_STATUS.to_string()),
            ),
        })
    }
}

/// Combines a stored date and time into one comparable instant.
///
/// # Errors
///
/// Returns [`MalformedRecord::BadDate`] or [`MalformedRecord::BadTime`].
pub fn combine(date: &str, time: &str) -> Result<NaiveDateTime, MalformedRecord> {
    let d = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| MalformedRecord::BadDate(date.to_string()))?;
    let t = TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(time.trim(), fmt).ok())
        .ok_or_else(|| MalformedRecord::BadTime(time.to_string()))?;
    Ok(d.and_time(t))
}

/// Google Maps link for a coordinate pair.
#[must_use]
pub fn maps_link(latitude: f64, longitude: f64) -> String {
    format!("https://www.google.com/maps?q={latitude},{longitude}")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

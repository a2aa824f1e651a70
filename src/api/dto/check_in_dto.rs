//! Check-in submission DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CheckInSubmission, StoredCheckIn};

/// Request body for `POST /check-ins`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCheckInRequest {
    /// Client-chosen identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Student name.
    #[serde(default)]
    pub name: String,
    /// Latitude in degrees (required unless `emergency`).
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in degrees (required unless `emergency`).
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Address (required unless `emergency`).
    #[serde(default)]
    pub address: Option<String>,
    /// Companions, comma-joined.
    #[serde(default)]
    pub peers: Option<String>,
    /// Named place.
    #[serde(default)]
    pub place: Option<String>,
    /// Comments.
    #[serde(default)]
    pub comments: Option<String>,
    /// SOS flag.
    #[serde(default)]
    pub emergency: bool,
    /// Emergency description.
    #[serde(default)]
    pub emergency_details: Option<String>,
    /// Status label.
    #[serde(default)]
    pub student_status: Option<String>,
}

impl From<SubmitCheckInRequest> for CheckInSubmission {
    fn from(req: SubmitCheckInRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            latitude: req.latitude,
            longitude: req.longitude,
            address: req.address,
            peers: req.peers,
            place: req.place,
            comments: req.comments,
            emergency: req.emergency,
            emergency_details: req.emergency_details,
            student_status: req.student_status,
        }
    }
}

/// Response body for `POST /check-ins` (201 Created).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCheckInResponse {
    /// `"Emergency signal received"` or `"Location stored"`.
    pub message: String,
    /// Stored row identifier.
    pub id: String,
    /// Student name.
    pub name: String,
    /// Latitude.
    pub latitude: Option<f64>,
    /// Longitude.
    pub longitude: Option<f64>,
    /// Address.
    pub address: Option<String>,
    /// Map link.
    pub maps_link: Option<String>,
    /// Status label.
    pub student_status: String,
    /// SOS flag.
    pub emergency: bool,
}

impl From<StoredCheckIn> for SubmitCheckInResponse {
    fn from(row: StoredCheckIn) -> Self {
        let emergency = row.emergency.unwrap_or(false);
        Self {
            message: if emergency {
                "Emergency signal received".to_string()
            } else {
                "Location stored".to_string()
            },
            id: row.id.unwrap_or_default(),
            name: row.name.unwrap_or_default(),
            latitude: row.latitude,
            longitude: row.longitude,
            address: row.address,
            maps_link: row.maps_link,
            student_status: row.student_status.unwrap_or_default(),
            emergency,
        }
    }
}

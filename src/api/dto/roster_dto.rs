//! Class roster and custom status DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ClassRoster;

/// Request body for `POST /classes`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    /// Display name.
    #[serde(default)]
    pub class_name: String,
    /// First faculty member.
    #[serde(default)]
    pub faculty_name: String,
}

/// A class as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassDto {
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

impl From<ClassRoster> for ClassDto {
    fn from(r: ClassRoster) -> Self {
        Self {
            class_id: r.class_id,
            name: r.name,
            faculty_list: r.faculty_list,
            students_list: r.students_list,
            custom_statuses: r.custom_statuses,
            created_at: r.created_at,
        }
    }
}

/// Request body for `POST /classes/{classId}/students`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddStudentRequest {
    /// Student name.
    #[serde(default)]
    pub student: String,
}

/// Request body for `POST /classes/{classId}/faculty`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddFacultyRequest {
    /// Faculty name.
    #[serde(default)]
    pub faculty: String,
}

/// Response body for `GET /classes/{classId}/students`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentsListResponse {
    /// Enrolled student names.
    pub students_list: Vec<String>,
}

/// Request body for `POST /faculty/custom-statuses`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCustomStatusRequest {
    /// Faculty whose classes receive the status.
    #[serde(default)]
    pub faculty_name: String,
    /// Status label.
    #[serde(default)]
    pub status: String,
}

/// Response body for `POST /faculty/custom-statuses`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCustomStatusResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Classes that now offer the status.
    pub class_ids: Vec<String>,
}

/// Query for `GET /students/custom-statuses`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StudentQuery {
    /// Student name as it appears on class rosters.
    #[serde(default)]
    pub student_name: String,
}

/// Query for `GET /users/classmates`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// Student or faculty name as it appears on class rosters.
    #[serde(default)]
    pub user_name: String,
}

/// One entry of the `GET /users/classmates` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClassmateDto {
    /// Student name.
    pub name: String,
}

/// Response body for `GET /students/custom-statuses`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomStatusesResponse {
    /// Status labels offered to the student.
    pub custom_statuses: Vec<String>,
}

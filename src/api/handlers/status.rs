//! Faculty dashboard handler: latest status per student.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::FacultyQuery;
use crate::app_state::AppState;
use crate::domain::StudentSnapshot;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /faculty/statuses?facultyName=`: Latest check-in per student.
///
/// # Errors
///
/// Returns [`GatewayError::MissingField`] without a faculty name and a
/// server error on any store failure.
#[utoipa::path(
    get,
    path = "/api/v1/faculty/statuses",
    tag = "Statuses",
    summary = "Latest status of a faculty member's students",
    description = "Returns the most recent check-in of every student enrolled in any class taught by the given faculty member. Order is unspecified.",
    params(FacultyQuery),
    responses(
        (status = 200, description = "One entry per student with at least one check-in", body = Vec<StudentSnapshot>),
        (status = 400, description = "facultyName missing", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn get_latest_statuses(
    State(state): State<AppState>,
    Query(query): Query<FacultyQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let faculty = query
        .name()
        .ok_or(GatewayError::MissingField("facultyName"))?;
    let snapshots = state
        .status_service
        .latest_statuses_for_faculty(faculty)
        .await?;
    Ok(Json(snapshots))
}

/// `POST /faculty/statuses`: Same as the `GET`, with the faculty name in
/// the query string or in a `{"facultyName": …}` body.
///
/// The query string wins when both are present. An unparseable body is
/// treated as absent.
///
/// # Errors
///
/// As [`get_latest_statuses`].
#[utoipa::path(
    post,
    path = "/api/v1/faculty/statuses",
    tag = "Statuses",
    summary = "Latest status of a faculty member's students (body variant)",
    params(FacultyQuery),
    request_body = FacultyQuery,
    responses(
        (status = 200, description = "One entry per student with at least one check-in", body = Vec<StudentSnapshot>),
        (status = 400, description = "facultyName missing", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn post_latest_statuses(
    State(state): State<AppState>,
    Query(query): Query<FacultyQuery>,
    body: Bytes,
) -> Result<impl IntoResponse, GatewayError> {
    let faculty = match query.name() {
        Some(name) => name.to_string(),
        None => faculty_from_body(&body).ok_or(GatewayError::MissingField("facultyName"))?,
    };
    let snapshots = state
        .status_service
        .latest_statuses_for_faculty(&faculty)
        .await?;
    Ok(Json(snapshots))
}

fn faculty_from_body(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    match serde_json::from_slice::<FacultyQuery>(body) {
        Ok(parsed) => parsed.name().map(str::to_string),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring unparseable request body");
            None
        }
    }
}

/// Status routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/faculty/statuses",
        get(get_latest_statuses).post(post_latest_statuses),
    )
}

//! Check-in submission handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{SubmitCheckInRequest, SubmitCheckInResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /check-ins`: Record a check-in or an emergency signal.
///
/// # Errors
///
/// Returns [`GatewayError`] on missing fields or store failure.
#[utoipa::path(
    post,
    path = "/api/v1/check-ins",
    tag = "Check-ins",
    summary = "Submit a check-in",
    description = "Stores a location check-in. Emergency signals may omit coordinates and address. The server stamps date and time.",
    request_body = SubmitCheckInRequest,
    responses(
        (status = 201, description = "Check-in stored", body = SubmitCheckInResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
    )
)]
pub async fn submit_check_in(
    State(state): State<AppState>,
    Json(req): Json<SubmitCheckInRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let row = state.check_in_service.submit(req.into()).await?;
    Ok((StatusCode::CREATED, Json(SubmitCheckInResponse::from(row))))
}

/// Check-in routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/check-ins", post(submit_check_in))
}

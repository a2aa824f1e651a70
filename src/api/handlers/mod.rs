//! REST endpoint handlers organized by resource.

pub mod check_in;
pub mod roster;
pub mod status;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(status::routes())
        .merge(check_in::routes())
        .merge(roster::routes())
}

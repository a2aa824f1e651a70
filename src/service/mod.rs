//! Service layer: business logic orchestration.
//!
//! [`StatusService`] computes faculty dashboards, [`RosterService`] manages
//! classes and [`CheckInService`] records submissions. All three are
//! stateless over injected store handles.

pub mod check_in_service;
pub mod roster_service;
pub mod status_service;

pub use check_in_service::CheckInService;
pub use roster_service::RosterService;
pub use status_service::StatusService;

use crate::error::GatewayError;

/// Trims `value`, rejecting it as `field` when blank.
fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, GatewayError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(GatewayError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names are camelCase on the wire, matching the payloads the
//! browser pages already send.

pub mod check_in_dto;
pub mod roster_dto;
pub mod status_dto;

pub use check_in_dto::*;
pub use roster_dto::*;
pub use status_dto::*;

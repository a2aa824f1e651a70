//! Faculty dashboard DTOs.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Faculty selector, accepted both as a query string and as a JSON body.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FacultyQuery {
    /// Faculty name as it appears on class rosters.
    #[serde(default)]
    pub faculty_name: Option<String>,
}

impl FacultyQuery {
    /// Returns the name if present and non-blank.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.faculty_name.as_deref().filter(|n| !n.trim().is_empty())
    }
}

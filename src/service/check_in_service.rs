//! Check-in service: validates and records student submissions.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{CheckInSubmission, StoredCheckIn};
use crate::error::GatewayError;
use crate::persistence::CheckInStore;

/// Records check-ins and emergency signals.
#[derive(Debug, Clone)]
pub struct CheckInService {
    check_ins: Arc<dyn CheckInStore>,
}

impl CheckInService {
    /// Creates a new `CheckInService`.
    #[must_use]
    pub fn new(check_ins: Arc<dyn CheckInStore>) -> Self {
        Self { check_ins }
    }

    /// Stamps `submission` with the current UTC time and appends it.
    ///
    /// Returns the row as stored.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an incomplete submission, or a store
    /// error.
    pub async fn submit(
        &self,
        submission: CheckInSubmission,
    ) -> Result<StoredCheckIn, GatewayError> {
        let row = submission.into_stored(Utc::now().naive_utc())?;
        self.check_ins.append_check_in(row.clone()).await?;

        if row.emergency == Some(true) {
            tracing::warn!(
                id = ?row.id,
                student = ?row.name,
                details = ?row.emergency_details,
                "emergency signal received"
            );
        } else {
            tracing::info!(id = ?row.id, student = ?row.name, "check-in stored");
        }
        Ok(row)
    }
}

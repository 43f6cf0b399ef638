//! GetEnrollmentStatsHandler - dashboard aggregates.

use std::sync::Arc;

use crate::domain::enrollment::EnrollmentError;
use crate::ports::{EnrollmentReader, EnrollmentStats};

/// Days of daily-enrollment history included in the stats.
const RECENT_DAYS: u32 = 7;

/// Handler computing the admin dashboard aggregates: totals by state,
/// pending review count, and a recent per-day enrollment series.
pub struct GetEnrollmentStatsHandler {
    reader: Arc<dyn EnrollmentReader>,
}

impl GetEnrollmentStatsHandler {
    pub fn new(reader: Arc<dyn EnrollmentReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self) -> Result<EnrollmentStats, EnrollmentError> {
        let stats = self.reader.stats(RECENT_DAYS).await?;
        tracing::debug!(
            total = stats.total_enrollments,
            active = stats.active_enrollments,
            "Computed enrollment stats"
        );
        Ok(stats)
    }
}

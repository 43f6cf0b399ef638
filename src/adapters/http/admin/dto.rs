//! HTTP DTOs for the admin surface.

use serde::{Deserialize, Serialize};

use super::super::enrollment::dto::SubmissionResponse;
use crate::domain::enrollment::SubmissionStatus;
use crate::ports::{DailyEnrollmentCount, EnrollmentStats, ReviewQueueEntry};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query parameters for the review queue.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewQueueParams {
    /// Submission status filter; defaults to pending.
    #[serde(default)]
    pub status: Option<String>,
}

/// Request body carrying a review decision.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    /// One of `approved`, `rejected`, `reviewed`.
    pub decision: String,
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub feedback: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One submission awaiting (or past) review.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewQueueEntryResponse {
    pub enrollment_id: String,
    pub student_id: String,
    pub course_id: String,
    pub milestone_id: String,
    pub submission: SubmissionResponse,
}

impl From<ReviewQueueEntry> for ReviewQueueEntryResponse {
    fn from(entry: ReviewQueueEntry) -> Self {
        Self {
            enrollment_id: entry.enrollment_id.to_string(),
            student_id: entry.student_id.to_string(),
            course_id: entry.course_id.to_string(),
            milestone_id: entry.milestone_id.to_string(),
            submission: SubmissionResponse::from(&entry.submission),
        }
    }
}

/// Response for the review queue endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewQueueResponse {
    pub entries: Vec<ReviewQueueEntryResponse>,
}

/// One day of enrollment counts.
#[derive(Debug, Clone, Serialize)]
pub struct DailyCountResponse {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub count: i64,
}

impl From<DailyEnrollmentCount> for DailyCountResponse {
    fn from(day: DailyEnrollmentCount) -> Self {
        Self {
            date: day.date,
            count: day.count,
        }
    }
}

/// Dashboard aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub total_enrollments: i64,
    pub active_enrollments: i64,
    pub completed_enrollments: i64,
    pub pending_reviews: i64,
    pub daily_enrollments: Vec<DailyCountResponse>,
}

impl From<EnrollmentStats> for StatsResponse {
    fn from(stats: EnrollmentStats) -> Self {
        Self {
            total_enrollments: stats.total_enrollments,
            active_enrollments: stats.active_enrollments,
            completed_enrollments: stats.completed_enrollments,
            pending_reviews: stats.pending_reviews,
            daily_enrollments: stats
                .daily_enrollments
                .into_iter()
                .map(DailyCountResponse::from)
                .collect(),
        }
    }
}

/// Parses the review queue status filter, rejecting unknown values.
pub fn parse_status_filter(
    status: Option<&str>,
) -> Result<Option<SubmissionStatus>, crate::domain::enrollment::EnrollmentError> {
    match status {
        None => Ok(None),
        Some(s) => SubmissionStatus::parse(s).map(Some).ok_or_else(|| {
            crate::domain::enrollment::EnrollmentError::validation(
                "status",
                format!("unknown submission status: {}", s),
            )
        }),
    }
}

//! Enrollment reader port (query side).
//!
//! Serves the list, roster and admin-dashboard queries without going
//! through the aggregate. Implementations may answer these with
//! projections or direct queries; the shapes here are what the HTTP
//! layer renders.

use crate::domain::enrollment::{AssignmentSubmission, EnrollmentStatus, PaymentStatus, SubmissionStatus};
use crate::domain::foundation::{
    CourseId, DomainError, EnrollmentId, MilestoneId, Percentage, StudentId, Timestamp,
};
use async_trait::async_trait;
use serde::Serialize;

/// Flat listing row for an enrollment.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentView {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub course_title: Option<String>,
    pub payment_status: PaymentStatus,
    pub status: EnrollmentStatus,
    pub progress: Percentage,
    pub enrolled_at: Timestamp,
}

/// One assignment submission awaiting (or past) review.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewQueueEntry {
    pub enrollment_id: EnrollmentId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub milestone_id: MilestoneId,
    pub submission: AssignmentSubmission,
}

/// Enrollments created on one calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct DailyEnrollmentCount {
    /// Day in `YYYY-MM-DD` form, UTC.
    pub date: String,
    pub count: i64,
}

/// Aggregate counters for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentStats {
    pub total_enrollments: i64,
    pub active_enrollments: i64,
    pub completed_enrollments: i64,
    pub pending_reviews: i64,
    /// Per-day counts for the trailing window, oldest first.
    pub daily_enrollments: Vec<DailyEnrollmentCount>,
}

/// Query port over the enrollment store.
#[async_trait]
pub trait EnrollmentReader: Send + Sync {
    /// All live enrollments for a student, newest first.
    ///
    /// Pending and refunded enrollments are excluded; a student only
    /// sees courses they hold paid (or free) access to.
    async fn list_for_student(
        &self,
        student: &StudentId,
    ) -> Result<Vec<EnrollmentView>, DomainError>;

    /// Every enrollment on a course regardless of payment state,
    /// newest first.
    async fn roster_for_course(
        &self,
        course: &CourseId,
    ) -> Result<Vec<EnrollmentView>, DomainError>;

    /// Assignment submissions across all live enrollments, optionally
    /// narrowed to one review status. Oldest submission first.
    async fn review_queue(
        &self,
        status: Option<SubmissionStatus>,
    ) -> Result<Vec<ReviewQueueEntry>, DomainError>;

    /// Dashboard counters plus daily enrollment counts for the
    /// trailing `recent_days` window.
    async fn stats(&self, recent_days: u32) -> Result<EnrollmentStats, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrollment_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn EnrollmentReader) {}
    }

    #[test]
    fn enrollment_view_serializes_flat() {
        let view = EnrollmentView {
            id: EnrollmentId::new(),
            student_id: StudentId::new("student-1").unwrap(),
            course_id: CourseId::new(),
            course_title: Some("Intro to Databases".to_string()),
            payment_status: PaymentStatus::Completed,
            status: EnrollmentStatus::Active,
            progress: Percentage::new(40),
            enrolled_at: Timestamp::now(),
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["payment_status"], "completed");
        assert_eq!(json["status"], "active");
        assert_eq!(json["progress"], 40);
    }
}

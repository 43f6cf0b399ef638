//! HTTP DTOs for enrollment endpoints.
//!
//! These types define the JSON request/response structure for the
//! student-facing enrollment API. They serve as the boundary between
//! HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::domain::enrollment::{
    AssignmentSubmission, Enrollment, EnrollmentStatus, PaymentStatus, QuizAttempt, QuizGrade,
    SubmissionStatus,
};
use crate::ports::EnrollmentView;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to grade a quiz attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitQuizRequest {
    /// Selected option index per question, position-matched.
    pub answers: Vec<u32>,
}

/// Request to submit assignment work.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAssignmentRequest {
    /// URL of the submitted work.
    pub submission_url: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Summary view of one enrollment, used in lists.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentViewResponse {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_title: Option<String>,
    pub payment_status: PaymentStatus,
    pub status: EnrollmentStatus,
    /// Progress percentage, 0-100.
    pub progress: u8,
    /// When the enrollment was created (ISO 8601).
    pub enrolled_at: String,
}

impl From<EnrollmentView> for EnrollmentViewResponse {
    fn from(view: EnrollmentView) -> Self {
        Self {
            id: view.id.to_string(),
            student_id: view.student_id.to_string(),
            course_id: view.course_id.to_string(),
            course_title: view.course_title,
            payment_status: view.payment_status,
            status: view.status,
            progress: view.progress.value(),
            enrolled_at: view.enrolled_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Response for the enrollment list endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentListResponse {
    pub enrollments: Vec<EnrollmentViewResponse>,
}

/// One recorded quiz attempt.
#[derive(Debug, Clone, Serialize)]
pub struct QuizAttemptResponse {
    pub unit_id: String,
    pub score: u8,
    pub passed: bool,
    pub attempted_at: String,
}

impl From<&QuizAttempt> for QuizAttemptResponse {
    fn from(attempt: &QuizAttempt) -> Self {
        Self {
            unit_id: attempt.unit_id.to_string(),
            score: attempt.score.value(),
            passed: attempt.passed,
            attempted_at: attempt.attempted_at.as_datetime().to_rfc3339(),
        }
    }
}

/// One assignment submission with its review state.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResponse {
    pub submission_url: String,
    pub submitted_at: String,
    pub status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl From<&AssignmentSubmission> for SubmissionResponse {
    fn from(submission: &AssignmentSubmission) -> Self {
        Self {
            submission_url: submission.submission_url.clone(),
            submitted_at: submission.submitted_at.as_datetime().to_rfc3339(),
            status: submission.status,
            score: submission.score,
            feedback: submission.feedback.clone(),
        }
    }
}

/// Full enrollment record: progress plus assessment history.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentDetailsResponse {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub payment_status: PaymentStatus,
    pub status: EnrollmentStatus,
    pub progress: u8,
    pub completed_units: Vec<String>,
    pub quiz_attempts: Vec<QuizAttemptResponse>,
    /// Keyed by milestone id.
    pub assignment_submissions: std::collections::BTreeMap<String, SubmissionResponse>,
    pub enrolled_at: String,
    pub updated_at: String,
}

impl From<Enrollment> for EnrollmentDetailsResponse {
    fn from(enrollment: Enrollment) -> Self {
        Self {
            id: enrollment.id.to_string(),
            student_id: enrollment.student.to_string(),
            course_id: enrollment.course.to_string(),
            payment_status: enrollment.payment_status,
            status: enrollment.status,
            progress: enrollment.progress.value(),
            completed_units: enrollment
                .completed_units
                .iter()
                .map(|u| u.to_string())
                .collect(),
            quiz_attempts: enrollment
                .quiz_attempts
                .iter()
                .map(QuizAttemptResponse::from)
                .collect(),
            assignment_submissions: enrollment
                .assignment_submissions
                .iter()
                .map(|(id, s)| (id.to_string(), SubmissionResponse::from(s)))
                .collect(),
            enrolled_at: enrollment.enrolled_at.as_datetime().to_rfc3339(),
            updated_at: enrollment.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Response for the access-check endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AccessCheckResponse {
    pub enrolled: bool,
}

/// Response after marking a unit complete.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressResponse {
    pub progress: u8,
    pub status: EnrollmentStatus,
    pub newly_completed: bool,
}

/// Response after grading a quiz attempt.
#[derive(Debug, Clone, Serialize)]
pub struct QuizGradeResponse {
    pub score: u8,
    pub passed: bool,
    pub correct_count: usize,
    pub total_questions: usize,
    pub passing_score: u8,
    pub attempt_count: usize,
}

impl QuizGradeResponse {
    pub fn from_grade(grade: QuizGrade, attempt_count: usize) -> Self {
        Self {
            score: grade.score.value(),
            passed: grade.passed,
            correct_count: grade.correct_count,
            total_questions: grade.total_questions,
            passing_score: grade.passing_score,
            attempt_count,
        }
    }
}

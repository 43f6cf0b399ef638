//! Student-facing enrollment handlers: progress, assessments, and
//! read-side queries.

mod check_enrollment;
mod get_enrollment_details;
mod get_student_enrollments;
mod mark_unit_complete;
mod submit_assignment;
mod submit_quiz;

pub use check_enrollment::{CheckEnrollmentHandler, EnrollmentAccess};
pub use get_enrollment_details::GetEnrollmentDetailsHandler;
pub use get_student_enrollments::GetStudentEnrollmentsHandler;
pub use mark_unit_complete::{
    MarkUnitCompleteCommand, MarkUnitCompleteHandler, MarkUnitCompleteResult,
};
pub use submit_assignment::{SubmitAssignmentCommand, SubmitAssignmentHandler};
pub use submit_quiz::{SubmitQuizCommand, SubmitQuizHandler, SubmitQuizResult};

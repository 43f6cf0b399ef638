//! Admin-only handlers. Role enforcement lives at the HTTP boundary;
//! these assume the caller is already an admin.

mod get_course_roster;
mod get_enrollment_stats;
mod list_review_queue;
mod review_submission;

pub use get_course_roster::GetCourseRosterHandler;
pub use get_enrollment_stats::GetEnrollmentStatsHandler;
pub use list_review_queue::ListReviewQueueHandler;
pub use review_submission::{ReviewSubmissionCommand, ReviewSubmissionHandler};

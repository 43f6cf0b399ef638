//! CheckEnrollmentHandler - access gate for course content.

use std::sync::Arc;

use crate::domain::enrollment::EnrollmentError;
use crate::domain::foundation::{CourseId, StudentId};
use crate::ports::EnrollmentRepository;

/// Answer to "may this student see this course's content?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentAccess {
    pub enrolled: bool,
}

/// Handler answering the course-access question. Only a live enrollment
/// (payment completed) grants access; a pending or refunded record does
/// not, and neither does having no record at all.
pub struct CheckEnrollmentHandler {
    repository: Arc<dyn EnrollmentRepository>,
}

impl CheckEnrollmentHandler {
    pub fn new(repository: Arc<dyn EnrollmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<EnrollmentAccess, EnrollmentError> {
        let enrolled = self
            .repository
            .find_by_student_and_course(student_id, course_id)
            .await?
            .map(|e| e.is_live())
            .unwrap_or(false);

        Ok(EnrollmentAccess { enrolled })
    }
}

//! GetEnrollmentDetailsHandler - full record for one (student, course) pair.

use std::sync::Arc;

use crate::domain::enrollment::{Enrollment, EnrollmentError};
use crate::domain::foundation::{CourseId, StudentId};
use crate::ports::EnrollmentRepository;

/// Handler returning the caller's full enrollment record for a course,
/// including quiz attempts and assignment submissions.
pub struct GetEnrollmentDetailsHandler {
    repository: Arc<dyn EnrollmentRepository>,
}

impl GetEnrollmentDetailsHandler {
    pub fn new(repository: Arc<dyn EnrollmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<Enrollment, EnrollmentError> {
        self.repository
            .find_by_student_and_course(student_id, course_id)
            .await?
            .ok_or_else(|| EnrollmentError::not_found_for_course(student_id.clone(), *course_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryEnrollmentStore;

    fn student() -> StudentId {
        StudentId::new("student-1").unwrap()
    }

    #[tokio::test]
    async fn returns_the_full_record() {
        let store = Arc::new(InMemoryEnrollmentStore::new());
        let course_id = CourseId::new();
        let enrollment = Enrollment::enroll_free(student(), course_id);
        store.save(&enrollment).await.unwrap();

        let handler = GetEnrollmentDetailsHandler::new(store);
        let found = handler.handle(&student(), &course_id).await.unwrap();

        assert_eq!(found.id, enrollment.id);
        assert!(found.is_live());
    }

    #[tokio::test]
    async fn missing_pair_is_not_found() {
        let store = Arc::new(InMemoryEnrollmentStore::new());
        let handler = GetEnrollmentDetailsHandler::new(store);

        let result = handler.handle(&student(), &CourseId::new()).await;

        assert!(matches!(
            result,
            Err(EnrollmentError::NotFoundForCourse { .. })
        ));
    }
}

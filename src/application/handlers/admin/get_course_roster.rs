//! GetCourseRosterHandler - admin view of everyone on a course.

use std::sync::Arc;

use crate::domain::enrollment::EnrollmentError;
use crate::domain::foundation::CourseId;
use crate::ports::{EnrollmentReader, EnrollmentView};

/// Handler listing every enrollment on a course regardless of payment
/// state, so pending checkouts and refunds stay visible to admins.
pub struct GetCourseRosterHandler {
    reader: Arc<dyn EnrollmentReader>,
}

impl GetCourseRosterHandler {
    pub fn new(reader: Arc<dyn EnrollmentReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<EnrollmentView>, EnrollmentError> {
        let views = self.reader.roster_for_course(course_id).await?;
        tracing::debug!(course_id = %course_id, count = views.len(), "Listed course roster");
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryEnrollmentStore;
    use crate::domain::enrollment::{Enrollment, PaymentStatus};
    use crate::domain::foundation::StudentId;
    use crate::ports::EnrollmentRepository;

    fn student(id: &str) -> StudentId {
        StudentId::new(id).unwrap()
    }

    #[tokio::test]
    async fn roster_includes_all_payment_states() {
        let store = Arc::new(InMemoryEnrollmentStore::new());
        let course_id = CourseId::new();

        store
            .save(&Enrollment::enroll_free(student("student-1"), course_id))
            .await
            .unwrap();
        store
            .save(&Enrollment::pending_checkout(
                student("student-2"),
                course_id,
                "cs_1",
                4900,
            ))
            .await
            .unwrap();
        store
            .save(&Enrollment::enroll_free(student("student-3"), CourseId::new()))
            .await
            .unwrap();

        let handler = GetCourseRosterHandler::new(store);
        let roster = handler.handle(&course_id).await.unwrap();

        assert_eq!(roster.len(), 2);
        assert!(roster
            .iter()
            .any(|v| v.payment_status == PaymentStatus::Pending));
    }

    #[tokio::test]
    async fn unknown_course_has_an_empty_roster() {
        let store = Arc::new(InMemoryEnrollmentStore::new());
        let handler = GetCourseRosterHandler::new(store);

        let roster = handler.handle(&CourseId::new()).await.unwrap();

        assert!(roster.is_empty());
    }
}

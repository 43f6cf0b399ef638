//! ListReviewQueueHandler - assignment submissions awaiting review.

use std::sync::Arc;

use crate::domain::enrollment::{EnrollmentError, SubmissionStatus};
use crate::ports::{EnrollmentReader, ReviewQueueEntry};

/// Handler listing submissions across all enrollments, oldest first so
/// the longest-waiting student is reviewed next. Defaults to pending
/// submissions; an explicit status widens or narrows the view.
pub struct ListReviewQueueHandler {
    reader: Arc<dyn EnrollmentReader>,
}

impl ListReviewQueueHandler {
    pub fn new(reader: Arc<dyn EnrollmentReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        status: Option<SubmissionStatus>,
    ) -> Result<Vec<ReviewQueueEntry>, EnrollmentError> {
        let filter = status.or(Some(SubmissionStatus::Pending));
        let entries = self.reader.review_queue(filter).await?;
        tracing::debug!(count = entries.len(), "Listed review queue");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryEnrollmentStore;
    use crate::domain::enrollment::{Enrollment, ReviewDecision};
    use crate::domain::foundation::{CourseId, MilestoneId, StudentId};
    use crate::ports::EnrollmentRepository;

    fn student(id: &str) -> StudentId {
        StudentId::new(id).unwrap()
    }

    fn milestone() -> MilestoneId {
        MilestoneId::new("m1").unwrap()
    }

    async fn store_with_two_submissions() -> Arc<InMemoryEnrollmentStore> {
        let store = Arc::new(InMemoryEnrollmentStore::new());

        let mut first = Enrollment::enroll_free(student("student-1"), CourseId::new());
        first
            .submit_assignment(milestone(), "https://repo.example/pr/1")
            .unwrap();
        store.save(&first).await.unwrap();

        let mut second = Enrollment::enroll_free(student("student-2"), CourseId::new());
        second
            .submit_assignment(milestone(), "https://repo.example/pr/2")
            .unwrap();
        second
            .review_submission(&milestone(), ReviewDecision::Approved, Some(90), None)
            .unwrap();
        store.save(&second).await.unwrap();

        store
    }

    #[tokio::test]
    async fn defaults_to_pending_submissions() {
        let store = store_with_two_submissions().await;
        let handler = ListReviewQueueHandler::new(store);

        let entries = handler.handle(None).await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].student_id, student("student-1"));
    }

    #[tokio::test]
    async fn explicit_status_filters_the_queue() {
        let store = store_with_two_submissions().await;
        let handler = ListReviewQueueHandler::new(store);

        let approved = handler
            .handle(Some(SubmissionStatus::Approved))
            .await
            .unwrap();

        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].student_id, student("student-2"));
    }

    #[tokio::test]
    async fn empty_queue_is_fine() {
        let store = Arc::new(InMemoryEnrollmentStore::new());
        let handler = ListReviewQueueHandler::new(store);

        let entries = handler.handle(None).await.unwrap();

        assert!(entries.is_empty());
    }
}

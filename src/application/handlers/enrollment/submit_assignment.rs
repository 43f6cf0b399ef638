//! SubmitAssignmentHandler - assignment submission and resubmission.

use std::sync::Arc;

use crate::domain::catalog::CourseIndex;
use crate::domain::enrollment::{AssignmentSubmission, EnrollmentError};
use crate::domain::foundation::{CourseId, MilestoneId, StudentId};
use crate::ports::{CourseCatalog, EnrollmentRepository};

/// Command to submit work for a milestone assignment.
#[derive(Debug, Clone)]
pub struct SubmitAssignmentCommand {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub milestone_id: MilestoneId,
    pub submission_url: String,
}

/// Handler for assignment submission.
pub struct SubmitAssignmentHandler {
    repository: Arc<dyn EnrollmentRepository>,
    catalog: Arc<dyn CourseCatalog>,
}

impl SubmitAssignmentHandler {
    pub fn new(repository: Arc<dyn EnrollmentRepository>, catalog: Arc<dyn CourseCatalog>) -> Self {
        Self {
            repository,
            catalog,
        }
    }

    /// Submits (or resubmits) an assignment. Returns the stored
    /// submission, always freshly pending.
    pub async fn handle(
        &self,
        cmd: SubmitAssignmentCommand,
    ) -> Result<AssignmentSubmission, EnrollmentError> {
        // 1. The milestone must exist in the course
        let course = self
            .catalog
            .find_by_id(&cmd.course_id)
            .await?
            .ok_or_else(|| EnrollmentError::course_not_found(cmd.course_id))?;
        let index = CourseIndex::build(&course);

        if index.milestone(&cmd.milestone_id).is_none() {
            return Err(EnrollmentError::validation(
                "milestone_id",
                "not part of this course",
            ));
        }

        // 2. The enrollment must exist and be live
        let mut enrollment = self
            .repository
            .find_by_student_and_course(&cmd.student_id, &cmd.course_id)
            .await?
            .ok_or_else(|| {
                EnrollmentError::not_found_for_course(cmd.student_id.clone(), cmd.course_id)
            })?;

        // 3. Upsert the submission and persist
        enrollment.submit_assignment(cmd.milestone_id.clone(), cmd.submission_url)?;
        self.repository.update(&enrollment).await?;

        tracing::info!(
            enrollment_id = %enrollment.id,
            milestone_id = %cmd.milestone_id,
            "Assignment submitted"
        );

        // The upsert just inserted this key
        Ok(enrollment.assignment_submissions[&cmd.milestone_id].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryCourseCatalog, InMemoryEnrollmentStore};
    use crate::domain::catalog::{Assignment, Course, Milestone};
    use crate::domain::enrollment::{Enrollment, ReviewDecision, SubmissionStatus};

    fn student() -> StudentId {
        StudentId::new("student-1").unwrap()
    }

    fn milestone_id(id: &str) -> MilestoneId {
        MilestoneId::new(id).unwrap()
    }

    fn assignment_course() -> Course {
        Course {
            id: CourseId::new(),
            title: "Project course".to_string(),
            price_cents: 0,
            milestones: vec![Milestone {
                id: milestone_id("m1"),
                title: "Capstone".to_string(),
                units: vec![],
                assignment: Some(Assignment {
                    title: "Ship it".to_string(),
                    description: None,
                }),
            }],
        }
    }

    struct Fixture {
        store: Arc<InMemoryEnrollmentStore>,
        handler: SubmitAssignmentHandler,
        course_id: CourseId,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(InMemoryEnrollmentStore::new());
        let catalog = Arc::new(InMemoryCourseCatalog::new());
        let course = assignment_course();
        let course_id = course.id;
        catalog.insert(course);
        store
            .save(&Enrollment::enroll_free(student(), course_id))
            .await
            .unwrap();

        Fixture {
            handler: SubmitAssignmentHandler::new(store.clone(), catalog),
            store,
            course_id,
        }
    }

    fn command(course_id: CourseId, milestone: &str, url: &str) -> SubmitAssignmentCommand {
        SubmitAssignmentCommand {
            student_id: student(),
            course_id,
            milestone_id: milestone_id(milestone),
            submission_url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn submission_is_stored_pending() {
        let f = fixture().await;

        let submission = f
            .handler
            .handle(command(f.course_id, "m1", "https://repo.example/pr/1"))
            .await
            .unwrap();

        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert_eq!(submission.submission_url, "https://repo.example/pr/1");

        let stored = f
            .store
            .find_by_student_and_course(&student(), &f.course_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.assignment_submissions.len(), 1);
    }

    #[tokio::test]
    async fn resubmission_resets_review_state() {
        let f = fixture().await;

        f.handler
            .handle(command(f.course_id, "m1", "https://repo.example/pr/1"))
            .await
            .unwrap();

        // Simulate an admin rejecting the first attempt
        let mut enrollment = f
            .store
            .find_by_student_and_course(&student(), &f.course_id)
            .await
            .unwrap()
            .unwrap();
        enrollment
            .review_submission(
                &milestone_id("m1"),
                ReviewDecision::Rejected,
                Some(40),
                Some("Tests missing".to_string()),
            )
            .unwrap();
        f.store.update(&enrollment).await.unwrap();

        let submission = f
            .handler
            .handle(command(f.course_id, "m1", "https://repo.example/pr/2"))
            .await
            .unwrap();

        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert_eq!(submission.submission_url, "https://repo.example/pr/2");
        assert!(submission.score.is_none());
        assert!(submission.feedback.is_none());
    }

    #[tokio::test]
    async fn unknown_milestone_is_rejected() {
        let f = fixture().await;

        let result = f
            .handler
            .handle(command(f.course_id, "m9", "https://repo.example/pr/1"))
            .await;

        assert!(matches!(
            result,
            Err(EnrollmentError::ValidationFailed { .. })
        ));
    }

    #[tokio::test]
    async fn empty_url_is_rejected() {
        let f = fixture().await;

        let result = f.handler.handle(command(f.course_id, "m1", "  ")).await;

        assert!(matches!(
            result,
            Err(EnrollmentError::ValidationFailed { .. })
        ));
        let stored = f
            .store
            .find_by_student_and_course(&student(), &f.course_id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.assignment_submissions.is_empty());
    }
}

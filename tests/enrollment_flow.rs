//! Integration tests for the student enrollment lifecycle.
//!
//! These tests verify the end-to-end flow over in-memory adapters:
//! 1. Enrollment in a free course is live immediately
//! 2. Unit completion drives derived progress to 100 and completion
//! 3. Quiz submissions are graded and logged
//! 4. Assignment submissions move through the admin review queue

use std::sync::Arc;

use learntrack::adapters::memory::{InMemoryCourseCatalog, InMemoryEnrollmentStore};
use learntrack::adapters::stripe::MockPaymentProvider;
use learntrack::application::handlers::admin::{
    ListReviewQueueHandler, ReviewSubmissionCommand, ReviewSubmissionHandler,
};
use learntrack::application::handlers::enrollment::{
    CheckEnrollmentHandler, GetStudentEnrollmentsHandler, MarkUnitCompleteCommand,
    MarkUnitCompleteHandler, SubmitAssignmentCommand, SubmitAssignmentHandler, SubmitQuizCommand,
    SubmitQuizHandler,
};
use learntrack::application::handlers::payment::{
    InitiateCheckoutCommand, InitiateCheckoutHandler, InitiateCheckoutResult,
};
use learntrack::domain::catalog::{
    Assignment, Course, CourseUnit, Milestone, Quiz, QuizQuestion,
};
use learntrack::domain::enrollment::{EnrollmentStatus, SubmissionStatus};
use learntrack::domain::foundation::{CourseId, MilestoneId, StudentId, UnitId};
use learntrack::ports::EnrollmentRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct World {
    store: Arc<InMemoryEnrollmentStore>,
    catalog: Arc<InMemoryCourseCatalog>,
    provider: Arc<MockPaymentProvider>,
    course_id: CourseId,
}

impl World {
    /// Free course with two milestones: m1 holds u1 (quizzed) and u2
    /// plus an assignment, m2 holds u3. Three units total.
    fn new() -> Self {
        let course_id = CourseId::new();
        let catalog = Arc::new(InMemoryCourseCatalog::new());
        catalog.insert(Course {
            id: course_id,
            title: "Rust Fundamentals".to_string(),
            price_cents: 0,
            milestones: vec![
                Milestone {
                    id: MilestoneId::new("m1").unwrap(),
                    title: "Getting Started".to_string(),
                    units: vec![
                        CourseUnit {
                            id: UnitId::new("u1").unwrap(),
                            title: "Ownership".to_string(),
                            quiz: Some(Quiz {
                                title: "Ownership Check".to_string(),
                                questions: vec![
                                    QuizQuestion {
                                        prompt: "Who owns a moved value?".to_string(),
                                        options: vec!["caller".into(), "callee".into()],
                                        correct_answer: 1,
                                    },
                                    QuizQuestion {
                                        prompt: "How many mutable borrows at once?".to_string(),
                                        options: vec!["one".into(), "many".into()],
                                        correct_answer: 0,
                                    },
                                ],
                                passing_score: 70,
                            }),
                        },
                        CourseUnit {
                            id: UnitId::new("u2").unwrap(),
                            title: "Borrowing".to_string(),
                            quiz: None,
                        },
                    ],
                    assignment: Some(Assignment {
                        title: "CLI project".to_string(),
                        description: None,
                    }),
                },
                Milestone {
                    id: MilestoneId::new("m2").unwrap(),
                    title: "Going Further".to_string(),
                    units: vec![CourseUnit {
                        id: UnitId::new("u3").unwrap(),
                        title: "Traits".to_string(),
                        quiz: None,
                    }],
                    assignment: None,
                },
            ],
        });

        Self {
            store: Arc::new(InMemoryEnrollmentStore::new()),
            catalog,
            provider: Arc::new(MockPaymentProvider::new()),
            course_id,
        }
    }

    async fn enroll(&self, student: &str) {
        let handler = InitiateCheckoutHandler::new(
            self.store.clone(),
            self.catalog.clone(),
            self.provider.clone(),
        );
        let result = handler
            .handle(InitiateCheckoutCommand {
                student_id: StudentId::new(student).unwrap(),
                course_id: self.course_id,
                success_url: "https://app.example.com/success".to_string(),
                cancel_url: "https://app.example.com/cancel".to_string(),
            })
            .await
            .unwrap();
        assert!(matches!(result, InitiateCheckoutResult::Enrolled(_)));
    }

    async fn complete_unit(&self, student: &str, unit: &str) -> bool {
        let handler =
            MarkUnitCompleteHandler::new(self.store.clone(), self.catalog.clone());
        handler
            .handle(MarkUnitCompleteCommand {
                student_id: StudentId::new(student).unwrap(),
                course_id: self.course_id,
                unit_id: UnitId::new(unit).unwrap(),
            })
            .await
            .unwrap()
            .newly_completed
    }
}

fn student(id: &str) -> StudentId {
    StudentId::new(id).unwrap()
}

// =============================================================================
// Progress Flow
// =============================================================================

#[tokio::test]
async fn free_enrollment_grants_access_immediately() {
    let world = World::new();
    world.enroll("student-1").await;

    let access = CheckEnrollmentHandler::new(world.store.clone())
        .handle(&student("student-1"), &world.course_id)
        .await
        .unwrap();
    assert!(access.enrolled);

    let listed = GetStudentEnrollmentsHandler::new(world.store.clone())
        .handle(&student("student-1"))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].progress.value(), 0);
}

#[tokio::test]
async fn completing_every_unit_completes_the_enrollment() {
    let world = World::new();
    world.enroll("student-1").await;

    assert!(world.complete_unit("student-1", "u1").await);
    assert!(world.complete_unit("student-1", "u2").await);
    // Repeating a unit changes nothing
    assert!(!world.complete_unit("student-1", "u2").await);
    assert!(world.complete_unit("student-1", "u3").await);

    let enrollment = world
        .store
        .find_by_student_and_course(&student("student-1"), &world.course_id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(enrollment.progress.value(), 100);
    assert_eq!(enrollment.status, EnrollmentStatus::Completed);
}

#[tokio::test]
async fn partial_progress_is_rounded_from_unit_counts() {
    let world = World::new();
    world.enroll("student-1").await;

    world.complete_unit("student-1", "u1").await;

    let enrollment = world
        .store
        .find_by_student_and_course(&student("student-1"), &world.course_id)
        .await
        .unwrap()
        .unwrap();

    // 1 of 3 units
    assert_eq!(enrollment.progress.value(), 33);
    assert_eq!(enrollment.status, EnrollmentStatus::Active);
}

// =============================================================================
// Quiz Flow
// =============================================================================

#[tokio::test]
async fn quiz_attempts_are_graded_and_logged() {
    let world = World::new();
    world.enroll("student-1").await;

    let handler = SubmitQuizHandler::new(world.store.clone(), world.catalog.clone());

    // First attempt: one of two correct, below the passing score
    let first = handler
        .handle(SubmitQuizCommand {
            student_id: student("student-1"),
            course_id: world.course_id,
            unit_id: UnitId::new("u1").unwrap(),
            answers: vec![1, 1],
        })
        .await
        .unwrap();
    assert_eq!(first.grade.score.value(), 50);
    assert!(!first.grade.passed);
    assert_eq!(first.attempt_count, 1);

    // Second attempt: full marks
    let second = handler
        .handle(SubmitQuizCommand {
            student_id: student("student-1"),
            course_id: world.course_id,
            unit_id: UnitId::new("u1").unwrap(),
            answers: vec![1, 0],
        })
        .await
        .unwrap();
    assert_eq!(second.grade.score.value(), 100);
    assert!(second.grade.passed);
    assert_eq!(second.attempt_count, 2);

    // Both attempts survive in the audit log
    let enrollment = world
        .store
        .find_by_student_and_course(&student("student-1"), &world.course_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(enrollment.quiz_attempts.len(), 2);
    assert!(!enrollment.quiz_attempts[0].passed);
    assert!(enrollment.quiz_attempts[1].passed);
}

#[tokio::test]
async fn quiz_submission_to_unquizzed_unit_is_rejected() {
    let world = World::new();
    world.enroll("student-1").await;

    let handler = SubmitQuizHandler::new(world.store.clone(), world.catalog.clone());
    let err = handler
        .handle(SubmitQuizCommand {
            student_id: student("student-1"),
            course_id: world.course_id,
            unit_id: UnitId::new("u2").unwrap(),
            answers: vec![0],
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        learntrack::domain::enrollment::EnrollmentError::QuizNotFound(_)
    ));
}

// =============================================================================
// Assignment Review Flow
// =============================================================================

#[tokio::test]
async fn submission_flows_through_the_review_queue() {
    let world = World::new();
    world.enroll("student-1").await;

    let submit = SubmitAssignmentHandler::new(world.store.clone(), world.catalog.clone());
    let submission = submit
        .handle(SubmitAssignmentCommand {
            student_id: student("student-1"),
            course_id: world.course_id,
            milestone_id: MilestoneId::new("m1").unwrap(),
            submission_url: "https://github.com/student-1/cli-project".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(submission.status, SubmissionStatus::Pending);

    // The queue defaults to pending submissions
    let queue = ListReviewQueueHandler::new(world.store.clone())
        .handle(None)
        .await
        .unwrap();
    assert_eq!(queue.len(), 1);
    let entry = &queue[0];
    assert_eq!(entry.milestone_id.as_str(), "m1");

    // Approve it
    let reviewed = ReviewSubmissionHandler::new(world.store.clone())
        .handle(ReviewSubmissionCommand {
            enrollment_id: entry.enrollment_id,
            milestone_id: entry.milestone_id.clone(),
            decision: "approved".to_string(),
            score: Some(92),
            feedback: Some("Clean error handling".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(reviewed.status, SubmissionStatus::Approved);
    assert_eq!(reviewed.score, Some(92));

    // Queue drains; the approved filter finds it
    let pending = ListReviewQueueHandler::new(world.store.clone())
        .handle(None)
        .await
        .unwrap();
    assert!(pending.is_empty());

    let approved = ListReviewQueueHandler::new(world.store.clone())
        .handle(Some(SubmissionStatus::Approved))
        .await
        .unwrap();
    assert_eq!(approved.len(), 1);
}

#[tokio::test]
async fn rejected_submission_can_be_resubmitted() {
    let world = World::new();
    world.enroll("student-1").await;

    let submit = SubmitAssignmentHandler::new(world.store.clone(), world.catalog.clone());
    submit
        .handle(SubmitAssignmentCommand {
            student_id: student("student-1"),
            course_id: world.course_id,
            milestone_id: MilestoneId::new("m1").unwrap(),
            submission_url: "https://github.com/student-1/v1".to_string(),
        })
        .await
        .unwrap();

    let queue = ListReviewQueueHandler::new(world.store.clone())
        .handle(None)
        .await
        .unwrap();
    ReviewSubmissionHandler::new(world.store.clone())
        .handle(ReviewSubmissionCommand {
            enrollment_id: queue[0].enrollment_id,
            milestone_id: queue[0].milestone_id.clone(),
            decision: "rejected".to_string(),
            score: None,
            feedback: Some("Missing tests".to_string()),
        })
        .await
        .unwrap();

    // Resubmission resets to pending and clears the review
    let resubmitted = submit
        .handle(SubmitAssignmentCommand {
            student_id: student("student-1"),
            course_id: world.course_id,
            milestone_id: MilestoneId::new("m1").unwrap(),
            submission_url: "https://github.com/student-1/v2".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(resubmitted.status, SubmissionStatus::Pending);
    assert_eq!(resubmitted.submission_url, "https://github.com/student-1/v2");
    assert_eq!(resubmitted.score, None);
    assert_eq!(resubmitted.feedback, None);
}

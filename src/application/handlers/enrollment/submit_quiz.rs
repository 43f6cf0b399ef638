//! SubmitQuizHandler - quiz grading and attempt recording.

use std::sync::Arc;

use crate::domain::catalog::CourseIndex;
use crate::domain::enrollment::{EnrollmentError, QuizAttempt, QuizGrade};
use crate::domain::foundation::{CourseId, StudentId, Timestamp, UnitId};
use crate::ports::{CourseCatalog, EnrollmentRepository};

/// Command to grade a quiz attempt.
#[derive(Debug, Clone)]
pub struct SubmitQuizCommand {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub unit_id: UnitId,
    /// Selected option index per question, position-matched.
    pub answers: Vec<u32>,
}

/// Result of grading one attempt.
#[derive(Debug, Clone)]
pub struct SubmitQuizResult {
    pub grade: QuizGrade,
    /// Total attempts recorded for this student across the course,
    /// including this one.
    pub attempt_count: usize,
}

/// Handler for quiz submission.
pub struct SubmitQuizHandler {
    repository: Arc<dyn EnrollmentRepository>,
    catalog: Arc<dyn CourseCatalog>,
}

impl SubmitQuizHandler {
    pub fn new(repository: Arc<dyn EnrollmentRepository>, catalog: Arc<dyn CourseCatalog>) -> Self {
        Self {
            repository,
            catalog,
        }
    }

    pub async fn handle(&self, cmd: SubmitQuizCommand) -> Result<SubmitQuizResult, EnrollmentError> {
        // 1. Resolve the quiz through the catalog
        let course = self
            .catalog
            .find_by_id(&cmd.course_id)
            .await?
            .ok_or_else(|| EnrollmentError::course_not_found(cmd.course_id))?;
        let index = CourseIndex::build(&course);

        let quiz = index
            .quiz_for(&cmd.unit_id)
            .ok_or_else(|| EnrollmentError::quiz_not_found(cmd.unit_id.clone()))?;

        // 2. The enrollment must exist and be live
        let mut enrollment = self
            .repository
            .find_by_student_and_course(&cmd.student_id, &cmd.course_id)
            .await?
            .ok_or_else(|| {
                EnrollmentError::not_found_for_course(cmd.student_id.clone(), cmd.course_id)
            })?;

        // 3. Grade against the answer key. An empty question list is
        //    indistinguishable from no quiz at all for the caller.
        let grade = crate::domain::enrollment::grade_quiz(quiz, &cmd.answers)
            .ok_or_else(|| EnrollmentError::quiz_not_found(cmd.unit_id.clone()))?;

        // 4. Append the attempt; every attempt is kept, pass or fail
        enrollment.record_quiz_attempt(QuizAttempt {
            unit_id: cmd.unit_id.clone(),
            score: grade.score,
            passed: grade.passed,
            attempted_at: Timestamp::now(),
        })?;
        self.repository.update(&enrollment).await?;

        tracing::info!(
            enrollment_id = %enrollment.id,
            unit_id = %cmd.unit_id,
            score = grade.score.value(),
            passed = grade.passed,
            "Quiz attempt recorded"
        );

        Ok(SubmitQuizResult {
            grade,
            attempt_count: enrollment.quiz_attempts.len(),
        })
    }
}

//! Assessment records and quiz grading.
//!
//! Quiz attempts are an append-only audit log; assignment submissions are
//! an upsert keyed by milestone. Review outcomes never feed progress.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Quiz;
use crate::domain::foundation::{MilestoneId, Percentage, Timestamp, UnitId};

use super::errors::EnrollmentError;

/// One graded quiz attempt. Attempts are never deduplicated or capped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub unit_id: UnitId,
    pub score: Percentage,
    pub passed: bool,
    pub attempted_at: Timestamp,
}

/// Review state of an assignment submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Submitted, waiting for an admin to look at it.
    Pending,
    /// Looked at, neither accepted nor rejected.
    Reviewed,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    /// Returns the wire/storage string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Reviewed => "reviewed",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
        }
    }

    /// Parses a storage string into a status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(SubmissionStatus::Pending),
            "reviewed" => Some(SubmissionStatus::Reviewed),
            "approved" => Some(SubmissionStatus::Approved),
            "rejected" => Some(SubmissionStatus::Rejected),
            _ => None,
        }
    }
}

/// Admin decision on an assignment submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approved,
    Rejected,
    Reviewed,
}

impl ReviewDecision {
    /// Parses a decision string, rejecting anything outside the accepted set.
    pub fn parse(s: &str) -> Result<Self, EnrollmentError> {
        match s {
            "approved" => Ok(ReviewDecision::Approved),
            "rejected" => Ok(ReviewDecision::Rejected),
            "reviewed" => Ok(ReviewDecision::Reviewed),
            other => Err(EnrollmentError::invalid_decision(other)),
        }
    }

    /// The submission status this decision resolves to.
    pub fn submission_status(&self) -> SubmissionStatus {
        match self {
            ReviewDecision::Approved => SubmissionStatus::Approved,
            ReviewDecision::Rejected => SubmissionStatus::Rejected,
            ReviewDecision::Reviewed => SubmissionStatus::Reviewed,
        }
    }
}

/// An assignment submission for one milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentSubmission {
    pub submission_url: String,
    pub submitted_at: Timestamp,
    pub score: Option<u32>,
    pub feedback: Option<String>,
    pub status: SubmissionStatus,
}

impl AssignmentSubmission {
    /// Creates a fresh pending submission.
    pub fn new(submission_url: impl Into<String>, submitted_at: Timestamp) -> Self {
        Self {
            submission_url: submission_url.into(),
            submitted_at,
            score: None,
            feedback: None,
            status: SubmissionStatus::Pending,
        }
    }

    /// Applies an admin review decision.
    pub fn apply_review(
        &mut self,
        decision: ReviewDecision,
        score: Option<u32>,
        feedback: Option<String>,
    ) {
        self.status = decision.submission_status();
        self.score = score;
        self.feedback = feedback;
    }
}

/// Result of grading one quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizGrade {
    pub score: Percentage,
    pub passed: bool,
    pub correct_count: usize,
    pub total_questions: usize,
    pub passing_score: u8,
}

/// Grades submitted answers against a quiz's answer key.
///
/// Answers are compared index-for-index: answer `i` against question `i`.
/// Missing answers count as wrong, surplus answers are ignored. Returns
/// `None` when the quiz has no questions (nothing to grade against).
pub fn grade_quiz(quiz: &Quiz, answers: &[u32]) -> Option<QuizGrade> {
    let total_questions = quiz.questions.len();
    if total_questions == 0 {
        return None;
    }

    let correct_count = quiz
        .questions
        .iter()
        .enumerate()
        .filter(|(i, q)| answers.get(*i) == Some(&q.correct_answer))
        .count();

    let pct = (correct_count as f64 / total_questions as f64) * 100.0;
    let score = Percentage::new(pct.round() as u8);
    let passed = score.value() >= quiz.passing_score;

    Some(QuizGrade {
        score,
        passed,
        correct_count,
        total_questions,
        passing_score: quiz.passing_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::QuizQuestion;

    fn quiz_with_key(key: &[u32], passing_score: u8) -> Quiz {
        Quiz {
            title: "Key check".to_string(),
            questions: key
                .iter()
                .map(|&answer| QuizQuestion {
                    prompt: "?".to_string(),
                    options: vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()],
                    correct_answer: answer,
                })
                .collect(),
            passing_score,
        }
    }

    // ============================================================
    // Grading Tests
    // ============================================================

    #[test]
    fn two_of_three_scores_67_and_fails_at_70() {
        let quiz = quiz_with_key(&[0, 1, 3], 70);
        let grade = grade_quiz(&quiz, &[0, 1, 2]).unwrap();

        assert_eq!(grade.correct_count, 2);
        assert_eq!(grade.score.value(), 67);
        assert!(!grade.passed);
    }

    #[test]
    fn perfect_answers_pass() {
        let quiz = quiz_with_key(&[1, 2, 0], 70);
        let grade = grade_quiz(&quiz, &[1, 2, 0]).unwrap();

        assert_eq!(grade.score, Percentage::HUNDRED);
        assert!(grade.passed);
    }

    #[test]
    fn score_exactly_at_threshold_passes() {
        // 7/10 = 70 with threshold 70
        let quiz = quiz_with_key(&[0; 10], 70);
        let answers = [0, 0, 0, 0, 0, 0, 0, 1, 1, 1];
        let grade = grade_quiz(&quiz, &answers).unwrap();

        assert_eq!(grade.score.value(), 70);
        assert!(grade.passed);
    }

    #[test]
    fn missing_answers_count_as_wrong() {
        let quiz = quiz_with_key(&[0, 0, 0, 0], 50);
        let grade = grade_quiz(&quiz, &[0, 0]).unwrap();

        assert_eq!(grade.correct_count, 2);
        assert_eq!(grade.score.value(), 50);
    }

    #[test]
    fn surplus_answers_are_ignored() {
        let quiz = quiz_with_key(&[0], 70);
        let grade = grade_quiz(&quiz, &[0, 3, 3, 3]).unwrap();

        assert_eq!(grade.correct_count, 1);
        assert_eq!(grade.score, Percentage::HUNDRED);
    }

    #[test]
    fn empty_quiz_cannot_be_graded() {
        let quiz = quiz_with_key(&[], 70);
        assert!(grade_quiz(&quiz, &[0]).is_none());
    }

    // ============================================================
    // Review Decision Tests
    // ============================================================

    #[test]
    fn decision_parse_accepts_the_three_values() {
        assert_eq!(ReviewDecision::parse("approved"), Ok(ReviewDecision::Approved));
        assert_eq!(ReviewDecision::parse("rejected"), Ok(ReviewDecision::Rejected));
        assert_eq!(ReviewDecision::parse("reviewed"), Ok(ReviewDecision::Reviewed));
    }

    #[test]
    fn decision_parse_rejects_unknown_and_pending() {
        assert!(ReviewDecision::parse("pending").is_err());
        assert!(ReviewDecision::parse("Approved").is_err());
        assert!(ReviewDecision::parse("").is_err());
    }

    #[test]
    fn decision_maps_to_submission_status() {
        assert_eq!(
            ReviewDecision::Approved.submission_status(),
            SubmissionStatus::Approved
        );
        assert_eq!(
            ReviewDecision::Reviewed.submission_status(),
            SubmissionStatus::Reviewed
        );
    }

    // ============================================================
    // Submission Tests
    // ============================================================

    #[test]
    fn new_submission_is_pending_without_score_or_feedback() {
        let submission = AssignmentSubmission::new("https://repo.example/pr/1", Timestamp::now());

        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert!(submission.score.is_none());
        assert!(submission.feedback.is_none());
    }

    #[test]
    fn apply_review_sets_status_score_and_feedback() {
        let mut submission = AssignmentSubmission::new("https://repo.example/pr/1", Timestamp::now());
        submission.apply_review(
            ReviewDecision::Approved,
            Some(95),
            Some("Nice work".to_string()),
        );

        assert_eq!(submission.status, SubmissionStatus::Approved);
        assert_eq!(submission.score, Some(95));
        assert_eq!(submission.feedback.as_deref(), Some("Nice work"));
    }

    #[test]
    fn submission_status_strings_roundtrip() {
        for status in [
            SubmissionStatus::Pending,
            SubmissionStatus::Reviewed,
            SubmissionStatus::Approved,
            SubmissionStatus::Rejected,
        ] {
            assert_eq!(SubmissionStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(SubmissionStatus::parse("graded"), None);
    }
}

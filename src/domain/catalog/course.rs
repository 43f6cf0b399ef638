//! Course catalog value objects.
//!
//! The catalog is a read model here: courses are authored elsewhere and
//! this service only consumes their structure (milestones containing
//! learning units, optional quizzes on units, optional assignments on
//! milestones).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CourseId, MilestoneId, UnitId};

/// Default passing threshold when the catalog does not specify one.
pub const DEFAULT_PASSING_SCORE: u8 = 70;

fn default_passing_score() -> u8 {
    DEFAULT_PASSING_SCORE
}

/// A single multiple-choice quiz question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_answer: u32,
}

/// Quiz attached to a learning unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub title: String,
    pub questions: Vec<QuizQuestion>,
    /// Minimum score (0-100) required to pass.
    #[serde(default = "default_passing_score")]
    pub passing_score: u8,
}

/// A learning unit (lesson/module) within a milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseUnit {
    pub id: UnitId,
    pub title: String,
    #[serde(default)]
    pub quiz: Option<Quiz>,
}

/// Assignment attached to a milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A milestone groups an ordered list of units and may carry one assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub id: MilestoneId,
    pub title: String,
    #[serde(default)]
    pub units: Vec<CourseUnit>,
    #[serde(default)]
    pub assignment: Option<Assignment>,
}

/// A course as read from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    /// Price in the smallest currency unit. Zero means free.
    pub price_cents: i64,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl Course {
    /// Returns true when enrollment requires no payment.
    pub fn is_free(&self) -> bool {
        self.price_cents == 0
    }

    /// Total number of learning units across all milestones.
    pub fn total_units(&self) -> usize {
        self.milestones.iter().map(|m| m.units.len()).sum()
    }
}

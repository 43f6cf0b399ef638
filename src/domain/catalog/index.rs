//! Per-course lookup index.
//!
//! Built once from a catalog read, the index answers the lookups the
//! enrollment operations need (unit -> quiz, milestone -> summary, total
//! unit count) as explicit map hits or misses instead of nested scans
//! over the course structure.

use std::collections::HashMap;

use crate::domain::foundation::{MilestoneId, UnitId};

use super::course::{Course, Quiz};

/// Title information for a milestone, used when flattening submissions
/// for the review queue.
#[derive(Debug, Clone)]
pub struct MilestoneSummary {
    pub title: String,
    pub assignment_title: Option<String>,
}

/// Lookup maps derived from one course.
#[derive(Debug, Clone)]
pub struct CourseIndex {
    total_units: usize,
    quizzes: HashMap<UnitId, Quiz>,
    milestones: HashMap<MilestoneId, MilestoneSummary>,
}

impl CourseIndex {
    /// Builds the index from a course read from the catalog.
    pub fn build(course: &Course) -> Self {
        let mut quizzes = HashMap::new();
        let mut milestones = HashMap::new();
        let mut total_units = 0;

        for milestone in &course.milestones {
            total_units += milestone.units.len();

            milestones.insert(
                milestone.id.clone(),
                MilestoneSummary {
                    title: milestone.title.clone(),
                    assignment_title: milestone.assignment.as_ref().map(|a| a.title.clone()),
                },
            );

            for unit in &milestone.units {
                if let Some(quiz) = &unit.quiz {
                    quizzes.insert(unit.id.clone(), quiz.clone());
                }
            }
        }

        Self {
            total_units,
            quizzes,
            milestones,
        }
    }

    /// Total number of learning units in the course.
    pub fn total_units(&self) -> usize {
        self.total_units
    }

    /// Returns the quiz attached to the given unit, if any.
    pub fn quiz_for(&self, unit_id: &UnitId) -> Option<&Quiz> {
        self.quizzes.get(unit_id)
    }

    /// Returns title information for the given milestone, if it exists.
    pub fn milestone(&self, milestone_id: &MilestoneId) -> Option<&MilestoneSummary> {
        self.milestones.get(milestone_id)
    }
}

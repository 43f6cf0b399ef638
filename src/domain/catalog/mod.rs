//! Catalog module - read model of course structure.

mod course;
mod index;

pub use course::{
    Assignment, Course, CourseUnit, Milestone, Quiz, QuizQuestion, DEFAULT_PASSING_SCORE,
};
pub use index::{CourseIndex, MilestoneSummary};

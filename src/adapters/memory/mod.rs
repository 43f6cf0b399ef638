//! In-memory adapters for tests and local development.

mod course_catalog;
mod enrollment_store;

pub use course_catalog::InMemoryCourseCatalog;
pub use enrollment_store::InMemoryEnrollmentStore;

//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresEnrollmentRepository` - Enrollment aggregate persistence
//! - `PostgresEnrollmentReader` - Read-optimized listing and dashboard queries
//! - `PostgresCourseCatalog` - Read-only course definitions

mod course_catalog;
mod enrollment_reader;
mod enrollment_repository;

pub use course_catalog::PostgresCourseCatalog;
pub use enrollment_reader::PostgresEnrollmentReader;
pub use enrollment_repository::PostgresEnrollmentRepository;

//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `catalog` - Read model of course structure plus the per-course lookup index
//! - `enrollment` - Enrollment aggregate, payment reconciliation and assessments

pub mod catalog;
pub mod enrollment;
pub mod foundation;

//! LearnTrack - Course Enrollment and Learning Progress Backend
//!
//! This crate implements the enrollment core of an online course platform:
//! payment reconciliation against a Stripe-style checkout provider, module
//! completion and progress, quiz grading, and assignment submission/review.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

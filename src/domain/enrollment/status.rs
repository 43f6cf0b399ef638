//! Enrollment lifecycle status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an enrollment.
///
/// `Completed` is reached exactly when progress hits 100 and never
/// auto-reverses; `Refunded` is reserved for an explicit refund path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    /// Learner is working through the course.
    Active,

    /// All units completed (progress = 100).
    Completed,

    /// Enrollment was refunded. Terminal.
    Refunded,
}

impl EnrollmentStatus {
    /// Returns the wire/storage string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "active",
            EnrollmentStatus::Completed => "completed",
            EnrollmentStatus::Refunded => "refunded",
        }
    }

    /// Parses a storage string into a status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(EnrollmentStatus::Active),
            "completed" => Some(EnrollmentStatus::Completed),
            "refunded" => Some(EnrollmentStatus::Refunded),
            _ => None,
        }
    }
}

impl StateMachine for EnrollmentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use EnrollmentStatus::*;
        matches!(
            (self, target),
            // From ACTIVE
            (Active, Completed)
                | (Active, Refunded)
            // From COMPLETED
                | (Completed, Refunded)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use EnrollmentStatus::*;
        match self {
            Active => vec![Completed, Refunded],
            Completed => vec![Refunded],
            Refunded => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_can_complete() {
        let status = EnrollmentStatus::Active;
        assert_eq!(
            status.transition_to(EnrollmentStatus::Completed),
            Ok(EnrollmentStatus::Completed)
        );
    }

    #[test]
    fn completed_never_reverts_to_active() {
        let status = EnrollmentStatus::Completed;
        assert!(status.transition_to(EnrollmentStatus::Active).is_err());
    }

    #[test]
    fn refund_reachable_from_both_live_states() {
        assert!(EnrollmentStatus::Active.can_transition_to(&EnrollmentStatus::Refunded));
        assert!(EnrollmentStatus::Completed.can_transition_to(&EnrollmentStatus::Refunded));
    }

    #[test]
    fn refunded_is_terminal() {
        assert!(EnrollmentStatus::Refunded.is_terminal());
    }

    #[test]
    fn storage_strings_roundtrip() {
        for status in [
            EnrollmentStatus::Active,
            EnrollmentStatus::Completed,
            EnrollmentStatus::Refunded,
        ] {
            assert_eq!(EnrollmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(EnrollmentStatus::parse("archived"), None);
    }
}

//! Payment status state machine.
//!
//! Tracks where an enrollment's payment stands in the checkout
//! reconciliation lifecycle.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Payment status of an enrollment.
///
/// Only `Completed` makes the enrollment live: pending and refunded
/// enrollments are visible but inert for progress and assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Checkout session issued, settlement not yet observed.
    Pending,

    /// Payment settled (or the course was free).
    Completed,

    /// Money returned. Terminal.
    Refunded,
}

impl PaymentStatus {
    /// Returns the wire/storage string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Refunded => "refunded",
        }
    }

    /// Parses a storage string into a status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "completed" => Some(PaymentStatus::Completed),
            "refunded" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }

    /// Returns true if the payment has settled.
    pub fn is_settled(&self) -> bool {
        matches!(self, PaymentStatus::Completed)
    }
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, target),
            // From PENDING
            (Pending, Completed)
                | (Pending, Refunded)
            // From COMPLETED
                | (Completed, Refunded)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentStatus::*;
        match self {
            Pending => vec![Completed, Refunded],
            Completed => vec![Refunded],
            Refunded => vec![],
        }
    }
}

//! Progress computation.
//!
//! Progress is always derived from the completed-unit set against the
//! catalog's current unit count; it is never edited directly.

use crate::domain::foundation::Percentage;

/// Computes course progress from completed and total unit counts.
///
/// `round(completed / total * 100)`, clamped to 100. A course with zero
/// units counts as fully complete: there is nothing left to do.
pub fn compute_progress(completed_units: usize, total_units: usize) -> Percentage {
    if total_units == 0 {
        return Percentage::HUNDRED;
    }

    let pct = (completed_units as f64 / total_units as f64) * 100.0;
    Percentage::new(pct.round().min(100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_completed_is_zero_percent() {
        assert_eq!(compute_progress(0, 10), Percentage::ZERO);
    }

    #[test]
    fn all_completed_is_hundred_percent() {
        assert_eq!(compute_progress(10, 10), Percentage::HUNDRED);
    }

    #[test]
    fn partial_progress_rounds_to_nearest() {
        // 1/3 = 33.33 -> 33, 2/3 = 66.67 -> 67
        assert_eq!(compute_progress(1, 3).value(), 33);
        assert_eq!(compute_progress(2, 3).value(), 67);
        // 1/8 = 12.5 rounds up
        assert_eq!(compute_progress(1, 8).value(), 13);
    }

    #[test]
    fn empty_course_counts_as_complete() {
        assert_eq!(compute_progress(0, 0), Percentage::HUNDRED);
    }

    #[test]
    fn over_completion_clamps_to_hundred() {
        // Catalog shrank after units were completed.
        assert_eq!(compute_progress(12, 10), Percentage::HUNDRED);
    }

    proptest! {
        #[test]
        fn progress_is_always_in_range(completed in 0usize..500, total in 0usize..500) {
            let progress = compute_progress(completed, total);
            prop_assert!(progress.value() <= 100);
        }

        #[test]
        fn completing_everything_yields_hundred(total in 0usize..500) {
            prop_assert_eq!(compute_progress(total, total), Percentage::HUNDRED);
        }

        #[test]
        fn progress_is_monotonic_in_completed_units(completed in 0usize..499, total in 1usize..500) {
            let before = compute_progress(completed, total);
            let after = compute_progress(completed + 1, total);
            prop_assert!(after >= before);
        }
    }
}

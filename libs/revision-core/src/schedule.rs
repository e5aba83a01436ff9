//! Recall scheduling policy.
//!
//! A recall attempt carries a self-assessed confidence from 1 (could not
//! recall) to 5 (instant recall). The policy maps confidence to a recall
//! category and a fixed interval in calendar days:
//!
//! | Confidence | Category        | Next revision |
//! |------------|-----------------|---------------|
//! | 1-2        | Spend More Time | +1 day        |
//! | 3          | Needs Revision  | +3 days       |
//! | 4-5        | Excellent       | +7 days       |
//!
//! Category and interval are derived from the same rule so a stored log's
//! label always agrees with the reschedule that was applied.

use chrono::{DateTime, Days, Utc};

use crate::types::RecallCategory;

/// Check a raw confidence value before narrowing it to an integer.
///
/// Confidence arrives as a JSON number, so `2.5` must be rejected rather
/// than truncated. NaN and infinities fail the fractional check.
pub fn is_valid_confidence(value: f64) -> bool {
    value.fract() == 0.0 && (1.0..=5.0).contains(&value)
}

/// Map confidence to the category stored on the recall log.
pub fn derive_recall_category(confidence: i32) -> RecallCategory {
    match confidence {
        c if c <= 2 => RecallCategory::SpendMoreTime,
        3 => RecallCategory::NeedsRevision,
        _ => RecallCategory::Excellent,
    }
}

/// Compute when the problem should come up for revision again.
///
/// Adds the interval as calendar days to `now`, preserving time of day
/// across month and year boundaries.
pub fn compute_next_revision_at(confidence: i32, now: DateTime<Utc>) -> DateTime<Utc> {
    let days = match confidence {
        c if c <= 2 => 1,
        3 => 3,
        _ => 7,
    };
    now + Days::new(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn category_mapping_covers_all_confidences() {
        assert_eq!(derive_recall_category(1), RecallCategory::SpendMoreTime);
        assert_eq!(derive_recall_category(2), RecallCategory::SpendMoreTime);
        assert_eq!(derive_recall_category(3), RecallCategory::NeedsRevision);
        assert_eq!(derive_recall_category(4), RecallCategory::Excellent);
        assert_eq!(derive_recall_category(5), RecallCategory::Excellent);
    }

    #[test]
    fn low_confidence_reschedules_next_day() {
        let now = at(2024, 1, 1, 10, 0);
        assert_eq!(compute_next_revision_at(1, now), at(2024, 1, 2, 10, 0));
        assert_eq!(compute_next_revision_at(2, now), at(2024, 1, 2, 10, 0));
    }

    #[test]
    fn medium_confidence_reschedules_in_three_days() {
        let now = at(2024, 3, 10, 18, 30);
        assert_eq!(compute_next_revision_at(3, now), at(2024, 3, 13, 18, 30));
    }

    #[test]
    fn high_confidence_reschedules_in_seven_days() {
        let now = at(2024, 5, 20, 7, 15);
        assert_eq!(compute_next_revision_at(4, now), at(2024, 5, 27, 7, 15));
        assert_eq!(compute_next_revision_at(5, now), at(2024, 5, 27, 7, 15));
    }

    #[test]
    fn interval_preserves_time_of_day_across_boundaries() {
        let end_of_month = at(2024, 1, 31, 23, 45);
        assert_eq!(compute_next_revision_at(1, end_of_month), at(2024, 2, 1, 23, 45));

        let end_of_year = at(2023, 12, 29, 8, 30);
        assert_eq!(compute_next_revision_at(5, end_of_year), at(2024, 1, 5, 8, 30));
    }

    #[test]
    fn category_and_interval_always_agree() {
        let now = at(2024, 6, 15, 12, 0);
        for confidence in 1..=5 {
            let days = (compute_next_revision_at(confidence, now) - now).num_days();
            let expected = match derive_recall_category(confidence) {
                RecallCategory::SpendMoreTime => 1,
                RecallCategory::NeedsRevision => 3,
                RecallCategory::Excellent => 7,
            };
            assert_eq!(days, expected, "confidence {confidence}");
        }
    }

    #[test]
    fn validation_accepts_integral_one_through_five() {
        for valid in [1.0, 2.0, 3.0, 4.0, 5.0] {
            assert!(is_valid_confidence(valid), "{valid} should be valid");
        }
    }

    #[test]
    fn validation_rejects_fractions_and_out_of_range() {
        for invalid in [0.0, 6.0, 2.5, -1.0, 4.999, f64::NAN, f64::INFINITY] {
            assert!(!is_valid_confidence(invalid), "{invalid} should be invalid");
        }
    }
}

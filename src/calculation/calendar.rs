//! Period calendar arithmetic.
//!
//! Pure date arithmetic shared by the classification and proration steps.

use chrono::NaiveDate;

/// Returns the inclusive day count between two boundary dates.
///
/// Both boundaries count, so a period from Monday to Sunday spans 7 days and
/// a single-day span yields 1. The function is pure arithmetic and performs
/// no validation; callers that require ordered boundaries must check them
/// first (a reversed range yields a non-positive count).
///
/// # Example
///
/// ```
/// use loon_engine::calculation::days_inclusive;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
/// assert_eq!(days_inclusive(start, end), 31);
/// assert_eq!(days_inclusive(start, start), 1);
/// ```
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

//! Employee component assignment model.
//!
//! An assignment links one employee to one wage component for an effective
//! date range, with a free-form configuration tree private to the assignment.
//! Derived forfait assignments are ordinary assignments whose metadata marks
//! them as auto-generated and links them back to their source.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Linkage metadata on an assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentMetadata {
    /// True when the assignment was created by the propagation engine.
    #[serde(default)]
    pub auto_generated: bool,
    /// The source benefit assignment a derived assignment belongs to.
    #[serde(default)]
    pub linked_benefit_assignment_id: Option<Uuid>,
}

/// Links one employee to one wage component for an effective date range.
///
/// Two assignments for the same employee and component must not have
/// overlapping `[effective_from, effective_to)` ranges; a missing
/// `effective_to` means the assignment is open-ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeComponentAssignment {
    /// Unique identifier.
    pub id: Uuid,
    /// The employee this assignment belongs to.
    pub employee_id: String,
    /// Identifier of the assigned wage component.
    pub component_id: Uuid,
    /// Code of the assigned wage component.
    pub component_code: String,
    /// First day the assignment is effective (inclusive).
    pub effective_from: NaiveDate,
    /// Day the assignment stops being effective (exclusive); open-ended when
    /// absent.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    /// Free-form key/value configuration private to this assignment.
    #[serde(default = "empty_configuration")]
    pub configuration: Value,
    /// Optional override of the component's calculated amount.
    #[serde(default)]
    pub override_amount: Option<Decimal>,
    /// Optional override of the component's formula.
    #[serde(default)]
    pub override_formula: Option<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Linkage metadata.
    #[serde(default)]
    pub metadata: AssignmentMetadata,
    /// Soft-delete timestamp; a deleted assignment is retained for audit.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

fn empty_configuration() -> Value {
    Value::Object(serde_json::Map::new())
}

impl EmployeeComponentAssignment {
    /// Creates a live assignment with an empty configuration.
    pub fn new(
        employee_id: impl Into<String>,
        component_id: Uuid,
        component_code: impl Into<String>,
        effective_from: NaiveDate,
        effective_to: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            component_id,
            component_code: component_code.into(),
            effective_from,
            effective_to,
            configuration: empty_configuration(),
            override_amount: None,
            override_formula: None,
            notes: None,
            metadata: AssignmentMetadata::default(),
            deleted_at: None,
        }
    }

    /// Whether the assignment has not been soft-deleted.
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Whether this assignment was created by the propagation engine.
    pub fn is_derived(&self) -> bool {
        self.metadata.auto_generated
    }

    /// Whether the effective ranges of two assignments overlap.
    ///
    /// Ranges are half-open `[effective_from, effective_to)`; a missing
    /// `effective_to` extends the range without bound, so two open-ended
    /// assignments always overlap.
    ///
    /// # Example
    ///
    /// ```
    /// use loon_engine::models::EmployeeComponentAssignment;
    /// use chrono::NaiveDate;
    /// use uuid::Uuid;
    ///
    /// let component_id = Uuid::new_v4();
    /// let jan = EmployeeComponentAssignment::new(
    ///     "emp_001",
    ///     component_id,
    ///     "company_car",
    ///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    ///     Some(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()),
    /// );
    /// let feb = EmployeeComponentAssignment::new(
    ///     "emp_001",
    ///     component_id,
    ///     "company_car",
    ///     NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
    ///     None,
    /// );
    /// // Adjacent ranges do not overlap: the end date is exclusive.
    /// assert!(!jan.overlaps(&feb));
    /// ```
    pub fn overlaps(&self, other: &Self) -> bool {
        let self_starts_before_other_ends = match other.effective_to {
            Some(other_to) => self.effective_from < other_to,
            None => true,
        };
        let other_starts_before_self_ends = match self.effective_to {
            Some(self_to) => other.effective_from < self_to,
            None => true,
        };
        self_starts_before_other_ends && other_starts_before_self_ends
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assignment(from: NaiveDate, to: Option<NaiveDate>) -> EmployeeComponentAssignment {
        EmployeeComponentAssignment::new("emp_001", Uuid::new_v4(), "company_car", from, to)
    }

    #[test]
    fn test_adjacent_ranges_do_not_overlap() {
        let first = assignment(date(2026, 1, 1), Some(date(2026, 2, 1)));
        let second = assignment(date(2026, 2, 1), Some(date(2026, 3, 1)));
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn test_contained_range_overlaps() {
        let outer = assignment(date(2026, 1, 1), Some(date(2026, 12, 31)));
        let inner = assignment(date(2026, 3, 1), Some(date(2026, 4, 1)));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_open_ended_ranges_always_overlap() {
        let first = assignment(date(2026, 1, 1), None);
        let second = assignment(date(2030, 1, 1), None);
        assert!(first.overlaps(&second));
        assert!(second.overlaps(&first));
    }

    #[test]
    fn test_open_ended_overlaps_later_bounded_range() {
        let open = assignment(date(2026, 1, 1), None);
        let bounded = assignment(date(2026, 6, 1), Some(date(2026, 7, 1)));
        assert!(open.overlaps(&bounded));
    }

    #[test]
    fn test_bounded_range_before_open_start_does_not_overlap() {
        let bounded = assignment(date(2025, 1, 1), Some(date(2025, 6, 1)));
        let open = assignment(date(2026, 1, 1), None);
        assert!(!bounded.overlaps(&open));
    }

    #[test]
    fn test_new_assignment_is_live_and_not_derived() {
        let assignment = assignment(date(2026, 1, 1), None);
        assert!(assignment.is_live());
        assert!(!assignment.is_derived());
        assert_eq!(assignment.configuration, serde_json::json!({}));
    }

    #[test]
    fn test_configuration_defaults_to_empty_object_on_deserialize() {
        let json = format!(
            r#"{{
                "id": "{}",
                "employee_id": "emp_001",
                "component_id": "{}",
                "component_code": "company_car",
                "effective_from": "2026-01-01"
            }}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let assignment: EmployeeComponentAssignment = serde_json::from_str(&json).unwrap();
        assert_eq!(assignment.configuration, serde_json::json!({}));
        assert!(assignment.effective_to.is_none());
        assert!(!assignment.metadata.auto_generated);
    }
}

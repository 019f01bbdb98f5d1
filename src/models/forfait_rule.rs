//! Forfait rule models.
//!
//! A forfait rule is attached to a benefit component and describes which
//! secondary tax/deduction component to derive when that benefit is assigned
//! to an employee, and how to map configuration fields across.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One named entry in a rule's value mapping.
///
/// Both fields are dot-separated paths: `source_field` into the benefit
/// assignment's configuration tree, `target_field` into the derived forfait
/// assignment's configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueMapEntry {
    /// Name of this mapping entry, for configuration and audit purposes.
    pub name: String,
    /// Dot-separated path read from the benefit configuration.
    pub source_field: String,
    /// Dot-separated path written into the forfait configuration.
    pub target_field: String,
    /// Whether the target must be present after mapping.
    #[serde(default)]
    pub required: bool,
}

/// Optional conditions attached to a forfait rule.
///
/// Conditions are configuration data carried with the rule; they do not gate
/// propagation itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConditions {
    /// Minimum benefit value for the rule to be considered applicable.
    #[serde(default)]
    pub min_value: Option<Decimal>,
    /// Maximum benefit value for the rule to be considered applicable.
    #[serde(default)]
    pub max_value: Option<Decimal>,
    /// Whether derived assignments should be flagged for manual approval.
    #[serde(default)]
    pub requires_approval: bool,
}

/// The caller-supplied shape of a forfait rule, before it is validated and
/// stamped by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForfaitRuleDraft {
    /// Whether propagation is enabled for the owning benefit component.
    pub enabled: bool,
    /// Code of the forfait component to derive.
    pub target_component_code: String,
    /// Ordered field mapping from benefit to forfait configuration.
    pub value_mapping: Vec<ValueMapEntry>,
    /// Optional applicability conditions.
    #[serde(default)]
    pub conditions: Option<RuleConditions>,
    /// Free-text description of the rule.
    #[serde(default)]
    pub description: Option<String>,
}

/// A validated forfait rule as stored on its benefit component.
///
/// Rules are replaced wholesale; removal flips `enabled` to false in place so
/// the historical configuration stays available for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForfaitRule {
    /// Whether propagation is enabled for the owning benefit component.
    pub enabled: bool,
    /// Code of the forfait component to derive.
    pub target_component_code: String,
    /// Ordered field mapping from benefit to forfait configuration.
    pub value_mapping: Vec<ValueMapEntry>,
    /// Optional applicability conditions.
    #[serde(default)]
    pub conditions: Option<RuleConditions>,
    /// Free-text description of the rule.
    #[serde(default)]
    pub description: Option<String>,
    /// When the rule was last configured.
    pub configured_at: DateTime<Utc>,
    /// Who configured the rule.
    pub configured_by: String,
}

impl ForfaitRule {
    /// Builds a stored rule from a draft plus its audit stamp.
    pub fn from_draft(
        draft: ForfaitRuleDraft,
        configured_at: DateTime<Utc>,
        configured_by: impl Into<String>,
    ) -> Self {
        Self {
            enabled: draft.enabled,
            target_component_code: draft.target_component_code,
            value_mapping: draft.value_mapping,
            conditions: draft.conditions,
            description: draft.description,
            configured_at,
            configured_by: configured_by.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft() -> ForfaitRuleDraft {
        ForfaitRuleDraft {
            enabled: true,
            target_component_code: "car_forfait".to_string(),
            value_mapping: vec![ValueMapEntry {
                name: "catalog_value".to_string(),
                source_field: "car.catalog_value".to_string(),
                target_field: "valuation.catalog_value".to_string(),
                required: true,
            }],
            conditions: None,
            description: Some("Company car addition".to_string()),
        }
    }

    #[test]
    fn test_from_draft_carries_audit_stamp() {
        let stamp = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let rule = ForfaitRule::from_draft(draft(), stamp, "admin_001");
        assert!(rule.enabled);
        assert_eq!(rule.target_component_code, "car_forfait");
        assert_eq!(rule.configured_at, stamp);
        assert_eq!(rule.configured_by, "admin_001");
    }

    #[test]
    fn test_value_map_entry_required_defaults_to_false() {
        let json = r#"{
            "name": "rental_value",
            "source_field": "housing.rental_value",
            "target_field": "valuation.rental_value"
        }"#;
        let entry: ValueMapEntry = serde_json::from_str(json).unwrap();
        assert!(!entry.required);
    }

    #[test]
    fn test_rule_draft_deserializes_without_optional_fields() {
        let json = r#"{
            "enabled": true,
            "target_component_code": "meal_forfait",
            "value_mapping": [
                {
                    "name": "meal_count",
                    "source_field": "meals.count",
                    "target_field": "valuation.meal_count",
                    "required": true
                }
            ]
        }"#;
        let draft: ForfaitRuleDraft = serde_json::from_str(json).unwrap();
        assert!(draft.conditions.is_none());
        assert!(draft.description.is_none());
        assert_eq!(draft.value_mapping.len(), 1);
    }
}

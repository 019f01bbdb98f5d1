//! Predefined forfait rule templates.
//!
//! A fixed catalog of named templates mapping well-known Dutch benefit types
//! to their forfait component codes and mapping shape. Templates are
//! reference data: they seed the rule registry but impose no runtime
//! behavior of their own.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ForfaitRuleDraft, RuleConditions, ValueMapEntry};

/// A named, predefined forfait rule template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTemplate {
    /// Stable key identifying the template.
    pub key: String,
    /// Human-readable template name.
    pub name: String,
    /// Code of the benefit component this template is meant for.
    pub benefit_component_code: String,
    /// The rule shape to seed the registry with.
    pub rule: ForfaitRuleDraft,
}

impl RuleTemplate {
    /// Returns a rule draft ready to be passed to the registry.
    pub fn draft(&self) -> ForfaitRuleDraft {
        self.rule.clone()
    }
}

fn entry(name: &str, source: &str, target: &str, required: bool) -> ValueMapEntry {
    ValueMapEntry {
        name: name.to_string(),
        source_field: source.to_string(),
        target_field: target.to_string(),
        required,
    }
}

/// Returns the built-in template catalog.
///
/// Covers the common Dutch benefit-in-kind valuations: company car addition
/// at 2% or 3% of catalog value, housing at 7.5% of rental value, hot meals
/// by count, and medical package by value.
pub fn builtin_templates() -> Vec<RuleTemplate> {
    vec![
        RuleTemplate {
            key: "company_car_2pct".to_string(),
            name: "Company car addition (2% of catalog value)".to_string(),
            benefit_component_code: "company_car".to_string(),
            rule: ForfaitRuleDraft {
                enabled: true,
                target_component_code: "car_forfait".to_string(),
                value_mapping: vec![
                    entry(
                        "catalog_value",
                        "car.catalog_value",
                        "valuation.catalog_value",
                        true,
                    ),
                    entry(
                        "addition_percentage",
                        "car.addition_percentage",
                        "valuation.percentage",
                        false,
                    ),
                    entry("license_plate", "car.license_plate", "car.license_plate", false),
                ],
                conditions: Some(RuleConditions {
                    min_value: Some(Decimal::ZERO),
                    max_value: None,
                    requires_approval: false,
                }),
                description: Some(
                    "Derives the 2% addition component from a company car benefit".to_string(),
                ),
            },
        },
        RuleTemplate {
            key: "company_car_3pct".to_string(),
            name: "Company car addition (3% of catalog value)".to_string(),
            benefit_component_code: "company_car_private".to_string(),
            rule: ForfaitRuleDraft {
                enabled: true,
                target_component_code: "car_forfait".to_string(),
                value_mapping: vec![
                    entry(
                        "catalog_value",
                        "car.catalog_value",
                        "valuation.catalog_value",
                        true,
                    ),
                    entry(
                        "addition_percentage",
                        "car.addition_percentage",
                        "valuation.percentage",
                        true,
                    ),
                ],
                conditions: None,
                description: Some(
                    "Derives the 3% addition component for predominantly private use".to_string(),
                ),
            },
        },
        RuleTemplate {
            key: "housing_7_5pct".to_string(),
            name: "Housing (7.5% of rental value)".to_string(),
            benefit_component_code: "company_housing".to_string(),
            rule: ForfaitRuleDraft {
                enabled: true,
                target_component_code: "housing_forfait".to_string(),
                value_mapping: vec![
                    entry(
                        "rental_value",
                        "housing.rental_value",
                        "valuation.rental_value",
                        true,
                    ),
                    entry("address", "housing.address", "housing.address", false),
                ],
                conditions: None,
                description: Some(
                    "Derives the housing valuation component at 7.5% of rental value".to_string(),
                ),
            },
        },
        RuleTemplate {
            key: "hot_meals".to_string(),
            name: "Hot meals (per meal count)".to_string(),
            benefit_component_code: "hot_meals".to_string(),
            rule: ForfaitRuleDraft {
                enabled: true,
                target_component_code: "meal_forfait".to_string(),
                value_mapping: vec![entry(
                    "meal_count",
                    "meals.count",
                    "valuation.meal_count",
                    true,
                )],
                conditions: None,
                description: Some("Derives the hot meal valuation from the meal count".to_string()),
            },
        },
        RuleTemplate {
            key: "medical_package".to_string(),
            name: "Medical package (by value)".to_string(),
            benefit_component_code: "medical_package".to_string(),
            rule: ForfaitRuleDraft {
                enabled: true,
                target_component_code: "medical_forfait".to_string(),
                value_mapping: vec![entry(
                    "package_value",
                    "medical.package_value",
                    "valuation.package_value",
                    true,
                )],
                conditions: Some(RuleConditions {
                    min_value: None,
                    max_value: None,
                    requires_approval: true,
                }),
                description: Some(
                    "Derives the medical package valuation component".to_string(),
                ),
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_known_benefit_types() {
        let templates = builtin_templates();
        let keys: Vec<&str> = templates.iter().map(|t| t.key.as_str()).collect();
        assert!(keys.contains(&"company_car_2pct"));
        assert!(keys.contains(&"company_car_3pct"));
        assert!(keys.contains(&"housing_7_5pct"));
        assert!(keys.contains(&"hot_meals"));
        assert!(keys.contains(&"medical_package"));
    }

    #[test]
    fn test_every_template_rule_is_enabled_with_mapping() {
        for template in builtin_templates() {
            assert!(template.rule.enabled, "template {} disabled", template.key);
            assert!(
                !template.rule.value_mapping.is_empty(),
                "template {} has no mapping",
                template.key
            );
        }
    }

    #[test]
    fn test_draft_clones_the_rule_shape() {
        let templates = builtin_templates();
        let car = templates
            .iter()
            .find(|t| t.key == "company_car_2pct")
            .unwrap();
        let draft = car.draft();
        assert_eq!(draft.target_component_code, "car_forfait");
        assert!(draft.value_mapping.iter().any(|e| e.required));
    }

    #[test]
    fn test_templates_round_trip_through_yaml() {
        let templates = builtin_templates();
        let yaml = serde_yaml::to_string(&templates).unwrap();
        let back: Vec<RuleTemplate> = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, templates);
    }
}

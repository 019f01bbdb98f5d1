//! Forfait rule registry.
//!
//! Rules live as metadata on their benefit component and are replaced
//! wholesale: setting a new rule fully overwrites the previous one, and
//! removing a rule flips it to disabled without erasing its configuration.

use std::sync::Arc;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{ComponentType, ForfaitRule, ForfaitRuleDraft};
use crate::store::{Clock, ComponentStore};

/// Configures and resolves forfait rules on benefit components.
#[derive(Clone)]
pub struct ForfaitRuleRegistry {
    components: Arc<dyn ComponentStore>,
    clock: Arc<dyn Clock>,
}

impl ForfaitRuleRegistry {
    /// Creates a registry over the given component store and clock.
    pub fn new(components: Arc<dyn ComponentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { components, clock }
    }

    /// Validates and stores a rule on its benefit component.
    ///
    /// When the rule is enabled, the target component must exist and be a
    /// tax, deduction or benefit component, and the value mapping must be
    /// non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ComponentNotFound`] when the benefit or target
    /// component is absent, and [`EngineError::InvalidForfaitRule`] when the
    /// rule shape or target type is unsuitable.
    pub fn set_rule(
        &self,
        organization_id: &str,
        benefit_component_code: &str,
        draft: ForfaitRuleDraft,
        actor_id: &str,
    ) -> EngineResult<ForfaitRule> {
        let mut benefit = self
            .components
            .find_by_code(organization_id, benefit_component_code)
            .ok_or_else(|| EngineError::ComponentNotFound {
                code: benefit_component_code.to_string(),
            })?;

        validate_draft(&draft)?;

        if draft.enabled {
            let target = self
                .components
                .find_by_code(organization_id, &draft.target_component_code)
                .ok_or_else(|| EngineError::ComponentNotFound {
                    code: draft.target_component_code.clone(),
                })?;
            let suitable = matches!(
                target.component_type,
                ComponentType::Tax | ComponentType::Deduction | ComponentType::Benefit
            );
            if !suitable {
                return Err(EngineError::InvalidForfaitRule {
                    message: format!(
                        "target component '{}' has type {}; expected tax, deduction or benefit",
                        target.code, target.component_type
                    ),
                });
            }
        }

        let rule = ForfaitRule::from_draft(draft, self.clock.now(), actor_id);
        benefit.forfait_rule = Some(rule.clone());
        self.components.save(benefit);

        info!(
            component = benefit_component_code,
            target = %rule.target_component_code,
            enabled = rule.enabled,
            actor = actor_id,
            "Forfait rule configured"
        );

        Ok(rule)
    }

    /// Returns the enabled rule for a benefit component, if any.
    ///
    /// Disabled and never-configured rules are indistinguishable to callers:
    /// both mean "no propagation".
    pub fn get_rule(&self, organization_id: &str, benefit_component_code: &str) -> Option<ForfaitRule> {
        self.components
            .find_by_code(organization_id, benefit_component_code)
            .and_then(|component| component.forfait_rule)
            .filter(|rule| rule.enabled)
    }

    /// Disables the rule on a benefit component, preserving its
    /// configuration for audit.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ComponentNotFound`] when the benefit component
    /// is absent. Removing a rule that was never configured is a no-op.
    pub fn remove_rule(
        &self,
        organization_id: &str,
        benefit_component_code: &str,
    ) -> EngineResult<()> {
        let mut benefit = self
            .components
            .find_by_code(organization_id, benefit_component_code)
            .ok_or_else(|| EngineError::ComponentNotFound {
                code: benefit_component_code.to_string(),
            })?;

        if let Some(rule) = benefit.forfait_rule.as_mut() {
            rule.enabled = false;
            self.components.save(benefit);
            info!(
                component = benefit_component_code,
                "Forfait rule disabled"
            );
        }
        Ok(())
    }
}

fn validate_draft(draft: &ForfaitRuleDraft) -> EngineResult<()> {
    if !draft.enabled {
        return Ok(());
    }
    if draft.target_component_code.trim().is_empty() {
        return Err(EngineError::InvalidForfaitRule {
            message: "target component code must not be empty".to_string(),
        });
    }
    if draft.value_mapping.is_empty() {
        return Err(EngineError::InvalidForfaitRule {
            message: "value mapping must not be empty for an enabled rule".to_string(),
        });
    }
    for entry in &draft.value_mapping {
        if entry.source_field.trim().is_empty() || entry.target_field.trim().is_empty() {
            return Err(EngineError::InvalidForfaitRule {
                message: format!(
                    "mapping entry '{}' must name both a source and a target field",
                    entry.name
                ),
            });
        }
    }
    Ok(())
}

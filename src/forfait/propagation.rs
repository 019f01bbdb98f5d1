//! Forfait propagation engine.
//!
//! Reacts to the lifecycle of a benefit assignment by creating, updating or
//! soft-deleting the derived forfait assignment its rule describes.
//! Propagation is best-effort: the benefit assignment is the primary,
//! user-intended action, so every propagation failure is logged and swallowed
//! rather than surfaced to the caller.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{AssignmentMetadata, EmployeeComponentAssignment, ValueMapEntry};
use crate::store::{AssignmentStore, Clock, ComponentStore};

use super::path::{get_path, set_path};
use super::registry::ForfaitRuleRegistry;

/// The result of one propagation attempt.
///
/// Expected no-ops (no rule, no derived link) are `Skipped`; genuine faults
/// degrade to `Failed` with the underlying reason. Neither is an error from
/// the caller's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum PropagationOutcome {
    /// A derived assignment was created.
    Created(EmployeeComponentAssignment),
    /// An existing derived assignment was updated in place.
    Updated(EmployeeComponentAssignment),
    /// The derived assignment was soft-deleted.
    Deleted(EmployeeComponentAssignment),
    /// Nothing applied to this source assignment.
    Skipped {
        /// Why propagation did not apply.
        reason: String,
    },
    /// Propagation was attempted but failed; the source operation succeeded.
    Failed {
        /// The underlying failure, for diagnostics.
        reason: String,
    },
}

impl PropagationOutcome {
    /// A short status label for logs and API payloads.
    pub fn status(&self) -> &'static str {
        match self {
            PropagationOutcome::Created(_) => "created",
            PropagationOutcome::Updated(_) => "updated",
            PropagationOutcome::Deleted(_) => "deleted",
            PropagationOutcome::Skipped { .. } => "skipped",
            PropagationOutcome::Failed { .. } => "failed",
        }
    }

    /// The derived assignment this outcome touched, if any.
    pub fn derived_assignment(&self) -> Option<&EmployeeComponentAssignment> {
        match self {
            PropagationOutcome::Created(assignment)
            | PropagationOutcome::Updated(assignment)
            | PropagationOutcome::Deleted(assignment) => Some(assignment),
            PropagationOutcome::Skipped { .. } | PropagationOutcome::Failed { .. } => None,
        }
    }
}

/// Maps values from a source configuration per a rule's value mapping.
///
/// Each entry reads its `source_field` as a dot path; a value that is absent
/// or explicitly null is simply omitted from the result. Present values are
/// written to their `target_field`, creating intermediate objects as needed.
pub fn map_values(source_configuration: &Value, mapping: &[ValueMapEntry]) -> Value {
    let mut result = Value::Object(Map::new());
    for entry in mapping {
        if let Some(value) = get_path(source_configuration, &entry.source_field) {
            if !value.is_null() {
                set_path(&mut result, &entry.target_field, value.clone());
            }
        }
    }
    result
}

/// Checks that every required target field is present in a mapped result.
///
/// # Errors
///
/// Returns [`EngineError::MissingMappedFields`] naming every missing target
/// field, not just the first one found.
pub fn validate_mapped_values(mapped: &Value, mapping: &[ValueMapEntry]) -> EngineResult<()> {
    let missing: Vec<String> = mapping
        .iter()
        .filter(|entry| entry.required)
        .filter(|entry| {
            get_path(mapped, &entry.target_field)
                .map(Value::is_null)
                .unwrap_or(true)
        })
        .map(|entry| entry.target_field.clone())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(EngineError::MissingMappedFields { fields: missing })
    }
}

/// Derives and maintains forfait assignments from benefit assignments.
#[derive(Clone)]
pub struct ForfaitPropagationEngine {
    registry: ForfaitRuleRegistry,
    components: Arc<dyn ComponentStore>,
    assignments: Arc<dyn AssignmentStore>,
    clock: Arc<dyn Clock>,
}

impl ForfaitPropagationEngine {
    /// Creates an engine over the given registry and collaborator seams.
    pub fn new(
        registry: ForfaitRuleRegistry,
        components: Arc<dyn ComponentStore>,
        assignments: Arc<dyn AssignmentStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            components,
            assignments,
            clock,
        }
    }

    /// Reacts to the creation of a source benefit assignment.
    ///
    /// Never fails: errors are logged and degraded to
    /// [`PropagationOutcome::Failed`].
    pub fn on_source_created(
        &self,
        organization_id: &str,
        source: &EmployeeComponentAssignment,
    ) -> PropagationOutcome {
        self.guarded(source, "create", || self.create_inner(organization_id, source))
    }

    /// Reacts to a configuration change on a source benefit assignment.
    pub fn on_source_updated(
        &self,
        organization_id: &str,
        source: &EmployeeComponentAssignment,
    ) -> PropagationOutcome {
        self.guarded(source, "update", || self.update_inner(organization_id, source))
    }

    /// Reacts to the removal of a source benefit assignment.
    ///
    /// The organization scope is accepted for signature symmetry with the
    /// other lifecycle events; deletion only needs the derived link.
    pub fn on_source_deleted(
        &self,
        _organization_id: &str,
        source: &EmployeeComponentAssignment,
    ) -> PropagationOutcome {
        self.guarded(source, "delete", || self.delete_inner(source))
    }

    fn guarded(
        &self,
        source: &EmployeeComponentAssignment,
        event: &str,
        attempt: impl FnOnce() -> EngineResult<PropagationOutcome>,
    ) -> PropagationOutcome {
        match attempt() {
            Ok(outcome) => {
                info!(
                    source_assignment = %source.id,
                    component = %source.component_code,
                    event,
                    status = outcome.status(),
                    "Forfait propagation finished"
                );
                outcome
            }
            Err(error) => {
                warn!(
                    source_assignment = %source.id,
                    component = %source.component_code,
                    event,
                    error = %error,
                    "Forfait propagation failed"
                );
                PropagationOutcome::Failed {
                    reason: error.to_string(),
                }
            }
        }
    }

    fn create_inner(
        &self,
        organization_id: &str,
        source: &EmployeeComponentAssignment,
    ) -> EngineResult<PropagationOutcome> {
        let Some(rule) = self.registry.get_rule(organization_id, &source.component_code) else {
            return Ok(PropagationOutcome::Skipped {
                reason: format!(
                    "no enabled forfait rule for component '{}'",
                    source.component_code
                ),
            });
        };

        // A retried event or a rule re-save must not produce a second derived
        // assignment for the same source.
        if self.assignments.find_derived_for_source(source.id).is_some() {
            return self.update_inner(organization_id, source);
        }

        let mapped = map_values(&source.configuration, &rule.value_mapping);
        validate_mapped_values(&mapped, &rule.value_mapping)?;

        let target = self
            .components
            .find_by_code(organization_id, &rule.target_component_code)
            .ok_or_else(|| EngineError::ComponentNotFound {
                code: rule.target_component_code.clone(),
            })?;

        let mut derived = EmployeeComponentAssignment::new(
            source.employee_id.clone(),
            target.id,
            target.code.clone(),
            source.effective_from,
            source.effective_to,
        );
        derived.configuration = mapped;
        derived.metadata = AssignmentMetadata {
            auto_generated: true,
            linked_benefit_assignment_id: Some(source.id),
        };
        derived.notes = Some(format!(
            "Derived from '{}' assignment",
            source.component_code
        ));

        let stored = self.assignments.insert(derived)?;
        Ok(PropagationOutcome::Created(stored))
    }

    fn update_inner(
        &self,
        organization_id: &str,
        source: &EmployeeComponentAssignment,
    ) -> EngineResult<PropagationOutcome> {
        let Some(existing) = self.assignments.find_derived_for_source(source.id) else {
            return Ok(PropagationOutcome::Skipped {
                reason: "no derived assignment linked to this source".to_string(),
            });
        };
        let Some(rule) = self.registry.get_rule(organization_id, &source.component_code) else {
            return Ok(PropagationOutcome::Skipped {
                reason: format!(
                    "forfait rule for component '{}' is no longer enabled",
                    source.component_code
                ),
            });
        };

        let mapped = map_values(&source.configuration, &rule.value_mapping);
        validate_mapped_values(&mapped, &rule.value_mapping)?;

        // Same identity: only the configuration is overwritten.
        let mut updated = existing;
        updated.configuration = mapped;
        let stored = self.assignments.update(updated)?;
        Ok(PropagationOutcome::Updated(stored))
    }

    fn delete_inner(
        &self,
        source: &EmployeeComponentAssignment,
    ) -> EngineResult<PropagationOutcome> {
        let Some(existing) = self.assignments.find_derived_for_source(source.id) else {
            return Ok(PropagationOutcome::Skipped {
                reason: "no derived assignment linked to this source".to_string(),
            });
        };
        let deleted = self.assignments.soft_delete(existing.id, self.clock.now())?;
        Ok(PropagationOutcome::Deleted(deleted))
    }
}

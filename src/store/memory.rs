//! In-memory store implementation.
//!
//! Backs the HTTP facade and the test suites. The consistency constraints a
//! production schema would enforce (assignment overlap, derived-link
//! uniqueness, delete guards) are surfaced here so the engine sees the same
//! failure modes in every environment.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeComponentAssignment, WageComponent};

use super::{AssignmentStore, ComponentStore};

/// Thread-safe in-memory store for components and assignments.
#[derive(Default)]
pub struct InMemoryStore {
    components: RwLock<HashMap<(String, String), WageComponent>>,
    assignments: RwLock<HashMap<Uuid, EmployeeComponentAssignment>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ComponentStore for InMemoryStore {
    fn find_by_code(&self, organization_id: &str, code: &str) -> Option<WageComponent> {
        let components = self
            .components
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        components
            .get(&(organization_id.to_string(), code.to_string()))
            .filter(|component| !component.is_deleted())
            .cloned()
    }

    fn save(&self, component: WageComponent) {
        let mut components = self
            .components
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let key = (component.organization_id.clone(), component.code.clone());
        components.insert(key, component);
    }

    fn soft_delete(
        &self,
        organization_id: &str,
        code: &str,
        at: DateTime<Utc>,
    ) -> EngineResult<()> {
        let assignments = self
            .assignments
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut components = self
            .components
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let key = (organization_id.to_string(), code.to_string());
        let component = components
            .get_mut(&key)
            .filter(|component| !component.is_deleted())
            .ok_or_else(|| EngineError::ComponentNotFound {
                code: code.to_string(),
            })?;

        let in_use = assignments
            .values()
            .any(|assignment| assignment.is_live() && assignment.component_id == component.id);
        if in_use {
            return Err(EngineError::ComponentInUse {
                code: code.to_string(),
            });
        }

        component.deleted_at = Some(at);
        Ok(())
    }
}

impl AssignmentStore for InMemoryStore {
    fn find_by_id(&self, id: Uuid) -> Option<EmployeeComponentAssignment> {
        let assignments = self
            .assignments
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        assignments.get(&id).cloned()
    }

    fn find_derived_for_source(&self, source_id: Uuid) -> Option<EmployeeComponentAssignment> {
        let assignments = self
            .assignments
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        assignments
            .values()
            .find(|assignment| {
                assignment.is_live()
                    && assignment.metadata.linked_benefit_assignment_id == Some(source_id)
            })
            .cloned()
    }

    fn insert(
        &self,
        assignment: EmployeeComponentAssignment,
    ) -> EngineResult<EmployeeComponentAssignment> {
        let mut assignments = self
            .assignments
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let conflict = assignments.values().any(|existing| {
            existing.is_live()
                && existing.employee_id == assignment.employee_id
                && existing.component_id == assignment.component_id
                && existing.overlaps(&assignment)
        });
        if conflict {
            return Err(EngineError::OverlappingAssignment {
                employee_id: assignment.employee_id.clone(),
                component_code: assignment.component_code.clone(),
            });
        }

        if let Some(source_id) = assignment.metadata.linked_benefit_assignment_id {
            let duplicate = assignments.values().any(|existing| {
                existing.is_live()
                    && existing.metadata.linked_benefit_assignment_id == Some(source_id)
            });
            if duplicate {
                return Err(EngineError::DuplicateDerivedAssignment { source_id });
            }
        }

        assignments.insert(assignment.id, assignment.clone());
        Ok(assignment)
    }

    fn update(
        &self,
        assignment: EmployeeComponentAssignment,
    ) -> EngineResult<EmployeeComponentAssignment> {
        let mut assignments = self
            .assignments
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if !assignments.contains_key(&assignment.id) {
            return Err(EngineError::AssignmentNotFound { id: assignment.id });
        }
        assignments.insert(assignment.id, assignment.clone());
        Ok(assignment)
    }

    fn soft_delete(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> EngineResult<EmployeeComponentAssignment> {
        let mut assignments = self
            .assignments
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let assignment = assignments
            .get_mut(&id)
            .filter(|assignment| assignment.is_live())
            .ok_or(EngineError::AssignmentNotFound { id })?;
        assignment.deleted_at = Some(at);
        Ok(assignment.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignmentMetadata, CalculationKind, ComponentType};
    use chrono::{NaiveDate, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn car_component() -> WageComponent {
        WageComponent::new(
            "org_001",
            "company_car",
            "Company car",
            ComponentType::Benefit,
            CalculationKind::Fixed,
        )
    }

    fn assignment_for(
        component: &WageComponent,
        from: NaiveDate,
        to: Option<NaiveDate>,
    ) -> EmployeeComponentAssignment {
        EmployeeComponentAssignment::new(
            "emp_001",
            component.id,
            component.code.clone(),
            from,
            to,
        )
    }

    #[test]
    fn test_find_by_code_excludes_deleted_components() {
        let store = InMemoryStore::new();
        let component = car_component();
        store.save(component.clone());
        assert!(store.find_by_code("org_001", "company_car").is_some());

        ComponentStore::soft_delete(&store, "org_001", "company_car", stamp()).unwrap();
        assert!(store.find_by_code("org_001", "company_car").is_none());
    }

    #[test]
    fn test_component_delete_blocked_while_assignments_live() {
        let store = InMemoryStore::new();
        let component = car_component();
        store.save(component.clone());
        store
            .insert(assignment_for(&component, date(2026, 1, 1), None))
            .unwrap();

        let result = ComponentStore::soft_delete(&store, "org_001", "company_car", stamp());
        assert!(matches!(
            result.unwrap_err(),
            EngineError::ComponentInUse { .. }
        ));
    }

    #[test]
    fn test_component_delete_allowed_after_assignment_deleted() {
        let store = InMemoryStore::new();
        let component = car_component();
        store.save(component.clone());
        let assignment = store
            .insert(assignment_for(&component, date(2026, 1, 1), None))
            .unwrap();
        AssignmentStore::soft_delete(&store, assignment.id, stamp()).unwrap();

        assert!(ComponentStore::soft_delete(&store, "org_001", "company_car", stamp()).is_ok());
    }

    #[test]
    fn test_overlapping_assignment_is_rejected() {
        let store = InMemoryStore::new();
        let component = car_component();
        store
            .insert(assignment_for(&component, date(2026, 1, 1), None))
            .unwrap();

        let result = store.insert(assignment_for(&component, date(2026, 6, 1), None));
        assert!(matches!(
            result.unwrap_err(),
            EngineError::OverlappingAssignment { .. }
        ));
    }

    #[test]
    fn test_adjacent_assignments_are_accepted() {
        let store = InMemoryStore::new();
        let component = car_component();
        store
            .insert(assignment_for(
                &component,
                date(2026, 1, 1),
                Some(date(2026, 2, 1)),
            ))
            .unwrap();
        assert!(
            store
                .insert(assignment_for(&component, date(2026, 2, 1), None))
                .is_ok()
        );
    }

    #[test]
    fn test_duplicate_derived_link_is_rejected() {
        let store = InMemoryStore::new();
        let component = car_component();
        let source_id = Uuid::new_v4();

        let mut first = assignment_for(&component, date(2026, 1, 1), Some(date(2026, 2, 1)));
        first.metadata = AssignmentMetadata {
            auto_generated: true,
            linked_benefit_assignment_id: Some(source_id),
        };
        store.insert(first).unwrap();

        let mut second = assignment_for(&component, date(2026, 2, 1), None);
        second.metadata = AssignmentMetadata {
            auto_generated: true,
            linked_benefit_assignment_id: Some(source_id),
        };
        let result = store.insert(second);
        assert!(matches!(
            result.unwrap_err(),
            EngineError::DuplicateDerivedAssignment { .. }
        ));
    }

    #[test]
    fn test_find_derived_for_source_ignores_deleted_links() {
        let store = InMemoryStore::new();
        let component = car_component();
        let source_id = Uuid::new_v4();

        let mut derived = assignment_for(&component, date(2026, 1, 1), None);
        derived.metadata = AssignmentMetadata {
            auto_generated: true,
            linked_benefit_assignment_id: Some(source_id),
        };
        let derived = store.insert(derived).unwrap();
        assert!(store.find_derived_for_source(source_id).is_some());

        AssignmentStore::soft_delete(&store, derived.id, stamp()).unwrap();
        assert!(store.find_derived_for_source(source_id).is_none());
    }

    #[test]
    fn test_update_unknown_assignment_errors() {
        let store = InMemoryStore::new();
        let component = car_component();
        let assignment = assignment_for(&component, date(2026, 1, 1), None);
        let result = store.update(assignment);
        assert!(matches!(
            result.unwrap_err(),
            EngineError::AssignmentNotFound { .. }
        ));
    }

    #[test]
    fn test_soft_delete_twice_errors() {
        let store = InMemoryStore::new();
        let component = car_component();
        let assignment = store
            .insert(assignment_for(&component, date(2026, 1, 1), None))
            .unwrap();
        AssignmentStore::soft_delete(&store, assignment.id, stamp()).unwrap();
        let result = AssignmentStore::soft_delete(&store, assignment.id, stamp());
        assert!(matches!(
            result.unwrap_err(),
            EngineError::AssignmentNotFound { .. }
        ));
    }
}

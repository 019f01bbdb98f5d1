//! Application state for the engine's HTTP facade.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::forfait::{ForfaitPropagationEngine, ForfaitRuleRegistry};
use crate::store::{
    Clock, FormulaEvaluator, InMemoryStore, LookupFormulaEvaluator, SystemClock,
};

/// Shared application state.
///
/// Contains the loaded configuration and the collaborator seams (store,
/// clock, formula evaluator) the handlers wire into the engines.
#[derive(Clone)]
pub struct AppState {
    config: Arc<EngineConfig>,
    store: Arc<InMemoryStore>,
    clock: Arc<dyn Clock>,
    evaluator: Arc<dyn FormulaEvaluator>,
}

impl AppState {
    /// Creates application state with a fresh store, the system clock and
    /// the lookup formula evaluator.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_parts(
            config,
            Arc::new(InMemoryStore::new()),
            Arc::new(SystemClock),
            Arc::new(LookupFormulaEvaluator),
        )
    }

    /// Creates application state from explicit parts, for tests that need a
    /// deterministic clock or a pre-seeded store.
    pub fn with_parts(
        config: EngineConfig,
        store: Arc<InMemoryStore>,
        clock: Arc<dyn Clock>,
        evaluator: Arc<dyn FormulaEvaluator>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            clock,
            evaluator,
        }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the backing store.
    pub fn store(&self) -> &Arc<InMemoryStore> {
        &self.store
    }

    /// Returns the injected clock.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Returns the formula evaluator.
    pub fn evaluator(&self) -> &dyn FormulaEvaluator {
        self.evaluator.as_ref()
    }

    /// Builds a rule registry over this state's store and clock.
    pub fn registry(&self) -> ForfaitRuleRegistry {
        ForfaitRuleRegistry::new(self.store.clone(), self.clock.clone())
    }

    /// Builds a propagation engine over this state's store and clock.
    pub fn propagation_engine(&self) -> ForfaitPropagationEngine {
        ForfaitPropagationEngine::new(
            self.registry(),
            self.store.clone(),
            self.store.clone(),
            self.clock.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Required for axum state.
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_the_store() {
        use crate::models::{CalculationKind, ComponentType, WageComponent};
        use crate::store::ComponentStore;

        let state = AppState::new(EngineConfig::builtin());
        let clone = state.clone();
        state.store().save(WageComponent::new(
            "org_001",
            "company_car",
            "Company car",
            ComponentType::Benefit,
            CalculationKind::Fixed,
        ));
        assert!(clone.store().find_by_code("org_001", "company_car").is_some());
    }
}

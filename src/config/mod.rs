//! Engine configuration.
//!
//! The period table and the predefined forfait rule templates are immutable
//! process-wide configuration: loaded once at startup and injected where
//! needed, never read from ambient global state.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, PeriodTable, REFERENCE_YEAR_DAYS};

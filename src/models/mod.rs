//! Domain models for the Loontijdvak and Forfait Propagation Engine.

mod assignment;
mod component;
mod forfait_rule;
mod period;
mod run_result;

pub use assignment::{AssignmentMetadata, EmployeeComponentAssignment};
pub use component::{CalculationKind, ComponentType, WageComponent};
pub use forfait_rule::{ForfaitRule, ForfaitRuleDraft, RuleConditions, ValueMapEntry};
pub use period::{LoontijdvakMetadata, PeriodLengthCheck, ProratingMetadata, WagePeriodType};
pub use run_result::{
    EmployeeRunResult, EmployeeTotals, PayrollRunResult, ProratedComponent, RunComponent,
    RunWarning,
};

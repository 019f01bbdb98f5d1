//! Calculation logic for wage period classification and proration.
//!
//! This module contains the period calendar arithmetic, the loontijdvak
//! classification and conversion functions, component amount resolution, and
//! the proration calculator that scales component amounts to the actual
//! worked span of a payroll run.

mod amounts;
mod calendar;
mod loontijdvak;
mod prorating;
mod rounding;

pub use amounts::{ResolvedComponent, resolve_amount, resolve_components};
pub use calendar::days_inclusive;
pub use loontijdvak::{classify, convert, prorate_annual, validate_period_length};
pub use prorating::{apply_to_components, aggregate_totals, compute_factor, proration_tolerance};
pub use rounding::round_currency;

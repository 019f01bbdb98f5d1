//! Loontijdvak and Forfait Propagation Engine for Dutch payroll
//!
//! This crate classifies statutory wage periods (loontijdvakken), prorates pay
//! component amounts to the classified period, and propagates derived forfait
//! (taxable benefit-in-kind) components whenever a qualifying benefit is
//! assigned to an employee.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod forfait;
pub mod models;
pub mod store;

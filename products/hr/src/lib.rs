//! HR vertical slice.
//!
//! Employee records, the derived reporting structure of a manager and the
//! per-employee compensation history. Persistence is reached only through the
//! [`EmployeeStore`] and [`CompensationStore`] traits; the sea-orm backed
//! implementations live in `platform-db`.

mod compensation;
mod employees;
mod error;
mod model;
mod reporting;
mod store;

#[cfg(test)]
mod testing;

pub use compensation::CompensationService;
pub use employees::EmployeeService;
pub use error::{HrError, HrResult};
pub use model::{
    Compensation, Employee, EmployeeNode, EmployeeRef, NewCompensation, ReportingStructure,
};
pub use reporting::ReportingEngine;
pub use store::{CompensationStore, EmployeeStore};

pub mod compensations;
pub mod employee_reports;
pub mod employees;

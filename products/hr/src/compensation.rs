use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    employees::{EmployeeService, require_id},
    error::{HrError, HrResult},
    model::{Compensation, Employee},
    store::CompensationStore,
};

#[derive(Clone)]
pub struct CompensationService {
    employees: EmployeeService,
    store: Arc<dyn CompensationStore>,
}

impl CompensationService {
    pub fn new(employees: EmployeeService, store: Arc<dyn CompensationStore>) -> Self {
        Self { employees, store }
    }

    /// The record with the latest effective date, if the employee has any.
    #[instrument(name = "hr.compensation.current", skip_all)]
    pub async fn current_compensation(&self, employee: &Employee) -> HrResult<Option<Compensation>> {
        let employee_id = require_id(employee)?;
        let history = self
            .store
            .find_by_employee_id_latest_first(employee_id)
            .await?;
        Ok(history.into_iter().next())
    }

    /// Appends a compensation record. The employee must exist in the store;
    /// nothing is written otherwise.
    #[instrument(name = "hr.compensation.add", skip_all)]
    pub async fn add_compensation(
        &self,
        employee: &Employee,
        salary: f64,
        effective_date: NaiveDate,
    ) -> HrResult<Compensation> {
        let employee_id = require_id(employee)?;
        self.employees.read(employee_id).await?;
        if !salary.is_finite() || salary < 0.0 {
            return Err(HrError::invalid_input(format!(
                "salary must be a finite, non-negative amount under directory policy, got {salary}"
            )));
        }

        let compensation = Compensation {
            id: Uuid::new_v4().to_string(),
            employee_id: employee_id.to_string(),
            salary,
            effective_date,
        };
        self.store.insert(&compensation).await?;
        info!(
            employee_id,
            compensation_id = %compensation.id,
            %effective_date,
            "compensation recorded"
        );
        Ok(compensation)
    }
}

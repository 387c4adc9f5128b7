use async_trait::async_trait;

use crate::model::{Compensation, Employee};

/// Persistence for employee documents.
///
/// Direct reports are persisted by id only: a record returned from
/// [`EmployeeStore::find_by_id`] carries its reports as
/// [`EmployeeNode::Reference`](crate::EmployeeNode::Reference) values.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Persist a new employee. The id must already be assigned.
    async fn insert(&self, employee: &Employee) -> anyhow::Result<()>;

    async fn find_by_id(&self, employee_id: &str) -> anyhow::Result<Option<Employee>>;

    /// Replace the employee with the same id, creating it when absent.
    async fn save(&self, employee: &Employee) -> anyhow::Result<()>;
}

/// Persistence for compensation records.
#[async_trait]
pub trait CompensationStore: Send + Sync {
    async fn insert(&self, compensation: &Compensation) -> anyhow::Result<()>;

    /// All records of one employee, latest effective date first. Records
    /// sharing an effective date are returned most recently inserted first.
    async fn find_by_employee_id_latest_first(
        &self,
        employee_id: &str,
    ) -> anyhow::Result<Vec<Compensation>>;
}

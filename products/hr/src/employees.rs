use std::sync::Arc;

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    error::{HrError, HrResult},
    model::Employee,
    store::EmployeeStore,
};

/// Create, read and replace employee records.
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    /// Assigns a fresh id and persists the employee. The returned value keeps
    /// the direct reports exactly as supplied; only their ids are stored.
    #[instrument(name = "hr.employee.create", skip_all)]
    pub async fn create(&self, mut employee: Employee) -> HrResult<Employee> {
        ensure_report_ids(&employee)?;
        let employee_id = Uuid::new_v4().to_string();
        debug!(%employee_id, "creating employee");
        employee.employee_id = Some(employee_id);
        self.store.insert(&employee).await?;
        Ok(employee)
    }

    #[instrument(name = "hr.employee.read", skip(self))]
    pub async fn read(&self, employee_id: &str) -> HrResult<Employee> {
        self.store
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| HrError::EmployeeNotFound(employee_id.to_string()))
    }

    /// Full replace by id. Unknown ids are created rather than rejected.
    #[instrument(name = "hr.employee.update", skip_all)]
    pub async fn update(&self, employee: Employee) -> HrResult<Employee> {
        let employee_id = require_id(&employee)?;
        ensure_report_ids(&employee)?;
        debug!(employee_id, "updating employee");
        self.store.save(&employee).await?;
        Ok(employee)
    }
}

pub(crate) fn require_id(employee: &Employee) -> HrResult<&str> {
    employee
        .employee_id
        .as_deref()
        .ok_or_else(|| HrError::invalid_input("employeeId is required"))
}

fn ensure_report_ids(employee: &Employee) -> HrResult<()> {
    match employee
        .direct_reports
        .iter()
        .position(|report| report.employee_id().is_none())
    {
        Some(index) => Err(HrError::invalid_input(format!(
            "directReports[{index}] has no employeeId"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::EmployeeNode,
        testing::{BrokenEmployeeStore, MemoryEmployeeStore, employee},
    };

    fn john_doe() -> Employee {
        Employee {
            first_name: Some("John".into()),
            last_name: Some("Doe".into()),
            department: Some("Engineering".into()),
            position: Some("Developer".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_then_read_round_trips() {
        let service = EmployeeService::new(Arc::new(MemoryEmployeeStore::default()));

        let created = service.create(john_doe()).await.unwrap();
        let id = created.employee_id.clone().expect("id assigned");
        assert_eq!(created.first_name, john_doe().first_name);

        let read = service.read(&id).await.unwrap();
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn create_replaces_client_supplied_id() {
        let service = EmployeeService::new(Arc::new(MemoryEmployeeStore::default()));
        let mut input = john_doe();
        input.employee_id = Some("chosen-by-client".into());

        let created = service.create(input).await.unwrap();
        assert_ne!(created.employee_id.as_deref(), Some("chosen-by-client"));
    }

    #[tokio::test]
    async fn read_unknown_id_is_not_found() {
        let service = EmployeeService::new(Arc::new(MemoryEmployeeStore::default()));
        let err = service.read("missing").await.unwrap_err();
        assert!(matches!(err, HrError::EmployeeNotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn update_then_read_returns_new_fields() {
        let service = EmployeeService::new(Arc::new(MemoryEmployeeStore::default()));
        let mut employee = service.create(john_doe()).await.unwrap();
        employee.position = Some("Development Manager".into());

        let updated = service.update(employee.clone()).await.unwrap();
        assert_eq!(updated, employee);

        let read = service.read(employee.employee_id.as_deref().unwrap()).await.unwrap();
        assert_eq!(read.position.as_deref(), Some("Development Manager"));
    }

    #[tokio::test]
    async fn update_of_unknown_id_creates_the_record() {
        let store = Arc::new(MemoryEmployeeStore::default());
        let service = EmployeeService::new(store.clone());

        service.update(employee("new", "Ada", &[])).await.unwrap();
        assert_eq!(store.len(), 1);
        assert!(service.read("new").await.is_ok());
    }

    #[tokio::test]
    async fn update_requires_an_id() {
        let service = EmployeeService::new(Arc::new(MemoryEmployeeStore::default()));
        let err = service.update(john_doe()).await.unwrap_err();
        assert!(matches!(err, HrError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn nested_reports_are_read_back_as_references() {
        let service = EmployeeService::new(Arc::new(MemoryEmployeeStore::default()));
        let mut manager = john_doe();
        manager.direct_reports = vec![EmployeeNode::Record(employee("r1", "Paul", &[]))];

        let created = service.create(manager).await.unwrap();
        assert!(matches!(created.direct_reports[0], EmployeeNode::Record(_)));

        let read = service
            .read(created.employee_id.as_deref().unwrap())
            .await
            .unwrap();
        assert_eq!(read.direct_reports, vec![EmployeeNode::reference("r1")]);
    }

    #[tokio::test]
    async fn reports_without_ids_are_rejected() {
        let store = Arc::new(MemoryEmployeeStore::default());
        let service = EmployeeService::new(store.clone());
        let mut manager = john_doe();
        manager.direct_reports = vec![EmployeeNode::Record(john_doe())];

        let err = service.create(manager).await.unwrap_err();
        assert!(matches!(err, HrError::InvalidInput(msg) if msg.contains("directReports[0]")));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn update_rejects_reports_without_ids() {
        let store = Arc::new(MemoryEmployeeStore::with([employee("m", "Ada", &["r1"])]));
        let service = EmployeeService::new(store.clone());
        let mut changed = employee("m", "Ada", &[]);
        changed.direct_reports = vec![
            EmployeeNode::reference("r2"),
            EmployeeNode::Record(john_doe()),
        ];

        let err = service.update(changed).await.unwrap_err();
        assert!(matches!(err, HrError::InvalidInput(msg) if msg.contains("directReports[1]")));
        let stored = service.read("m").await.unwrap();
        assert_eq!(stored.direct_reports, vec![EmployeeNode::reference("r1")]);
    }

    #[tokio::test]
    async fn storage_failures_propagate() {
        let service = EmployeeService::new(Arc::new(BrokenEmployeeStore));
        assert!(matches!(
            service.read("any").await.unwrap_err(),
            HrError::Store(_)
        ));
    }
}

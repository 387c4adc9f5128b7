use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;

use crate::{
    model::{Compensation, Employee, EmployeeNode},
    store::{CompensationStore, EmployeeStore},
};

/// Keeps reports by id only, like the database store does.
#[derive(Default)]
pub struct MemoryEmployeeStore {
    records: Mutex<HashMap<String, Employee>>,
    lookups: AtomicUsize,
}

impl MemoryEmployeeStore {
    pub fn with(employees: impl IntoIterator<Item = Employee>) -> Self {
        let store = Self::default();
        {
            let mut records = store.records.lock().unwrap();
            for employee in employees {
                let stored = by_reference(&employee);
                records.insert(stored.employee_id.clone().unwrap(), stored);
            }
        }
        store
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

fn by_reference(employee: &Employee) -> Employee {
    Employee {
        direct_reports: employee
            .direct_reports
            .iter()
            .map(|report| EmployeeNode::reference(report.employee_id().unwrap()))
            .collect(),
        ..employee.clone()
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn insert(&self, employee: &Employee) -> anyhow::Result<()> {
        let stored = by_reference(employee);
        let id = stored
            .employee_id
            .clone()
            .ok_or_else(|| anyhow::anyhow!("employee id missing"))?;
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&id) {
            anyhow::bail!("duplicate employee id {id}");
        }
        records.insert(id, stored);
        Ok(())
    }

    async fn find_by_id(&self, employee_id: &str) -> anyhow::Result<Option<Employee>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.lock().unwrap().get(employee_id).cloned())
    }

    async fn save(&self, employee: &Employee) -> anyhow::Result<()> {
        let stored = by_reference(employee);
        let id = stored
            .employee_id
            .clone()
            .ok_or_else(|| anyhow::anyhow!("employee id missing"))?;
        self.records.lock().unwrap().insert(id, stored);
        Ok(())
    }
}

/// Fails every call, for checking that storage errors are not swallowed.
pub struct BrokenEmployeeStore;

#[async_trait]
impl EmployeeStore for BrokenEmployeeStore {
    async fn insert(&self, _employee: &Employee) -> anyhow::Result<()> {
        anyhow::bail!("connection refused")
    }

    async fn find_by_id(&self, _employee_id: &str) -> anyhow::Result<Option<Employee>> {
        anyhow::bail!("connection refused")
    }

    async fn save(&self, _employee: &Employee) -> anyhow::Result<()> {
        anyhow::bail!("connection refused")
    }
}

#[derive(Default)]
pub struct MemoryCompensationStore {
    records: Mutex<Vec<Compensation>>,
}

impl MemoryCompensationStore {
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl CompensationStore for MemoryCompensationStore {
    async fn insert(&self, compensation: &Compensation) -> anyhow::Result<()> {
        self.records.lock().unwrap().push(compensation.clone());
        Ok(())
    }

    async fn find_by_employee_id_latest_first(
        &self,
        employee_id: &str,
    ) -> anyhow::Result<Vec<Compensation>> {
        let mut history: Vec<Compensation> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|record| record.employee_id == employee_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.effective_date.cmp(&a.effective_date));
        Ok(history)
    }
}

pub fn employee(id: &str, first_name: &str, reports: &[&str]) -> Employee {
    Employee {
        employee_id: Some(id.to_string()),
        first_name: Some(first_name.to_string()),
        last_name: Some("Test".to_string()),
        position: Some("Developer".to_string()),
        department: Some("Engineering".to_string()),
        direct_reports: reports
            .iter()
            .map(|id| EmployeeNode::reference(*id))
            .collect(),
    }
}

use anyhow::Context;
use products_hr::{Compensation, Employee, EmployeeStore};
use tracing::info;

use crate::{DbPool, SeaOrmCompensationStore, SeaOrmEmployeeStore};

const EMPLOYEES: &str = include_str!("../fixtures/employees.json");
const COMPENSATIONS: &str = include_str!("../fixtures/compensations.json");

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub employees: usize,
    pub compensations: usize,
}

/// Load the bundled employee and compensation fixtures. Employees are
/// upserted and compensation records already present are skipped, so running
/// it twice leaves the data unchanged.
pub async fn seed_fixtures(db: &DbPool) -> anyhow::Result<SeedReport> {
    let employees: Vec<Employee> =
        serde_json::from_str(EMPLOYEES).context("invalid employee fixtures")?;
    let compensations: Vec<Compensation> =
        serde_json::from_str(COMPENSATIONS).context("invalid compensation fixtures")?;

    let employee_store = SeaOrmEmployeeStore::new(db.clone());
    for employee in &employees {
        employee_store.save(employee).await?;
    }

    let compensation_store = SeaOrmCompensationStore::new(db.clone());
    let mut written = 0;
    for compensation in &compensations {
        if compensation_store.insert_if_absent(compensation).await? {
            written += 1;
        }
    }

    let report = SeedReport {
        employees: employees.len(),
        compensations: written,
    };
    info!(
        employees = report.employees,
        compensations = report.compensations,
        "fixtures seeded"
    );
    Ok(report)
}

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use entity::{employee_reports, employees};
use products_hr::{Employee, EmployeeNode, EmployeeStore};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
    sea_query::OnConflict,
};

use crate::DbPool;

/// Employees table plus the ordered `employee_reports` links. Writes for one
/// employee run in a single transaction.
#[derive(Clone)]
pub struct SeaOrmEmployeeStore {
    db: DbPool,
}

impl SeaOrmEmployeeStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

fn stored_id(employee: &Employee) -> anyhow::Result<&str> {
    employee
        .employee_id
        .as_deref()
        .ok_or_else(|| anyhow!("employee has no id"))
}

fn employee_row(employee_id: &str, employee: &Employee) -> employees::ActiveModel {
    employees::ActiveModel {
        employee_id: Set(employee_id.to_string()),
        first_name: Set(employee.first_name.clone()),
        last_name: Set(employee.last_name.clone()),
        position: Set(employee.position.clone()),
        department: Set(employee.department.clone()),
    }
}

fn report_rows(
    employee_id: &str,
    employee: &Employee,
) -> anyhow::Result<Vec<employee_reports::ActiveModel>> {
    employee
        .direct_reports
        .iter()
        .enumerate()
        .map(|(index, report)| -> anyhow::Result<employee_reports::ActiveModel> {
            let report_id = report
                .employee_id()
                .ok_or_else(|| anyhow!("direct report {index} of {employee_id} has no id"))?;
            Ok(employee_reports::ActiveModel {
                manager_id: Set(employee_id.to_string()),
                position: Set(i32::try_from(index)?),
                report_id: Set(report_id.to_string()),
            })
        })
        .collect()
}

#[async_trait]
impl EmployeeStore for SeaOrmEmployeeStore {
    async fn insert(&self, employee: &Employee) -> anyhow::Result<()> {
        let employee_id = stored_id(employee)?;
        let reports = report_rows(employee_id, employee)?;

        let txn = self.db.begin().await?;
        employees::Entity::insert(employee_row(employee_id, employee))
            .exec_without_returning(&txn)
            .await
            .with_context(|| format!("insert employee {employee_id}"))?;
        if !reports.is_empty() {
            employee_reports::Entity::insert_many(reports)
                .exec_without_returning(&txn)
                .await?;
        }
        txn.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, employee_id: &str) -> anyhow::Result<Option<Employee>> {
        let Some(row) = employees::Entity::find_by_id(employee_id)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        let reports = employee_reports::Entity::find()
            .filter(employee_reports::Column::ManagerId.eq(employee_id))
            .order_by_asc(employee_reports::Column::Position)
            .all(&self.db)
            .await?;

        Ok(Some(Employee {
            employee_id: Some(row.employee_id),
            first_name: row.first_name,
            last_name: row.last_name,
            position: row.position,
            department: row.department,
            direct_reports: reports
                .into_iter()
                .map(|link| EmployeeNode::reference(link.report_id))
                .collect(),
        }))
    }

    async fn save(&self, employee: &Employee) -> anyhow::Result<()> {
        let employee_id = stored_id(employee)?;
        let reports = report_rows(employee_id, employee)?;

        let txn = self.db.begin().await?;
        employees::Entity::insert(employee_row(employee_id, employee))
            .on_conflict(
                OnConflict::column(employees::Column::EmployeeId)
                    .update_columns([
                        employees::Column::FirstName,
                        employees::Column::LastName,
                        employees::Column::Position,
                        employees::Column::Department,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .with_context(|| format!("save employee {employee_id}"))?;
        employee_reports::Entity::delete_many()
            .filter(employee_reports::Column::ManagerId.eq(employee_id))
            .exec(&txn)
            .await?;
        if !reports.is_empty() {
            employee_reports::Entity::insert_many(reports)
                .exec_without_returning(&txn)
                .await?;
        }
        txn.commit().await?;
        Ok(())
    }
}

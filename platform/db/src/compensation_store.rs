use async_trait::async_trait;
use chrono::Utc;
use entity::compensations;
use products_hr::{Compensation, CompensationStore};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, sea_query::OnConflict,
};

use crate::DbPool;

#[derive(Clone)]
pub struct SeaOrmCompensationStore {
    db: DbPool,
}

impl SeaOrmCompensationStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Insert unless a record with the same id exists. Returns whether a row
    /// was written.
    pub async fn insert_if_absent(&self, compensation: &Compensation) -> anyhow::Result<bool> {
        let written = compensations::Entity::insert(row(compensation))
            .on_conflict(
                OnConflict::column(compensations::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(written > 0)
    }
}

fn row(compensation: &Compensation) -> compensations::ActiveModel {
    compensations::ActiveModel {
        id: Set(compensation.id.clone()),
        employee_id: Set(compensation.employee_id.clone()),
        salary: Set(compensation.salary),
        effective_date: Set(compensation.effective_date),
        recorded_at: Set(Utc::now().into()),
    }
}

fn from_row(model: compensations::Model) -> Compensation {
    Compensation {
        id: model.id,
        employee_id: model.employee_id,
        salary: model.salary,
        effective_date: model.effective_date,
    }
}

#[async_trait]
impl CompensationStore for SeaOrmCompensationStore {
    async fn insert(&self, compensation: &Compensation) -> anyhow::Result<()> {
        compensations::Entity::insert(row(compensation))
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    async fn find_by_employee_id_latest_first(
        &self,
        employee_id: &str,
    ) -> anyhow::Result<Vec<Compensation>> {
        let rows = compensations::Entity::find()
            .filter(compensations::Column::EmployeeId.eq(employee_id))
            .order_by_desc(compensations::Column::EffectiveDate)
            .order_by_desc(compensations::Column::RecordedAt)
            .order_by_desc(compensations::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(from_row).collect())
    }
}

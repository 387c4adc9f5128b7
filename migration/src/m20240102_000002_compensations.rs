use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Compensations {
    Table,
    Id,
    EmployeeId,
    Salary,
    EffectiveDate,
    RecordedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Compensations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Compensations::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Compensations::EmployeeId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Compensations::Salary).double().not_null())
                    .col(ColumnDef::new(Compensations::EffectiveDate).date().not_null())
                    .col(
                        ColumnDef::new(Compensations::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_compensations_employee_effective")
                    .table(Compensations::Table)
                    .col(Compensations::EmployeeId)
                    .col(Compensations::EffectiveDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Compensations::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

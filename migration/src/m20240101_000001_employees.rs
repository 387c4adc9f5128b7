use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Employees {
    Table,
    EmployeeId,
    FirstName,
    LastName,
    Position,
    Department,
}

#[derive(DeriveIden)]
enum EmployeeReports {
    Table,
    ManagerId,
    Position,
    ReportId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::EmployeeId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::FirstName).string_len(128))
                    .col(ColumnDef::new(Employees::LastName).string_len(128))
                    .col(ColumnDef::new(Employees::Position).string_len(128))
                    .col(ColumnDef::new(Employees::Department).string_len(128))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EmployeeReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmployeeReports::ManagerId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmployeeReports::Position).integer().not_null())
                    .col(
                        ColumnDef::new(EmployeeReports::ReportId)
                            .string_len(64)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(EmployeeReports::ManagerId)
                            .col(EmployeeReports::Position),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_reports_manager")
                            .from(EmployeeReports::Table, EmployeeReports::ManagerId)
                            .to(Employees::Table, Employees::EmployeeId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employee_reports_report")
                    .table(EmployeeReports::Table)
                    .col(EmployeeReports::ReportId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(EmployeeReports::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).if_exists().to_owned())
            .await
    }
}

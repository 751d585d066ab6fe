//! Create `employee` table with nullable FKs to `user` and `department`.
//!
//! Deleting a department or a user leaves the employee row in place
//! with the reference cleared.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(pk_auto(Employee::Id))
                    .col(string_null(Employee::EmployeeNumber))
                    .col(string_len(Employee::FirstName, 128).not_null())
                    .col(string_null(Employee::MiddleName))
                    .col(string_len(Employee::LastName, 128).not_null())
                    .col(string_null(Employee::JobPosition))
                    .col(string_null(Employee::JobTitle))
                    .col(string_null(Employee::Photo))
                    .col(integer_null(Employee::UserId))
                    .col(integer_null(Employee::DepartmentId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_user")
                            .from(Employee::Table, Employee::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_department")
                            .from(Employee::Table, Employee::DepartmentId)
                            .to(Department::Table, Department::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employee::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Employee {
    Table,
    Id,
    EmployeeNumber,
    FirstName,
    MiddleName,
    LastName,
    JobPosition,
    JobTitle,
    Photo,
    UserId,
    DepartmentId,
}

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Department { Table, Id }

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Employee: lookup by personnel number
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_number")
                    .table(Employee::Table)
                    .col(Employee::EmployeeNumber)
                    .to_owned(),
            )
            .await?;

        // Employee: FK lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_department")
                    .table(Employee::Table)
                    .col(Employee::DepartmentId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_user")
                    .table(Employee::Table)
                    .col(Employee::UserId)
                    .to_owned(),
            )
            .await?;

        // UserProfile: FK lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_user_profile_user")
                    .table(UserProfile::Table)
                    .col(UserProfile::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_employee_number").table(Employee::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_employee_department").table(Employee::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_employee_user").table(Employee::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_user_profile_user").table(UserProfile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Employee { Table, EmployeeNumber, DepartmentId, UserId }

#[derive(DeriveIden)]
enum UserProfile { Table, UserId }

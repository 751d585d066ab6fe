//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20230101_000001_create_department;
mod m20230101_000002_create_user;
mod m20230101_000003_create_role;
mod m20230101_000004_create_user_profile;
mod m20230101_000005_create_employee;
mod m20230101_000006_create_user_roles;
mod m20230101_000007_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230101_000001_create_department::Migration),
            Box::new(m20230101_000002_create_user::Migration),
            Box::new(m20230101_000003_create_role::Migration),
            Box::new(m20230101_000004_create_user_profile::Migration),
            Box::new(m20230101_000005_create_employee::Migration),
            Box::new(m20230101_000006_create_user_roles::Migration),
            // Indexes should always be applied last
            Box::new(m20230101_000007_add_indexes::Migration),
        ]
    }
}

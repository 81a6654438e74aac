use sea_orm_migration::prelude::*;

mod m20250101_000001_create_accounts_table;
mod m20250101_000002_create_doctors_table;
mod m20250101_000003_create_patients_table;
mod m20250101_000004_create_appointments_table;

/// Database migrator for SeaORM
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_accounts_table::Migration),
            Box::new(m20250101_000002_create_doctors_table::Migration),
            Box::new(m20250101_000003_create_patients_table::Migration),
            Box::new(m20250101_000004_create_appointments_table::Migration),
        ]
    }
}

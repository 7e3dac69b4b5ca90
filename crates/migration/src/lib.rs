//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20241201_000001_create_user;
mod m20241201_000002_create_account;
mod m20241201_000003_create_car;
mod m20241201_000004_create_rental;
mod m20241201_000005_create_payment;
mod m20241201_000006_create_penalty;
mod m20241201_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241201_000001_create_user::Migration),
            Box::new(m20241201_000002_create_account::Migration),
            Box::new(m20241201_000003_create_car::Migration),
            Box::new(m20241201_000004_create_rental::Migration),
            Box::new(m20241201_000005_create_payment::Migration),
            Box::new(m20241201_000006_create_penalty::Migration),
            // Indexes should always be applied last
            Box::new(m20241201_000010_add_indexes::Migration),
        ]
    }
}

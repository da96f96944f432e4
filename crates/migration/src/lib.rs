pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_clubs_table;
mod m20240101_000003_create_applications_table;
mod m20240101_000004_create_reviews_table;
mod m20240101_000005_create_payments_table;

pub(crate) use m20240101_000002_create_clubs_table::Clubs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_clubs_table::Migration),
            Box::new(m20240101_000003_create_applications_table::Migration),
            Box::new(m20240101_000004_create_reviews_table::Migration),
            Box::new(m20240101_000005_create_payments_table::Migration),
        ]
    }
}

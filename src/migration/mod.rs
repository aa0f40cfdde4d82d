//! SeaORM migrations for the target schema.
//!
//! The migrator runs before the pipeline so a fresh database gets the full
//! schema; tables are created in foreign-key dependency order.

pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_users;
mod m20260801_000002_create_project_categories;
mod m20260801_000003_create_projects;
mod m20260801_000004_create_project_images;
mod m20260801_000005_create_clients;
mod m20260801_000006_create_project_features;
mod m20260801_000007_create_company_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_users::Migration),
            Box::new(m20260801_000002_create_project_categories::Migration),
            Box::new(m20260801_000003_create_projects::Migration),
            Box::new(m20260801_000004_create_project_images::Migration),
            Box::new(m20260801_000005_create_clients::Migration),
            Box::new(m20260801_000006_create_project_features::Migration),
            Box::new(m20260801_000007_create_company_settings::Migration),
        ]
    }
}

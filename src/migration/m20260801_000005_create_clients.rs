//! Migration: Create clients table.
//!
//! Clients are synthesized from project descriptions; they carry no link
//! back to the projects they were extracted from.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE clients (
                    id UUID PRIMARY KEY,
                    company_name VARCHAR(255) NOT NULL,
                    contact_person_name VARCHAR(255) NOT NULL,
                    email VARCHAR(255) NOT NULL,
                    country VARCHAR(100) NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS clients CASCADE;")
            .await?;

        Ok(())
    }
}

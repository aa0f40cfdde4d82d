//! Migration: Create company_settings table.

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
                CREATE TABLE company_settings (
                    id UUID PRIMARY KEY,
                    setting_key VARCHAR(100) NOT NULL,
                    setting_value TEXT NOT NULL,
                    setting_type VARCHAR(20) NOT NULL DEFAULT 'text',
                    description TEXT NOT NULL DEFAULT '',
                    is_public BOOLEAN NOT NULL DEFAULT FALSE,
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
            .execute_unprepared("DROP TABLE IF EXISTS company_settings CASCADE;")
            .await?;

        Ok(())
    }
}

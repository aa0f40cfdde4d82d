//! Migration: Create project_images table.

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
                CREATE TABLE project_images (
                    id UUID PRIMARY KEY,
                    project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                    image_url VARCHAR(500) NOT NULL,
                    alt_text VARCHAR(255) NOT NULL DEFAULT '',
                    is_featured BOOLEAN NOT NULL DEFAULT FALSE,
                    sort_order INTEGER NOT NULL DEFAULT 1,
                    image_type VARCHAR(20) NOT NULL DEFAULT 'exterior'
                        CHECK (image_type IN ('exterior', 'interior', 'plan', 'elevation')),
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE INDEX idx_project_images_project ON project_images(project_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS project_images CASCADE;")
            .await?;

        Ok(())
    }
}

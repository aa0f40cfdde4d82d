//! Migration: Create projects table.

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
                CREATE TABLE projects (
                    id UUID PRIMARY KEY,
                    title VARCHAR(255) NOT NULL,
                    slug VARCHAR(255) NOT NULL,
                    description TEXT NOT NULL DEFAULT '',
                    category_id UUID REFERENCES project_categories(id),
                    lead_architect_id UUID REFERENCES users(id),
                    location VARCHAR(255) NOT NULL,
                    total_area_sqm DOUBLE PRECISION,
                    status VARCHAR(20) NOT NULL DEFAULT 'completed',
                    is_published BOOLEAN NOT NULL DEFAULT FALSE,
                    show_on_website BOOLEAN NOT NULL DEFAULT FALSE,
                    is_featured BOOLEAN NOT NULL DEFAULT FALSE,
                    featured_image_url VARCHAR(500),
                    actual_completion_date DATE,
                    created_at TIMESTAMPTZ,
                    updated_at TIMESTAMPTZ
                );

                CREATE INDEX idx_projects_category ON projects(category_id);
                CREATE INDEX idx_projects_lead_architect ON projects(lead_architect_id);
                CREATE INDEX idx_projects_slug ON projects(slug);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS projects CASCADE;")
            .await?;

        Ok(())
    }
}

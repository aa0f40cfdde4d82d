//! Stage 6: attach canned feature lists to every migrated project.

use chrono::Utc;
use sea_orm::{ConnectionTrait, EntityTrait, Set};
use tracing::info;
use uuid::Uuid;

use crate::entity::{project, project_category, project_feature};
use crate::error::MigrateResult;

/// Features attached per project.
const FEATURES_PER_PROJECT: usize = 4;

const RESIDENTIAL_FEATURES: &[&str] = &[
    "Modern design",
    "Energy efficient systems",
    "Open floor plan",
    "Natural lighting",
    "Sustainable materials",
    "Garden integration",
];

const COMMERCIAL_FEATURES: &[&str] = &[
    "Professional workspace",
    "Modern office layout",
    "Parking facilities",
    "Conference rooms",
    "Reception area",
    "Climate control",
];

const EDUCATION_FEATURES: &[&str] = &[
    "Flexible classrooms",
    "Learning spaces",
    "Library area",
    "Student facilities",
    "Modern equipment",
    "Accessible design",
];

const CONTAINER_FEATURES: &[&str] = &[
    "Modular design",
    "Sustainable construction",
    "Quick assembly",
    "Cost effective",
    "Portable structure",
    "Innovative materials",
];

const DEFAULT_FEATURES: &[&str] = &["Modern design", "Professional quality"];

/// Count produced by the feature stage.
pub struct FeaturesOutcome {
    pub created: usize,
}

/// Read back every project with its category and attach the first four
/// entries of the category's catalog. Projects without a category are
/// skipped.
pub async fn synthesize<C: ConnectionTrait>(conn: &C) -> MigrateResult<FeaturesOutcome> {
    info!("Adding sample project features...");

    let rows = project::Entity::find()
        .find_also_related(project_category::Entity)
        .all(conn)
        .await?;

    let now = Utc::now();
    let mut created = 0;

    for (project, category) in rows {
        let Some(category) = category else {
            continue;
        };

        for (position, feature) in features_for(&category.slug)
            .iter()
            .take(FEATURES_PER_PROJECT)
            .enumerate()
        {
            let row = project_feature::ActiveModel {
                id: Set(Uuid::new_v4()),
                project_id: Set(project.id),
                feature_name: Set((*feature).to_string()),
                sort_order: Set(position as i32 + 1),
                created_at: Set(now),
            };

            project_feature::Entity::insert(row).exec(conn).await?;
            created += 1;
        }
    }

    info!("Added {} project features", created);

    Ok(FeaturesOutcome { created })
}

/// Fixed catalog per category slug; unrecognized slugs share a small
/// generic list.
fn features_for(slug: &str) -> &'static [&'static str] {
    match slug {
        "residential" => RESIDENTIAL_FEATURES,
        "commercial" => COMMERCIAL_FEATURES,
        "education" => EDUCATION_FEATURES,
        "container-architecture" => CONTAINER_FEATURES,
        _ => DEFAULT_FEATURES,
    }
}

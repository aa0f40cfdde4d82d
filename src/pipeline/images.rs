//! Stage 4: migrate project images and back-fill project featured flags.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};
use tracing::{debug, info};
use uuid::Uuid;

use crate::entity::{project, project_image};
use crate::error::MigrateResult;
use crate::source::ImageRecord;
use crate::transform::{classify_image, parse_datetime};

use super::projects::ProjectsOutcome;

/// Counts produced by the image stage.
pub struct ImagesOutcome {
    pub migrated: usize,
    /// Images whose project was never migrated. Dropped, not an error.
    pub skipped: usize,
    /// Projects flipped to featured because they own a featured image.
    pub featured_projects: usize,
}

/// Migrate every image whose project reference resolves; the rest are
/// counted and dropped. Projects owning a featured image get their
/// `is_featured` flag back-filled in the same transaction.
pub async fn migrate<C: ConnectionTrait>(
    conn: &C,
    records: &[ImageRecord],
    projects: &ProjectsOutcome,
) -> MigrateResult<ImagesOutcome> {
    info!("Migrating project images...");

    let mut migrated = 0;
    let mut skipped = 0;
    let mut featured: HashSet<Uuid> = HashSet::new();

    for record in records {
        let Some(project_id) = record
            .project_id
            .as_ref()
            .and_then(|old| projects.mapping.get(old))
        else {
            debug!(
                "Dropping image {:?}: no migrated project for its reference",
                record.name.as_deref().unwrap_or("")
            );
            skipped += 1;
            continue;
        };

        if record.feature.as_deref() == Some("1") {
            featured.insert(project_id);
        }

        let row = image_row(record, Uuid::new_v4(), project_id, Utc::now());
        project_image::Entity::insert(row).exec(conn).await?;
        migrated += 1;
    }

    for project_id in &featured {
        let update = project::ActiveModel {
            id: Set(*project_id),
            is_featured: Set(true),
            ..Default::default()
        };
        update.update(conn).await?;
    }

    info!("Migrated {} project images ({} skipped)", migrated, skipped);
    info!("Marked {} projects as featured", featured.len());

    Ok(ImagesOutcome {
        migrated,
        skipped,
        featured_projects: featured.len(),
    })
}

fn image_row(
    record: &ImageRecord,
    id: Uuid,
    project_id: Uuid,
    fallback_created: DateTime<Utc>,
) -> project_image::ActiveModel {
    let name = record.name.as_deref().unwrap_or("");

    let sort_order = record
        .score
        .as_deref()
        .and_then(|score| score.trim().parse::<i32>().ok())
        .unwrap_or(1);

    project_image::ActiveModel {
        id: Set(id),
        project_id: Set(project_id),
        image_url: Set(format!("/images/projects/{}", name)),
        alt_text: Set(format!("Image of {}", name)),
        is_featured: Set(record.feature.as_deref() == Some("1")),
        sort_order: Set(sort_order),
        image_type: Set(classify_image(name).as_str().to_string()),
        created_at: Set(record
            .created_at
            .as_deref()
            .and_then(parse_datetime)
            .unwrap_or(fallback_created)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceId;
    use chrono::Datelike;

    fn record(name: &str) -> ImageRecord {
        ImageRecord {
            id: Some(SourceId::Text("30".to_string())),
            project_id: Some(SourceId::Text("7".to_string())),
            name: Some(name.to_string()),
            feature: Some("1".to_string()),
            score: Some("3".to_string()),
            created_at: Some("2019-05-10 11:00:00".to_string()),
        }
    }

    #[test]
    fn test_image_row_derived_fields() {
        let project_id = Uuid::new_v4();
        let row = image_row(
            &record("jele-interior-01.jpg"),
            Uuid::new_v4(),
            project_id,
            Utc::now(),
        );

        assert_eq!(row.project_id.clone().unwrap(), project_id);
        assert_eq!(
            row.image_url.clone().unwrap(),
            "/images/projects/jele-interior-01.jpg"
        );
        assert_eq!(
            row.alt_text.clone().unwrap(),
            "Image of jele-interior-01.jpg"
        );
        assert!(row.is_featured.clone().unwrap());
        assert_eq!(row.sort_order.clone().unwrap(), 3);
        assert_eq!(row.image_type.clone().unwrap(), "interior");
        assert_eq!(row.created_at.clone().unwrap().year(), 2019);
    }

    #[test]
    fn test_image_row_defaults() {
        let mut source = record("front.jpg");
        source.feature = None;
        source.score = Some("best".to_string());
        source.created_at = None;

        let fallback = Utc::now();
        let row = image_row(&source, Uuid::new_v4(), Uuid::new_v4(), fallback);

        assert!(!row.is_featured.clone().unwrap());
        assert_eq!(row.sort_order.clone().unwrap(), 1);
        assert_eq!(row.image_type.clone().unwrap(), "exterior");
        assert_eq!(row.created_at.clone().unwrap(), fallback);
    }
}

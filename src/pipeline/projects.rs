//! Stage 3: migrate projects.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use sea_orm::{ConnectionTrait, EntityTrait, Set};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::company;
use crate::entity::project;
use crate::error::MigrateResult;
use crate::idmap::IdMap;
use crate::source::ProjectRecord;
use crate::transform::{compose_project_description, extract_area, generate_slug, parse_datetime};

use super::categories::CategoriesOutcome;
use super::users::UsersOutcome;

/// Every migrated project is pinned to the studio's home base; the old
/// schema never stored a location.
const DEFAULT_LOCATION: &str = "Johannesburg, South Africa";

/// Completion year when the source row has no usable updated timestamp.
const DEFAULT_COMPLETION_YEAR: i32 = 2020;

/// Mapping produced by the project stage.
pub struct ProjectsOutcome {
    pub mapping: IdMap,
}

/// Migrate every project record.
///
/// The category reference resolves by display-name match against the
/// category side table; a miss leaves the reference absent. The lead
/// architect is the company account for every project - the old schema
/// carried no per-project author.
pub async fn migrate<C: ConnectionTrait>(
    conn: &C,
    records: &[ProjectRecord],
    categories: &CategoriesOutcome,
    users: &UsersOutcome,
) -> MigrateResult<ProjectsOutcome> {
    info!("Migrating projects...");

    let lead_architect = users.id_by_email.get(company::EMAIL).copied();
    let mut mapping = IdMap::new();

    for record in records {
        let Some(old_id) = record.id.clone() else {
            warn!("Skipping project record without an id");
            continue;
        };

        let category_id = resolve_category(record.category.as_deref(), &categories.id_by_name);

        if category_id.is_none() {
            debug!(
                "No category match for project {:?}",
                record.title.as_deref().unwrap_or("")
            );
        }

        let id = mapping.assign(old_id);
        let row = project_row(record, id, category_id, lead_architect);

        project::Entity::insert(row).exec(conn).await?;
    }

    info!("Migrated {} projects", mapping.len());

    Ok(ProjectsOutcome { mapping })
}

/// Resolve a project's category by display-name match against the stored
/// (trimmed) category names. A miss is an absent reference, not an error.
fn resolve_category(name: Option<&str>, id_by_name: &HashMap<String, Uuid>) -> Option<Uuid> {
    id_by_name.get(name?).copied()
}

fn project_row(
    record: &ProjectRecord,
    id: Uuid,
    category_id: Option<Uuid>,
    lead_architect_id: Option<Uuid>,
) -> project::ActiveModel {
    let title = record.title.as_deref().unwrap_or("");
    let live = record.live.as_deref() == Some("on");

    let updated_at = record.updated_at.as_deref().and_then(parse_datetime);
    let completion_year = updated_at
        .map(|dt| dt.year())
        .unwrap_or(DEFAULT_COMPLETION_YEAR);

    let featured_image_url = record
        .thumb
        .as_deref()
        .filter(|thumb| !thumb.is_empty())
        .map(|thumb| format!("/images/{}", thumb));

    project::ActiveModel {
        id: Set(id),
        title: Set(title.to_string()),
        slug: Set(generate_slug(title)),
        description: Set(compose_project_description(
            record.kind.as_deref(),
            record.client.as_deref(),
            record.info.as_deref(),
            title,
        )),
        category_id: Set(category_id),
        lead_architect_id: Set(lead_architect_id),
        location: Set(DEFAULT_LOCATION.to_string()),
        total_area_sqm: Set(record.size.as_deref().and_then(extract_area)),
        status: Set("completed".to_string()),
        is_published: Set(live),
        show_on_website: Set(live),
        is_featured: Set(false),
        featured_image_url: Set(featured_image_url),
        actual_completion_date: Set(NaiveDate::from_ymd_opt(completion_year, 12, 31)),
        created_at: Set(record.created_at.as_deref().and_then(parse_datetime)),
        updated_at: Set(updated_at),
    }
}

//! Stage 2: migrate project categories.

use std::collections::HashMap;

use sea_orm::{ConnectionTrait, EntityTrait, Set};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::company;
use crate::entity::project_category;
use crate::error::MigrateResult;
use crate::idmap::IdMap;
use crate::source::CategoryRecord;
use crate::transform::{category_icon, map_category_name, parse_datetime};

/// Mappings produced by the category stage.
pub struct CategoriesOutcome {
    pub mapping: IdMap,
    /// Display-name side table. Projects reference categories by name in
    /// the old schema, so resolution goes through the stored (trimmed)
    /// name rather than the old id.
    pub id_by_name: HashMap<String, Uuid>,
}

/// Migrate every category record; sort order follows source position.
pub async fn migrate<C: ConnectionTrait>(
    conn: &C,
    records: &[CategoryRecord],
) -> MigrateResult<CategoriesOutcome> {
    info!("Migrating categories...");

    let mut mapping = IdMap::new();
    let mut id_by_name = HashMap::new();

    for (position, record) in records.iter().enumerate() {
        let Some(old_id) = record.id.clone() else {
            warn!("Skipping category record without an id");
            continue;
        };

        let id = mapping.assign(old_id);
        let stored_name = record.name.as_deref().unwrap_or("").trim().to_string();
        id_by_name.insert(stored_name, id);

        let row = category_row(record, id, position);
        project_category::Entity::insert(row).exec(conn).await?;
    }

    info!("Migrated {} categories", mapping.len());

    Ok(CategoriesOutcome {
        mapping,
        id_by_name,
    })
}

fn category_row(
    record: &CategoryRecord,
    id: Uuid,
    position: usize,
) -> project_category::ActiveModel {
    let name = record.name.as_deref().unwrap_or("");

    project_category::ActiveModel {
        id: Set(id),
        name: Set(name.trim().to_string()),
        slug: Set(map_category_name(name)),
        description: Set(format!("{} projects by HLA Architects", name)),
        icon_name: Set(category_icon(name).to_string()),
        color_hex: Set(company::BRAND_COLOR.to_string()),
        is_active: Set(record.live.as_deref() == Some("on")),
        sort_order: Set(position as i32 + 1),
        created_at: Set(record.created_at.as_deref().and_then(parse_datetime)),
    }
}

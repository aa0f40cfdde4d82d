//! Stage 1: migrate staff accounts.

use std::collections::HashMap;

use sea_orm::{ConnectionTrait, EntityTrait, Set};
use tracing::{info, warn};
use uuid::Uuid;

use crate::entity::user;
use crate::error::MigrateResult;
use crate::idmap::IdMap;
use crate::source::UserRecord;
use crate::transform::{classify_staff, parse_datetime, split_display_name};

/// Mappings produced by the user stage.
pub struct UsersOutcome {
    pub mapping: IdMap,
    /// Email side table, built from the inserted rows so later stages can
    /// resolve users without querying the database again.
    pub id_by_email: HashMap<String, Uuid>,
}

/// Migrate every user record, one target row per input row.
pub async fn migrate<C: ConnectionTrait>(
    conn: &C,
    records: &[UserRecord],
) -> MigrateResult<UsersOutcome> {
    info!("Migrating users...");

    let mut mapping = IdMap::new();
    let mut id_by_email = HashMap::new();

    for record in records {
        let Some(old_id) = record.id.clone() else {
            warn!("Skipping user record without an id");
            continue;
        };

        let id = mapping.assign(old_id);
        if let Some(email) = &record.email {
            id_by_email.insert(email.clone(), id);
        }

        user::Entity::insert(user_row(record, id)).exec(conn).await?;
    }

    info!("Migrated {} users", mapping.len());

    Ok(UsersOutcome {
        mapping,
        id_by_email,
    })
}

fn user_row(record: &UserRecord, id: Uuid) -> user::ActiveModel {
    let name = record.name.as_deref().unwrap_or("");
    let email = record.email.as_deref().unwrap_or("");

    let (first_name, last_name) = split_display_name(name);
    let profile = classify_staff(name, email);

    user::ActiveModel {
        id: Set(id),
        email: Set(email.to_string()),
        password_hash: Set(record.password.clone().unwrap_or_default()),
        first_name: Set(first_name),
        last_name: Set(last_name),
        role: Set(profile.role.as_str().to_string()),
        years_experience: Set(profile.years_experience),
        created_at: Set(record.created_at.as_deref().and_then(parse_datetime)),
        updated_at: Set(record.updated_at.as_deref().and_then(parse_datetime)),
    }
}

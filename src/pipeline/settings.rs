//! Stage 7: insert the fixed company settings catalog.

use chrono::Utc;
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, Set};
use tracing::info;
use uuid::Uuid;

use crate::config::company;
use crate::entity::{company_setting, project};
use crate::error::MigrateResult;

/// Count produced by the settings stage.
pub struct SettingsOutcome {
    pub created: usize,
}

/// One entry of the settings catalog.
struct SettingSpec {
    key: &'static str,
    value: String,
    kind: &'static str,
    description: &'static str,
    is_public: bool,
}

/// Insert the settings catalog; `total_projects` is computed from the
/// rows the project stage persisted.
pub async fn synthesize<C: ConnectionTrait>(conn: &C) -> MigrateResult<SettingsOutcome> {
    info!("Creating company settings...");

    let total_projects = project::Entity::find().count(conn).await?;
    let catalog = setting_catalog(total_projects);

    let now = Utc::now();

    for spec in &catalog {
        let row = company_setting::ActiveModel {
            id: Set(Uuid::new_v4()),
            setting_key: Set(spec.key.to_string()),
            setting_value: Set(spec.value.clone()),
            setting_type: Set(spec.kind.to_string()),
            description: Set(spec.description.to_string()),
            is_public: Set(spec.is_public),
            created_at: Set(now),
        };

        company_setting::Entity::insert(row).exec(conn).await?;
    }

    info!("Created {} company settings", catalog.len());

    Ok(SettingsOutcome {
        created: catalog.len(),
    })
}

fn setting_catalog(total_projects: u64) -> Vec<SettingSpec> {
    vec![
        SettingSpec {
            key: "company_name",
            value: company::NAME.to_string(),
            kind: "text",
            description: "Company name",
            is_public: true,
        },
        SettingSpec {
            key: "company_email",
            value: company::EMAIL.to_string(),
            kind: "text",
            description: "Main company email",
            is_public: true,
        },
        SettingSpec {
            key: "company_phone",
            value: company::PHONE.to_string(),
            kind: "text",
            description: "Main company phone",
            is_public: true,
        },
        SettingSpec {
            key: "company_address",
            value: company::ADDRESS.to_string(),
            kind: "text",
            description: "Company address",
            is_public: true,
        },
        SettingSpec {
            key: "company_description",
            value: company::DESCRIPTION.to_string(),
            kind: "text",
            description: "Company description",
            is_public: true,
        },
        SettingSpec {
            key: "years_established",
            value: company::YEAR_ESTABLISHED.to_string(),
            kind: "number",
            description: "Year company was established",
            is_public: true,
        },
        SettingSpec {
            key: "total_projects",
            value: total_projects.to_string(),
            kind: "number",
            description: "Total completed projects",
            is_public: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_catalog_has_seven_entries() {
        assert_eq!(setting_catalog(0).len(), 7);
    }

    #[test]
    fn test_setting_catalog_computes_project_count() {
        let catalog = setting_catalog(42);
        let total = catalog
            .iter()
            .find(|spec| spec.key == "total_projects")
            .unwrap();

        assert_eq!(total.value, "42");
        assert_eq!(total.kind, "number");
    }

    #[test]
    fn test_setting_catalog_is_public() {
        assert!(setting_catalog(1).iter().all(|spec| spec.is_public));
    }
}

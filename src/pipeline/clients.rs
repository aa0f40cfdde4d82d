//! Stage 5: synthesize client records from persisted project descriptions.
//!
//! Best-effort enrichment: names are scraped back out of the descriptions
//! written by the project stage, so a client is a guess, never a verified
//! relationship, and carries no link to its source project(s).

use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{ConnectionTrait, EntityTrait, Set};
use tracing::info;
use uuid::Uuid;

use crate::config::company;
use crate::entity::{client, project};
use crate::error::MigrateResult;
use crate::transform::{extract_client_name, generate_slug};

/// Placeholder the old data used when no client was known.
const UNKNOWN_CLIENT: &str = "Unknown Client";

/// Count produced by the client stage.
pub struct ClientsOutcome {
    pub created: usize,
}

/// Read back every project description and create one client per distinct
/// extracted name.
pub async fn synthesize<C: ConnectionTrait>(conn: &C) -> MigrateResult<ClientsOutcome> {
    info!("Creating sample clients...");

    let projects = project::Entity::find().all(conn).await?;
    let names = collect_client_names(projects.iter().map(|p| p.description.as_str()));

    let now = Utc::now();

    for name in &names {
        let row = client::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_name: Set(name.clone()),
            contact_person_name: Set(format!("Contact Person - {}", name)),
            email: Set(format!("contact@{}.co.za", generate_slug(name))),
            country: Set(company::COUNTRY.to_string()),
            created_at: Set(now),
        };

        client::Entity::insert(row).exec(conn).await?;
    }

    info!("Created {} sample clients", names.len());

    Ok(ClientsOutcome {
        created: names.len(),
    })
}

/// Distinct client names in first-seen order, skipping the
/// unknown-client placeholder.
fn collect_client_names<'a>(descriptions: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for description in descriptions {
        let Some(name) = extract_client_name(description) else {
            continue;
        };
        if name == UNKNOWN_CLIENT {
            continue;
        }
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_client_names_dedupes_in_order() {
        let descriptions = [
            "Type: New Build. Client: Jele Family. Completed 2019",
            "Client: Dept of Education. Phase 1",
            "Type: Renovation. Client: Jele Family",
            "Architectural project: Warehouse 12",
        ];

        let names = collect_client_names(descriptions.iter().copied());

        assert_eq!(names, vec!["Jele Family", "Dept of Education"]);
    }

    #[test]
    fn test_collect_client_names_skips_placeholder() {
        let descriptions = ["Client: Unknown Client. Legacy row"];

        assert!(collect_client_names(descriptions.iter().copied()).is_empty());
    }
}

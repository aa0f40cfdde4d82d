//! The migration pipeline: seven stages in hard dependency order.
//!
//! Users -> Categories -> Projects -> Images -> Clients -> Features ->
//! Settings. Later stages consume mappings produced by earlier ones, so
//! the order never branches. Each stage runs inside its own transaction
//! on the shared connection; a failure rolls back the open stage and
//! aborts the run, leaving earlier stages committed.

pub mod categories;
pub mod clients;
pub mod features;
pub mod images;
pub mod projects;
pub mod settings;
pub mod users;

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::error::MigrateResult;
use crate::source::SourceTables;

/// Per-entity counts reported after a successful run.
#[derive(Debug, Default)]
pub struct MigrationSummary {
    pub users: usize,
    pub categories: usize,
    pub projects: usize,
    pub images: usize,
    pub images_skipped: usize,
    pub featured_projects: usize,
    pub clients: usize,
    pub features: usize,
    pub settings: usize,
}

/// Run one stage in its own transaction: commit on success, roll back
/// explicitly and rethrow on failure.
///
/// Implemented as a macro so the stage future is awaited in place with the
/// transaction borrowed by a concrete local lifetime. A generic closure-based
/// helper cannot express this: the internal transaction borrow needs a
/// higher-ranked (`for<'c>`) bound, which in turn forces any outer references
/// captured by the stage body (category/user id maps) to be `'static`.
macro_rules! run_stage {
    ($db:expr, |$txn:ident| $body:expr) => {{
        let $txn = $db.begin().await?;
        match $body.await {
            Ok(value) => {
                $txn.commit().await?;
                Ok::<_, $crate::error::MigrateError>(value)
            }
            Err(err) => {
                $txn.rollback().await?;
                Err(err)
            }
        }
    }};
}

/// Run all stages in dependency order and aggregate the counts.
pub async fn run(
    db: &DatabaseConnection,
    tables: &SourceTables,
) -> MigrateResult<MigrationSummary> {
    let users = run_stage!(db, |txn| users::migrate(&txn, &tables.users))?;

    let categories = run_stage!(db, |txn| categories::migrate(&txn, &tables.categories))?;

    let projects =
        run_stage!(db, |txn| projects::migrate(&txn, &tables.projects, &categories, &users))?;

    let images = run_stage!(db, |txn| images::migrate(&txn, &tables.project_images, &projects))?;

    let clients = run_stage!(db, |txn| clients::synthesize(&txn))?;
    let features = run_stage!(db, |txn| features::synthesize(&txn))?;
    let settings = run_stage!(db, |txn| settings::synthesize(&txn))?;

    Ok(MigrationSummary {
        users: users.mapping.len(),
        categories: categories.mapping.len(),
        projects: projects.mapping.len(),
        images: images.migrated,
        images_skipped: images.skipped,
        featured_projects: images.featured_projects,
        clients: clients.created,
        features: features.created,
        settings: settings.created,
    })
}

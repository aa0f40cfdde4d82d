//! Database connection setup.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::Config;
use crate::error::MigrateResult;

/// Open the connection used for the whole run.
///
/// The pool is capped at one connection: every stage runs sequentially on
/// the same handle, and later stages read rows written by earlier ones.
pub async fn connect(config: &Config) -> MigrateResult<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.database_url());
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await?;
    Ok(db)
}

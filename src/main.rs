//! HLA Architects data migration - main entry point.
//!
//! Loads the MySQL JSON export, connects to PostgreSQL, ensures the target
//! schema, runs the staged pipeline, and prints a per-entity summary.

use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use hla_migrator_lib::config::Config;
use hla_migrator_lib::migration::Migrator;
use hla_migrator_lib::{db, pipeline, source};
use sea_orm_migration::MigratorTrait;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    // Load configuration - every connection value is required up front
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - HLA_DB_HOST, HLA_DB_PORT, HLA_DB_NAME must be set");
            error!("  - HLA_DB_USER and HLA_DB_PASSWORD must be set");
            error!("  - HLA_EXPORT_FILE optionally points at the JSON export");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  HLA Architects data migration");
    info!("========================================");

    // Load the export before touching the database
    let tables = match source::load_export(&config.export_file) {
        Ok(tables) => tables,
        Err(e) => {
            error!("Failed to load export: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Export loaded: {} users, {} categories, {} projects, {} images",
        tables.users.len(),
        tables.categories.len(),
        tables.projects.len(),
        tables.project_images.len()
    );

    // Connect to the target database
    let db = match db::connect(&config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };
    info!("Database connection established");

    // Ensure the target schema exists
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to prepare target schema: {}", e);
        std::process::exit(1);
    }
    info!("Target schema ready");

    // Run the staged pipeline
    match pipeline::run(&db, &tables).await {
        Ok(summary) => {
            info!("========================================");
            info!("  MIGRATION COMPLETED SUCCESSFULLY");
            info!("========================================");
            info!("Users:             {}", summary.users);
            info!("Categories:        {}", summary.categories);
            info!("Projects:          {}", summary.projects);
            info!(
                "Images:            {} ({} skipped)",
                summary.images, summary.images_skipped
            );
            info!("Featured projects: {}", summary.featured_projects);
            info!("Clients:           {}", summary.clients);
            info!("Features:          {}", summary.features);
            info!("Settings:          {}", summary.settings);
        }
        Err(e) => {
            error!("Migration failed: {}", e);
            std::process::exit(1);
        }
    }
}

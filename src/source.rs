//! Loader for the MySQL JSON export.
//!
//! The export is a JSON array of entries; entries with `"type": "table"`
//! carry a table name and a `data` array of rows. Rows are tolerant of
//! missing fields - the old schema was never enforced, so every field is
//! optional and absent values stay absent.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::error::{MigrateError, MigrateResult};

/// Identifier as exported from MySQL - some dumps carry ids as numbers,
/// others as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum SourceId {
    Number(i64),
    Text(String),
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceId::Number(n) => write!(f, "{}", n),
            SourceId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Row of the old `users` table.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub id: Option<SourceId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Row of the old `categories` table.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CategoryRecord {
    #[serde(default)]
    pub id: Option<SourceId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub live: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Row of the old `projects` table.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProjectRecord {
    #[serde(default)]
    pub id: Option<SourceId>,
    #[serde(default)]
    pub title: Option<String>,
    /// Category display name - the old schema stored the name, not an id.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
    /// Free-text size, e.g. "350 sqm" or "8 x 250 sqm".
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub live: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Row of the old `project_images` table.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ImageRecord {
    #[serde(default)]
    pub id: Option<SourceId>,
    #[serde(default)]
    pub project_id: Option<SourceId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub feature: Option<String>,
    #[serde(default)]
    pub score: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The four source tables consumed by the pipeline.
#[derive(Debug, Default)]
pub struct SourceTables {
    pub users: Vec<UserRecord>,
    pub categories: Vec<CategoryRecord>,
    pub projects: Vec<ProjectRecord>,
    pub project_images: Vec<ImageRecord>,
}

/// One entry of the export array. Entries that are not tables (header,
/// database markers) simply deserialize with `kind != Some("table")`.
#[derive(Debug, Deserialize)]
struct ExportEntry {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    data: Option<Vec<JsonValue>>,
}

/// Load and parse an export file.
pub fn load_export(path: &Path) -> MigrateResult<SourceTables> {
    let content = std::fs::read_to_string(path).map_err(|e| MigrateError::ExportRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_export(&content)
}

/// Parse the export document into named record collections.
pub fn parse_export(content: &str) -> MigrateResult<SourceTables> {
    let entries: Vec<ExportEntry> = serde_json::from_str(content)?;

    let mut tables = SourceTables::default();

    for entry in entries {
        if entry.kind.as_deref() != Some("table") {
            continue;
        }

        let name = entry.name.as_deref().unwrap_or("");
        let data = entry.data.unwrap_or_default();

        match name {
            "users" => tables.users = parse_rows(name, data),
            "categories" => tables.categories = parse_rows(name, data),
            "projects" => tables.projects = parse_rows(name, data),
            "project_images" => tables.project_images = parse_rows(name, data),
            _ => {}
        }
    }

    Ok(tables)
}

/// Deserialize the rows of one table, skipping anything that is not a
/// well-formed row object.
fn parse_rows<T: serde::de::DeserializeOwned>(table: &str, rows: Vec<JsonValue>) -> Vec<T> {
    let mut parsed = Vec::with_capacity(rows.len());

    for row in rows {
        match serde_json::from_value::<T>(row) {
            Ok(record) => parsed.push(record),
            Err(e) => warn!("Skipping malformed row in table {}: {}", table, e),
        }
    }

    parsed
}

//! SeaORM entity definitions for the target PostgreSQL schema.

pub mod client;
pub mod company_setting;
pub mod project;
pub mod project_category;
pub mod project_feature;
pub mod project_image;
pub mod user;

//! Project entity - the center of the target schema.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    /// Absent when the old category name had no match.
    pub category_id: Option<Uuid>,
    pub lead_architect_id: Option<Uuid>,
    pub location: String,
    pub total_area_sqm: Option<f64>,
    pub status: String,
    pub is_published: bool,
    pub show_on_website: bool,
    pub is_featured: bool,
    pub featured_image_url: Option<String>,
    pub actual_completion_date: Option<Date>,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project_category::Entity",
        from = "Column::CategoryId",
        to = "super::project_category::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::LeadArchitectId",
        to = "super::user::Column::Id"
    )]
    LeadArchitect,
    #[sea_orm(has_many = "super::project_image::Entity")]
    Images,
    #[sea_orm(has_many = "super::project_feature::Entity")]
    Features,
}

impl Related<super::project_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeadArchitect.def()
    }
}

impl Related<super::project_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<super::project_feature::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Features.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

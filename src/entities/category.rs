//! Category entity - Groups suppliers by line of business (e.g. "Tecnología").
//!
//! Suppliers reference a category through an optional foreign key, so a category
//! can be referenced by zero or more suppliers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categorias")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Display name, unique in practice
    #[sea_orm(column_name = "nombre")]
    pub name: String,
    /// Optional free-text description
    #[sea_orm(column_name = "descripcion")]
    pub description: Option<String>,
    /// When the category was created
    pub created_at: DateTimeUtc,
    /// When the category was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category groups many suppliers
    #[sea_orm(has_many = "super::supplier::Entity")]
    Suppliers,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Suppliers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Document type entity - The kinds of compliance documents a supplier can file.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Document type database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tipos_documentos")]
pub struct Model {
    /// Unique identifier for the document type
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Display name (e.g. "Constancia de situación fiscal")
    #[sea_orm(column_name = "nombre")]
    pub name: String,
    /// Optional description
    #[sea_orm(column_name = "descripcion")]
    pub description: Option<String>,
    /// Whether every supplier is expected to file this document
    #[sea_orm(column_name = "es_requerido")]
    pub required: bool,
    /// When the type was created
    pub created_at: DateTimeUtc,
    /// When the type was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between DocumentType and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One type classifies many documents
    #[sea_orm(has_many = "super::document::Entity")]
    Documents,
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

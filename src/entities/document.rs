//! Document entity - A compliance artifact filed by exactly one supplier.
//!
//! Documents carry a storage URL, an optional expiration date and a status literal
//! (`"apto"`, `"no_apto"` or `"pendiente"`).
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Document database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documentos")]
pub struct Model {
    /// Unique identifier for the document
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning supplier
    #[sea_orm(column_name = "proveedor_id")]
    pub supplier_id: Uuid,
    /// Kind of document
    #[sea_orm(column_name = "tipo_documento_id")]
    pub document_type_id: Uuid,
    /// Display name
    #[sea_orm(column_name = "nombre")]
    pub name: String,
    /// Where the file is stored
    #[sea_orm(column_name = "url_archivo")]
    pub url: String,
    /// Optional expiration date
    #[sea_orm(column_name = "fecha_vencimiento")]
    pub expires_on: Option<Date>,
    /// Status literal: `"apto"`, `"no_apto"` or `"pendiente"`
    #[sea_orm(column_name = "estatus")]
    pub status: String,
    /// When the document was filed
    pub created_at: DateTimeUtc,
    /// When the document was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Document and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each document belongs to one supplier
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
    /// Each document has one type
    #[sea_orm(
        belongs_to = "super::document_type::Entity",
        from = "Column::DocumentTypeId",
        to = "super::document_type::Column::Id"
    )]
    DocumentType,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::document_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

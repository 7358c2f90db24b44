//! Supplier entity - A vendor tracked for compliance and transaction history.
//!
//! Each supplier has identifying data (`name`, `legal_name`, `tax_id`), a compliance
//! `status` stored as the hosted literal (`"apto"` / `"no_apto"`), contact data and an
//! optional `category_id`. The identifier never changes once created.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supplier database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "proveedores")]
pub struct Model {
    /// Unique identifier for the supplier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Display (trade) name
    #[sea_orm(column_name = "nombre")]
    pub name: String,
    /// Registered legal name
    #[sea_orm(column_name = "razon_social")]
    pub legal_name: String,
    /// Tax identifier (RFC)
    #[sea_orm(column_name = "rfc")]
    pub tax_id: String,
    /// Compliance status literal: `"apto"` or `"no_apto"`
    #[sea_orm(column_name = "estatus")]
    pub status: String,
    /// Contact email
    pub email: String,
    /// Optional contact phone
    #[sea_orm(column_name = "telefono")]
    pub phone: Option<String>,
    /// Country of registration
    #[sea_orm(column_name = "pais")]
    pub country: String,
    /// Optional category, `None` when uncategorized
    #[sea_orm(column_name = "categoria_id")]
    pub category_id: Option<Uuid>,
    /// When the supplier was created
    pub created_at: DateTimeUtc,
    /// When the supplier was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Supplier and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each supplier optionally belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// One supplier has many documents
    #[sea_orm(has_many = "super::document::Entity")]
    Documents,
    /// One supplier has many transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

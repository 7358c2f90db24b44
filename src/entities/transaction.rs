//! Transaction entity - A monetary event recorded against one supplier.
//!
//! Each transaction has a `supplier_id`, a free-text description, a non-negative
//! `amount` and the `date` it took place.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transacciones")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Supplier this transaction belongs to
    #[sea_orm(column_name = "proveedor_id")]
    pub supplier_id: Uuid,
    /// Human-readable description of the transaction
    #[sea_orm(column_name = "descripcion")]
    pub description: String,
    /// Transaction amount, never negative
    #[sea_orm(column_name = "monto")]
    pub amount: f64,
    /// Date the transaction took place
    #[sea_orm(column_name = "fecha")]
    pub date: Date,
    /// When the transaction was recorded
    pub created_at: DateTimeUtc,
    /// When the transaction was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one supplier
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

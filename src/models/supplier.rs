//! Supplier-facing records: listings, lookups and the aggregated detail view.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::{DocumentStatus, SupplierStatus};
use crate::entities;

/// Supplier scalars as shown on the detail view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    /// Unique, immutable identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Legal name
    pub legal_name: String,
    /// Tax identifier
    pub tax_id: String,
    /// Compliance status
    pub status: SupplierStatus,
    /// Contact email
    pub email: String,
    /// Contact phone, `None` when not on file
    pub phone: Option<String>,
    /// Country
    pub country: String,
    /// Category, `None` when uncategorized
    pub category_id: Option<Uuid>,
    /// Denormalized category name
    pub category_name: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification, `None` when the source did not provide it
    pub updated_at: Option<DateTime<Utc>>,
}

/// A compliance document attached to a supplier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier
    pub id: Uuid,
    /// Owning supplier
    pub supplier_id: Uuid,
    /// Document type, `None` when the source did not provide it
    pub document_type_id: Option<Uuid>,
    /// Denormalized document type name
    pub document_type_name: Option<String>,
    /// Display name
    pub name: String,
    /// Storage location
    pub url: String,
    /// Expiration date, if the document expires
    pub expires_on: Option<NaiveDate>,
    /// Review status
    pub status: DocumentStatus,
    /// Filing timestamp, `None` when the source did not provide it
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification, `None` when the source did not provide it
    pub updated_at: Option<DateTime<Utc>>,
}

/// A monetary event recorded against a supplier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,
    /// Owning supplier
    pub supplier_id: Uuid,
    /// Free-text description
    pub description: String,
    /// Non-negative amount
    pub amount: f64,
    /// Date of the transaction, `None` when the source did not provide it
    pub date: Option<NaiveDate>,
    /// Recording timestamp, `None` when the source did not provide it
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification, `None` when the source did not provide it
    pub updated_at: Option<DateTime<Utc>>,
}

/// One supplier with its distinct documents and transactions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupplierDetail {
    /// The supplier itself
    pub supplier: Supplier,
    /// Documents, in order of first appearance
    pub documents: Vec<Document>,
    /// Transactions, in order of first appearance
    pub transactions: Vec<Transaction>,
}

/// One entry of the supplier listing, with document counters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierSummary {
    /// Supplier identifier
    pub id: Uuid,
    /// Display name
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    /// Legal name
    #[serde(rename = "razon_social", alias = "legal_name")]
    pub legal_name: String,
    /// Tax identifier
    #[serde(rename = "rfc", alias = "tax_id")]
    pub tax_id: String,
    /// Compliance status
    #[serde(rename = "estatus", alias = "status")]
    pub status: SupplierStatus,
    /// Contact email
    pub email: String,
    /// Contact phone
    #[serde(default, rename = "telefono", alias = "phone")]
    pub phone: Option<String>,
    /// Country
    #[serde(rename = "pais", alias = "country")]
    pub country: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Category, if any
    #[serde(default, rename = "categoria_id", alias = "category_id")]
    pub category_id: Option<Uuid>,
    /// Denormalized category name
    #[serde(default, rename = "categoria_nombre", alias = "category_name")]
    pub category_name: Option<String>,
    /// Number of documents on file
    #[serde(default, rename = "documentos_count", alias = "documents_count")]
    pub documents_count: u64,
    /// Number of documents with status fit
    #[serde(default, rename = "documentos_aptos", alias = "documents_fit")]
    pub documents_fit: u64,
    /// Number of documents with status unfit
    #[serde(default, rename = "documentos_no_aptos", alias = "documents_unfit")]
    pub documents_unfit: u64,
}

/// A supplier category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    /// Optional description
    #[serde(default, rename = "descripcion", alias = "description")]
    pub description: Option<String>,
}

impl From<entities::CategoryModel> for Category {
    fn from(model: entities::CategoryModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}

/// A kind of compliance document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentType {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    /// Optional description
    #[serde(default, rename = "descripcion", alias = "description")]
    pub description: Option<String>,
    /// Whether every supplier must file it
    #[serde(default, rename = "es_requerido", alias = "required")]
    pub required: bool,
}

impl From<entities::DocumentTypeModel> for DocumentType {
    fn from(model: entities::DocumentTypeModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            required: model.required,
        }
    }
}

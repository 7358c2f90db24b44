//! Data-access seam between the console and the supplier database.
//!
//! Every operation in [`crate::core`] receives a `SupplierBackend` explicitly; nothing
//! reads a process-wide client. Two implementations exist:
//!
//! * [`rest::RestBackend`] - the hosted REST/RPC gateway, used in production
//! * [`sql::SqlBackend`] - the same procedures run directly against the schema
//!   through SeaORM

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    errors::Result,
    models::{
        Category, DocumentType, NewCategory, NewDocument, NewSupplier, NewTransaction,
        SupplierDetailRow, SupplierFilter, SupplierSummary,
    },
};

/// REST/RPC gateway backend
pub mod rest;
/// Direct SQL backend
pub mod sql;

/// Procedures and table reads the console needs from the supplier database.
///
/// Implementations perform no validation of their own beyond what the database
/// enforces; callers validate forms first (see [`crate::core`]).
#[async_trait]
pub trait SupplierBackend: Send + Sync {
    /// One page of suppliers matching `filter`, with document counters.
    async fn list_suppliers(&self, filter: &SupplierFilter) -> Result<Vec<SupplierSummary>>;

    /// Total number of suppliers matching the status and category of `filter`,
    /// ignoring its limit and offset.
    async fn count_suppliers(&self, filter: &SupplierFilter) -> Result<u64>;

    /// Flat outer-join rows of one supplier; empty when the supplier is unknown.
    async fn supplier_detail_rows(&self, supplier_id: Uuid) -> Result<Vec<SupplierDetailRow>>;

    /// All categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Asks the database to create its default categories.
    async fn seed_default_categories(&self) -> Result<()>;

    /// Inserts categories directly into the category table.
    async fn insert_categories(&self, categories: &[NewCategory]) -> Result<()>;

    /// All document types ordered by name.
    async fn list_document_types(&self) -> Result<Vec<DocumentType>>;

    /// Creates a supplier and returns its identifier.
    async fn register_supplier(&self, supplier: &NewSupplier) -> Result<Uuid>;

    /// Files a document and returns its identifier.
    async fn register_document(&self, document: &NewDocument) -> Result<Uuid>;

    /// Records a transaction and returns its identifier.
    async fn register_transaction(&self, transaction: &NewTransaction) -> Result<Uuid>;

    /// Marks documents whose expiration date has passed as unfit.
    async fn expire_documents(&self) -> Result<()>;
}

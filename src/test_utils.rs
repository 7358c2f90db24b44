//! Shared test utilities for the supplier console.
//!
//! Provides an in-memory `SQLite` backend with the schema created, entity
//! builders with sensible defaults, and hand-built detail rows for exercising the
//! aggregation without a database.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{EntityTrait, Set};
use uuid::Uuid;

use crate::{
    backend::{SupplierBackend, sql::SqlBackend},
    entities::{self, category, document_type},
    errors::Result,
    models::{
        DocumentStatus, NewDocument, NewSupplier, NewTransaction, SupplierDetailRow,
        SupplierStatus,
    },
};

/// Name of the document type every fixture starts with.
pub const TEST_DOCUMENT_TYPE: &str = "Constancia de situación fiscal";

/// An in-memory backend plus the identifiers the builders need.
pub struct TestFixture {
    /// Backend over the in-memory database
    pub backend: SqlBackend,
    /// The document type created by [`setup_test_backend`]
    pub document_type_id: Uuid,
}

/// Creates an in-memory `SQLite` database with all tables and one document type.
/// This is the standard setup for all database tests.
pub async fn setup_test_backend() -> Result<TestFixture> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;

    let now = Utc::now();
    let document_type_id = Uuid::new_v4();
    entities::DocumentType::insert(document_type::ActiveModel {
        id: Set(document_type_id),
        name: Set(TEST_DOCUMENT_TYPE.to_string()),
        description: Set(None),
        required: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    })
    .exec_without_returning(&db)
    .await?;

    Ok(TestFixture {
        backend: SqlBackend::new(db),
        document_type_id,
    })
}

impl TestFixture {
    /// Creates a category with no description.
    pub async fn category(&self, name: &str) -> Result<Uuid> {
        let now = Utc::now();
        let id = Uuid::new_v4();
        entities::Category::insert(category::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            description: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec_without_returning(self.backend.connection())
        .await?;
        Ok(id)
    }

    /// Registers a supplier with placeholder contact data.
    pub async fn supplier(
        &self,
        name: &str,
        status: SupplierStatus,
        category_id: Option<Uuid>,
    ) -> Result<Uuid> {
        self.backend
            .register_supplier(&supplier_form(name, status, category_id))
            .await
    }

    /// Files a pending, non-expiring document.
    pub async fn document(&self, supplier_id: Uuid, name: &str) -> Result<Uuid> {
        self.document_with(supplier_id, name, DocumentStatus::Pending, None)
            .await
    }

    /// Files a document with the given status and expiration.
    pub async fn document_with(
        &self,
        supplier_id: Uuid,
        name: &str,
        status: DocumentStatus,
        expires_on: Option<NaiveDate>,
    ) -> Result<Uuid> {
        self.backend
            .register_document(&NewDocument {
                supplier_id,
                document_type_id: self.document_type_id,
                name: name.to_string(),
                url: format!("https://files.example.com/{supplier_id}/{name}.pdf"),
                expires_on,
                status,
            })
            .await
    }

    /// Records a transaction dated 2024-03-01.
    pub async fn transaction(&self, supplier_id: Uuid, amount: f64) -> Result<Uuid> {
        self.backend
            .register_transaction(&NewTransaction {
                supplier_id,
                description: format!("Compra por {amount}"),
                amount,
                date: test_date(),
            })
            .await
    }
}

/// A valid registration form.
#[must_use]
pub fn supplier_form(name: &str, status: SupplierStatus, category_id: Option<Uuid>) -> NewSupplier {
    NewSupplier {
        name: name.to_string(),
        legal_name: format!("{name} S.A. de C.V."),
        tax_id: "XAXX010101000".to_string(),
        status,
        email: format!("contacto@{}.example.com", name.to_lowercase()),
        phone: None,
        country: "México".to_string(),
        category_id,
    }
}

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default()
}

fn test_timestamp() -> DateTime<Utc> {
    DateTime::from_timestamp(1_705_312_800, 0).unwrap_or_default()
}

/// A detail row carrying only supplier columns, as returned for a supplier with
/// no documents and no transactions.
#[must_use]
pub fn detail_row(supplier_id: Uuid, name: &str) -> SupplierDetailRow {
    SupplierDetailRow {
        supplier_id,
        name: name.to_string(),
        legal_name: format!("{name} S.A. de C.V."),
        tax_id: "XAXX010101000".to_string(),
        status: SupplierStatus::Fit,
        email: "contacto@example.com".to_string(),
        phone: Some("+52 55 1234 5678".to_string()),
        country: "México".to_string(),
        created_at: test_timestamp(),
        category_id: None,
        category_name: None,
        document_id: None,
        document_name: None,
        document_url: None,
        document_expiration: None,
        document_status: None,
        document_type_id: None,
        document_type_name: None,
        transaction_id: None,
        transaction_description: None,
        transaction_amount: None,
        transaction_date: None,
    }
}

/// Fills the document columns of `row`.
#[must_use]
pub fn with_document(mut row: SupplierDetailRow, document_id: Uuid) -> SupplierDetailRow {
    row.document_id = Some(document_id);
    row.document_name = Some(format!("Documento {document_id}"));
    row.document_url = Some(format!("https://files.example.com/{document_id}.pdf"));
    row.document_status = Some(DocumentStatus::Fit);
    row
}

/// Fills the transaction columns of `row`.
#[must_use]
pub fn with_transaction(mut row: SupplierDetailRow, transaction_id: Uuid) -> SupplierDetailRow {
    row.transaction_id = Some(transaction_id);
    row.transaction_description = Some(format!("Transacción {transaction_id}"));
    row.transaction_amount = Some(100.0);
    row.transaction_date = Some(test_date());
    row
}

/// Rows of the outer join for one supplier: every document paired with every
/// transaction, or a single bare row when there are neither.
#[must_use]
pub fn cross_join_rows(
    supplier_id: Uuid,
    documents: &[Uuid],
    transactions: &[Uuid],
) -> Vec<SupplierDetailRow> {
    let base = detail_row(supplier_id, "Acme");
    let document_sides: Vec<Option<Uuid>> = if documents.is_empty() {
        vec![None]
    } else {
        documents.iter().copied().map(Some).collect()
    };
    let transaction_sides: Vec<Option<Uuid>> = if transactions.is_empty() {
        vec![None]
    } else {
        transactions.iter().copied().map(Some).collect()
    };

    let mut rows = Vec::new();
    for document in &document_sides {
        for transaction in &transaction_sides {
            let mut row = base.clone();
            if let Some(id) = document {
                row = with_document(row, *id);
            }
            if let Some(id) = transaction {
                row = with_transaction(row, *id);
            }
            rows.push(row);
        }
    }
    rows
}

/// Routes `tracing` output through the test harness; safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

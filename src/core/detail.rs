//! Supplier detail - turns the flat join rows into one nested detail record.
//!
//! The detail procedure returns one row per supplier × document × transaction
//! combination. A document paired with several transactions therefore appears on
//! several rows (and vice versa); aggregation keeps each identifier once, in order
//! of first appearance, with later duplicates overwriting earlier ones.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    backend::SupplierBackend,
    errors::Result,
    models::{Document, Supplier, SupplierDetail, SupplierDetailRow, Transaction},
};

/// Builds a `SupplierDetail` from the rows of a single supplier.
///
/// Returns `None` for an empty row set, which is how the database reports an
/// unknown supplier. Supplier fields are read from the first row. All rows are
/// expected to share one supplier identifier.
#[must_use]
pub fn aggregate_supplier_detail(rows: &[SupplierDetailRow]) -> Option<SupplierDetail> {
    let first = rows.first()?;

    let mut documents = KeyedRows::default();
    let mut transactions = KeyedRows::default();

    for row in rows {
        if let Some(document) = document_from_row(row) {
            documents.upsert(document.id, document);
        }
        if let Some(transaction) = transaction_from_row(row) {
            transactions.upsert(transaction.id, transaction);
        }
    }

    Some(SupplierDetail {
        supplier: supplier_from_row(first),
        documents: documents.into_values(),
        transactions: transactions.into_values(),
    })
}

/// Fetches the detail rows of one supplier and aggregates them.
///
/// # Returns
/// * `Ok(Some(detail))` - the supplier exists
/// * `Ok(None)` - no supplier with this identifier
/// * `Err(_)` - the database call failed
#[instrument(skip(backend))]
pub async fn get_supplier_detail<B>(
    backend: &B,
    supplier_id: Uuid,
) -> Result<Option<SupplierDetail>>
where
    B: SupplierBackend + ?Sized,
{
    let rows = backend.supplier_detail_rows(supplier_id).await?;
    debug!(rows = rows.len(), "Fetched supplier detail rows");

    let detail = aggregate_supplier_detail(&rows);
    match &detail {
        Some(d) => debug!(
            documents = d.documents.len(),
            transactions = d.transactions.len(),
            "Aggregated supplier detail"
        ),
        None => info!("Supplier not found"),
    }
    Ok(detail)
}

/// Insertion-ordered map: values keep the position of their key's first insert.
struct KeyedRows<T> {
    values: Vec<T>,
    positions: HashMap<Uuid, usize>,
}

impl<T> Default for KeyedRows<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<T> KeyedRows<T> {
    fn upsert(&mut self, key: Uuid, value: T) {
        match self.positions.entry(key) {
            Entry::Occupied(slot) => self.values[*slot.get()] = value,
            Entry::Vacant(slot) => {
                slot.insert(self.values.len());
                self.values.push(value);
            }
        }
    }

    fn into_values(self) -> Vec<T> {
        self.values
    }
}

fn supplier_from_row(row: &SupplierDetailRow) -> Supplier {
    Supplier {
        id: row.supplier_id,
        name: row.name.clone(),
        legal_name: row.legal_name.clone(),
        tax_id: row.tax_id.clone(),
        status: row.status,
        email: row.email.clone(),
        phone: row.phone.clone().filter(|p| !p.trim().is_empty()),
        country: row.country.clone(),
        category_id: row.category_id,
        category_name: row.category_name.clone(),
        created_at: row.created_at,
        // not part of the join
        updated_at: None,
    }
}

fn document_from_row(row: &SupplierDetailRow) -> Option<Document> {
    let id = row.document_id?;
    Some(Document {
        id,
        supplier_id: row.supplier_id,
        document_type_id: row.document_type_id,
        document_type_name: row.document_type_name.clone(),
        name: row.document_name.clone().unwrap_or_default(),
        url: row.document_url.clone().unwrap_or_default(),
        expires_on: row.document_expiration,
        status: row.document_status.unwrap_or_default(),
        created_at: None,
        updated_at: None,
    })
}

fn transaction_from_row(row: &SupplierDetailRow) -> Option<Transaction> {
    let id = row.transaction_id?;
    Some(Transaction {
        id,
        supplier_id: row.supplier_id,
        description: row.transaction_description.clone().unwrap_or_default(),
        amount: row.transaction_amount.unwrap_or(0.0),
        date: row.transaction_date,
        created_at: None,
        updated_at: None,
    })
}

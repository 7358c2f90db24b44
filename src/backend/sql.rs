//! Direct SQL backend - runs the supplier procedures through SeaORM.
//!
//! Each method reproduces the contract of the matching hosted procedure so that the
//! console behaves the same against a local database (SQLite in tests) as against
//! the hosted gateway. In particular `supplier_detail_rows` emits the same outer-join
//! row stream: supplier × documents × transactions, or a single row with null
//! document and transaction columns.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set, sea_query::Expr,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::SupplierBackend;
use crate::{
    config::catalog::default_categories,
    entities::{self, category, document, document_type, supplier, transaction},
    errors::{Error, Result},
    models::{
        Category, DocumentStatus, DocumentType, NewCategory, NewDocument, NewSupplier,
        NewTransaction, SupplierDetailRow, SupplierFilter, SupplierStatus, SupplierSummary,
    },
};

type DocumentWithType = (document::Model, Option<document_type::Model>);

/// Supplier backend over a SeaORM connection.
pub struct SqlBackend {
    db: DatabaseConnection,
    default_categories: Vec<NewCategory>,
}

impl SqlBackend {
    /// Wraps a connection whose tables already exist
    /// (see [`crate::config::database::create_tables`]).
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            default_categories: default_categories(),
        }
    }

    /// Replaces the categories created by [`SupplierBackend::seed_default_categories`].
    #[must_use]
    pub fn with_default_categories(mut self, categories: Vec<NewCategory>) -> Self {
        self.default_categories = categories;
        self
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    fn filtered_suppliers(filter: &SupplierFilter) -> Select<entities::Supplier> {
        let mut query = entities::Supplier::find();
        if let Some(status) = filter.status {
            query = query.filter(supplier::Column::Status.eq(status.as_str()));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(supplier::Column::CategoryId.eq(category_id));
        }
        query
    }

    async fn ensure_exists<E>(&self, field: &'static str, id: Uuid) -> Result<()>
    where
        E: EntityTrait,
        <E::PrimaryKey as sea_orm::PrimaryKeyTrait>::ValueType: From<Uuid>,
    {
        E::find_by_id(id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or_else(|| Error::Validation {
                field,
                message: format!("no record with id {id}"),
            })
    }
}

#[derive(Default)]
struct DocumentCounters {
    total: u64,
    fit: u64,
    unfit: u64,
}

fn supplier_status(model: &supplier::Model) -> Result<SupplierStatus> {
    model.status.parse().map_err(|e: Error| Error::Decode {
        context: format!("proveedores.estatus of {}", model.id),
        message: e.to_string(),
    })
}

fn document_status(model: &document::Model) -> Result<DocumentStatus> {
    model.status.parse().map_err(|e: Error| Error::Decode {
        context: format!("documentos.estatus of {}", model.id),
        message: e.to_string(),
    })
}

fn summary_from_model(
    model: supplier::Model,
    category: Option<category::Model>,
    counters: Option<&DocumentCounters>,
) -> Result<SupplierSummary> {
    let status = supplier_status(&model)?;
    Ok(SupplierSummary {
        id: model.id,
        name: model.name,
        legal_name: model.legal_name,
        tax_id: model.tax_id,
        status,
        email: model.email,
        phone: model.phone,
        country: model.country,
        created_at: model.created_at,
        category_id: model.category_id,
        category_name: category.map(|c| c.name),
        documents_count: counters.map_or(0, |c| c.total),
        documents_fit: counters.map_or(0, |c| c.fit),
        documents_unfit: counters.map_or(0, |c| c.unfit),
    })
}

/// Expands one supplier into outer-join rows.
fn join_rows(
    supplier: &supplier::Model,
    category: Option<&category::Model>,
    documents: &[DocumentWithType],
    transactions: &[transaction::Model],
) -> Result<Vec<SupplierDetailRow>> {
    let base = SupplierDetailRow {
        supplier_id: supplier.id,
        name: supplier.name.clone(),
        legal_name: supplier.legal_name.clone(),
        tax_id: supplier.tax_id.clone(),
        status: supplier_status(supplier)?,
        email: supplier.email.clone(),
        phone: supplier.phone.clone(),
        country: supplier.country.clone(),
        created_at: supplier.created_at,
        category_id: supplier.category_id,
        category_name: category.map(|c| c.name.clone()),
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
    };

    let document_sides: Vec<Option<&DocumentWithType>> = if documents.is_empty() {
        vec![None]
    } else {
        documents.iter().map(Some).collect()
    };
    let transaction_sides: Vec<Option<&transaction::Model>> = if transactions.is_empty() {
        vec![None]
    } else {
        transactions.iter().map(Some).collect()
    };

    let mut rows = Vec::with_capacity(document_sides.len() * transaction_sides.len());
    for document_side in document_sides.iter().copied() {
        for transaction_side in transaction_sides.iter().copied() {
            let mut row = base.clone();
            if let Some((doc, kind)) = document_side {
                row.document_id = Some(doc.id);
                row.document_name = Some(doc.name.clone());
                row.document_url = Some(doc.url.clone());
                row.document_expiration = doc.expires_on;
                row.document_status = Some(document_status(doc)?);
                row.document_type_id = Some(doc.document_type_id);
                row.document_type_name = kind.as_ref().map(|k| k.name.clone());
            }
            if let Some(txn) = transaction_side {
                row.transaction_id = Some(txn.id);
                row.transaction_description = Some(txn.description.clone());
                row.transaction_amount = Some(txn.amount);
                row.transaction_date = Some(txn.date);
            }
            rows.push(row);
        }
    }
    Ok(rows)
}

#[async_trait]
impl SupplierBackend for SqlBackend {
    #[instrument(skip(self))]
    async fn list_suppliers(&self, filter: &SupplierFilter) -> Result<Vec<SupplierSummary>> {
        let suppliers = Self::filtered_suppliers(filter)
            .order_by_asc(supplier::Column::Name)
            .limit(filter.limit)
            .offset(filter.offset)
            .find_also_related(entities::Category)
            .all(&self.db)
            .await?;

        let ids: Vec<Uuid> = suppliers.iter().map(|(s, _)| s.id).collect();
        let mut counters: HashMap<Uuid, DocumentCounters> = HashMap::new();
        if !ids.is_empty() {
            let documents = entities::Document::find()
                .filter(document::Column::SupplierId.is_in(ids))
                .all(&self.db)
                .await?;
            for doc in &documents {
                let counter = counters.entry(doc.supplier_id).or_default();
                counter.total += 1;
                match document_status(doc)? {
                    DocumentStatus::Fit => counter.fit += 1,
                    DocumentStatus::Unfit => counter.unfit += 1,
                    DocumentStatus::Pending => {}
                }
            }
        }

        suppliers
            .into_iter()
            .map(|(model, category)| {
                let counter = counters.get(&model.id);
                summary_from_model(model, category, counter)
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn count_suppliers(&self, filter: &SupplierFilter) -> Result<u64> {
        Self::filtered_suppliers(filter)
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    async fn supplier_detail_rows(&self, supplier_id: Uuid) -> Result<Vec<SupplierDetailRow>> {
        let Some((supplier, category)) = entities::Supplier::find_by_id(supplier_id)
            .find_also_related(entities::Category)
            .one(&self.db)
            .await?
        else {
            return Ok(Vec::new());
        };

        let documents = entities::Document::find()
            .filter(document::Column::SupplierId.eq(supplier_id))
            .order_by_asc(document::Column::CreatedAt)
            .find_also_related(entities::DocumentType)
            .all(&self.db)
            .await?;

        let transactions = entities::Transaction::find()
            .filter(transaction::Column::SupplierId.eq(supplier_id))
            .order_by_desc(transaction::Column::Date)
            .all(&self.db)
            .await?;

        join_rows(&supplier, category.as_ref(), &documents, &transactions)
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let categories = entities::Category::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await?;
        Ok(categories.into_iter().map(Category::from).collect())
    }

    async fn seed_default_categories(&self) -> Result<()> {
        let existing = entities::Category::find().count(&self.db).await?;
        if existing > 0 {
            debug!(existing, "Categories already present, nothing to seed");
            return Ok(());
        }
        self.insert_categories(&self.default_categories).await
    }

    async fn insert_categories(&self, categories: &[NewCategory]) -> Result<()> {
        if categories.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let models = categories.iter().map(|c| category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(c.name.trim().to_string()),
            description: Set(c.description.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        });

        let inserted = entities::Category::insert_many(models)
            .exec_without_returning(&self.db)
            .await?;
        info!(inserted, "Inserted categories");
        Ok(())
    }

    async fn list_document_types(&self) -> Result<Vec<DocumentType>> {
        let types = entities::DocumentType::find()
            .order_by_asc(document_type::Column::Name)
            .all(&self.db)
            .await?;
        Ok(types.into_iter().map(DocumentType::from).collect())
    }

    #[instrument(skip(self, new_supplier), fields(name = %new_supplier.name))]
    async fn register_supplier(&self, new_supplier: &NewSupplier) -> Result<Uuid> {
        if let Some(category_id) = new_supplier.category_id {
            self.ensure_exists::<entities::Category>("category_id", category_id)
                .await?;
        }

        let now = Utc::now();
        let id = Uuid::new_v4();
        let model = supplier::ActiveModel {
            id: Set(id),
            name: Set(new_supplier.name.trim().to_string()),
            legal_name: Set(new_supplier.legal_name.trim().to_string()),
            tax_id: Set(new_supplier.tax_id.trim().to_string()),
            status: Set(new_supplier.status.as_str().to_string()),
            email: Set(new_supplier.email.trim().to_string()),
            phone: Set(new_supplier.phone().map(str::to_string)),
            country: Set(new_supplier.country.trim().to_string()),
            category_id: Set(new_supplier.category_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        entities::Supplier::insert(model)
            .exec_without_returning(&self.db)
            .await?;
        Ok(id)
    }

    #[instrument(skip(self, new_document), fields(supplier_id = %new_document.supplier_id))]
    async fn register_document(&self, new_document: &NewDocument) -> Result<Uuid> {
        self.ensure_exists::<entities::Supplier>("supplier_id", new_document.supplier_id)
            .await?;
        self.ensure_exists::<entities::DocumentType>(
            "document_type_id",
            new_document.document_type_id,
        )
        .await?;

        let now = Utc::now();
        let id = Uuid::new_v4();
        let model = document::ActiveModel {
            id: Set(id),
            supplier_id: Set(new_document.supplier_id),
            document_type_id: Set(new_document.document_type_id),
            name: Set(new_document.name.trim().to_string()),
            url: Set(new_document.url.trim().to_string()),
            expires_on: Set(new_document.expires_on),
            status: Set(new_document.status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        entities::Document::insert(model)
            .exec_without_returning(&self.db)
            .await?;
        Ok(id)
    }

    #[instrument(skip(self, new_transaction), fields(supplier_id = %new_transaction.supplier_id))]
    async fn register_transaction(&self, new_transaction: &NewTransaction) -> Result<Uuid> {
        self.ensure_exists::<entities::Supplier>("supplier_id", new_transaction.supplier_id)
            .await?;

        let now = Utc::now();
        let id = Uuid::new_v4();
        let model = transaction::ActiveModel {
            id: Set(id),
            supplier_id: Set(new_transaction.supplier_id),
            description: Set(new_transaction.description.trim().to_string()),
            amount: Set(new_transaction.amount),
            date: Set(new_transaction.date),
            created_at: Set(now),
            updated_at: Set(now),
        };

        entities::Transaction::insert(model)
            .exec_without_returning(&self.db)
            .await?;
        Ok(id)
    }

    async fn expire_documents(&self) -> Result<()> {
        let now = Utc::now();
        let result = entities::Document::update_many()
            .col_expr(
                document::Column::Status,
                Expr::value(DocumentStatus::Unfit.as_str()),
            )
            .col_expr(document::Column::UpdatedAt, Expr::value(now))
            .filter(document::Column::ExpiresOn.lt(now.date_naive()))
            .filter(document::Column::Status.ne(DocumentStatus::Unfit.as_str()))
            .exec(&self.db)
            .await?;
        info!(expired = result.rows_affected, "Marked expired documents as unfit");
        Ok(())
    }
}

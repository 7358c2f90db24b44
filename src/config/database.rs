//! Database configuration for the direct SQL backend.
//!
//! This module handles the `sea-orm` connection and table creation. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL.

use crate::entities::{Category, Document, DocumentType, Supplier, Transaction};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Database used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Gets the database URL from the environment or returns the in-memory default.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Connects to the database named by `DATABASE_URL`.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(&get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates the supplier schema from the entity definitions.
///
/// Tables are created parents first: categories and document types, then
/// suppliers, then documents and transactions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let category_table = schema.create_table_from_entity(Category);
    let document_type_table = schema.create_table_from_entity(DocumentType);
    let supplier_table = schema.create_table_from_entity(Supplier);
    let document_table = schema.create_table_from_entity(Document);
    let transaction_table = schema.create_table_from_entity(Transaction);

    db.execute(builder.build(&category_table)).await?;
    db.execute(builder.build(&document_type_table)).await?;
    db.execute(builder.build(&supplier_table)).await?;
    db.execute(builder.build(&document_table)).await?;
    db.execute(builder.build(&transaction_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        CategoryModel, DocumentModel, DocumentTypeModel, SupplierModel, TransactionModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let _: Vec<CategoryModel> = Category::find().limit(1).all(&db).await?;
        let _: Vec<DocumentTypeModel> = DocumentType::find().limit(1).all(&db).await?;
        let _: Vec<SupplierModel> = Supplier::find().limit(1).all(&db).await?;
        let _: Vec<DocumentModel> = Document::find().limit(1).all(&db).await?;
        let _: Vec<TransactionModel> = Transaction::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_connection_default() -> Result<()> {
        if std::env::var("DATABASE_URL").is_ok() {
            return Ok(());
        }
        assert_eq!(get_database_url(), DEFAULT_DATABASE_URL);
        let db = create_connection().await?;
        create_tables(&db).await?;
        let _: Vec<CategoryModel> = Category::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_twice_fails() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        assert!(create_tables(&db).await.is_err());
        Ok(())
    }
}

//! Entity module - SeaORM entity definitions mirroring the hosted supplier schema.
//! Table and column names are the hosted database's own (Spanish) identifiers;
//! the Rust field names are English. Each entity has a Model struct for data and
//! an Entity struct for operations.

pub mod category;
pub mod document;
pub mod document_type;
pub mod supplier;
pub mod transaction;

// Re-export specific types to avoid conflicts
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use document::{Column as DocumentColumn, Entity as Document, Model as DocumentModel};
pub use document_type::{
    Column as DocumentTypeColumn, Entity as DocumentType, Model as DocumentTypeModel,
};
pub use supplier::{Column as SupplierColumn, Entity as Supplier, Model as SupplierModel};
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, Model as TransactionModel,
};

//! View models and wire types exchanged with the hosted supplier database.
//!
//! Types that are decoded straight from the hosted gateway (`SupplierDetailRow`,
//! `SupplierSummary`, `Category`, `DocumentType`) use the gateway's column names on
//! the wire and accept the English names as aliases. Types assembled locally
//! (`Supplier`, `Document`, `Transaction`, `SupplierDetail`) use English names.

mod forms;
mod row;
mod status;
mod supplier;

pub use forms::{
    DEFAULT_PAGE_SIZE, NewCategory, NewDocument, NewSupplier, NewTransaction, SupplierFilter, SupplierPage,
    parse_category_field,
};
pub use row::SupplierDetailRow;
pub use status::{DocumentStatus, SupplierStatus};
pub use supplier::{
    Category, Document, DocumentType, Supplier, SupplierDetail, SupplierSummary, Transaction,
};

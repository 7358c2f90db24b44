//! Document business logic - document types, filing and expiration.

use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    backend::SupplierBackend,
    errors::Result,
    models::{DocumentType, NewDocument},
};

/// Lists the document types a supplier can file, ordered by name.
pub async fn list_document_types<B>(backend: &B) -> Result<Vec<DocumentType>>
where
    B: SupplierBackend + ?Sized,
{
    backend.list_document_types().await
}

/// Validates and files a document for a supplier, returning its identifier.
///
/// # Errors
/// Returns `Error::Validation` without calling the backend when the name or URL
/// is blank.
#[instrument(skip(backend, document), fields(supplier_id = %document.supplier_id))]
pub async fn register_document<B>(backend: &B, document: &NewDocument) -> Result<Uuid>
where
    B: SupplierBackend + ?Sized,
{
    document.validate()?;
    let id = backend.register_document(document).await?;
    info!(%id, "Registered document");
    Ok(id)
}

/// Marks every document whose expiration date has passed as unfit.
pub async fn refresh_expired_documents<B>(backend: &B) -> Result<()>
where
    B: SupplierBackend + ?Sized,
{
    backend.expire_documents().await
}

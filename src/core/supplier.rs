//! Supplier listing and registration.
//!
//! The listing page needs both the current page and the total number of matching
//! suppliers; the two calls are independent and are issued concurrently.

use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    backend::SupplierBackend,
    errors::Result,
    models::{NewSupplier, SupplierFilter, SupplierPage},
};

/// Fetches one page of suppliers and the total matching `filter`.
///
/// Fails as a whole when either call fails; a partial page is never returned.
#[instrument(skip(backend))]
pub async fn fetch_suppliers<B>(backend: &B, filter: &SupplierFilter) -> Result<SupplierPage>
where
    B: SupplierBackend + ?Sized,
{
    let (suppliers, total) = tokio::try_join!(
        backend.list_suppliers(filter),
        backend.count_suppliers(filter)
    )?;
    info!(shown = suppliers.len(), total, "Fetched supplier page");
    Ok(SupplierPage { suppliers, total })
}

/// Validates and registers a new supplier, returning its identifier.
///
/// # Errors
/// Returns `Error::Validation` without calling the backend when the form is
/// incomplete.
#[instrument(skip(backend, supplier), fields(name = %supplier.name))]
pub async fn register_supplier<B>(backend: &B, supplier: &NewSupplier) -> Result<Uuid>
where
    B: SupplierBackend + ?Sized,
{
    supplier.validate()?;
    let id = backend.register_supplier(supplier).await?;
    info!(%id, "Registered supplier");
    Ok(id)
}

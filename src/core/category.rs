//! Category loading with first-run seeding.
//!
//! An empty category table means the console has never been set up. The hosted
//! seeding procedure is tried first; if it is missing or fails, the configured
//! defaults are inserted directly. Either way the table is then read exactly once
//! more, and whatever it holds is returned.

use tracing::{error, info, instrument, warn};

use crate::{
    backend::SupplierBackend,
    errors::Result,
    models::{Category, NewCategory},
};

/// Lists categories by name, seeding `defaults` when there are none.
///
/// Failures of the seeding steps are logged, not returned: the result may still
/// be empty.
///
/// # Errors
/// Returns the backend error when reading the categories fails.
#[instrument(skip(backend, defaults))]
pub async fn load_categories<B>(backend: &B, defaults: &[NewCategory]) -> Result<Vec<Category>>
where
    B: SupplierBackend + ?Sized,
{
    let categories = backend.list_categories().await?;
    if !categories.is_empty() {
        return Ok(categories);
    }

    info!("No categories found, seeding defaults");
    if let Err(e) = backend.seed_default_categories().await {
        warn!(error = %e, "Seeding procedure failed, inserting defaults directly");
        if let Err(e) = backend.insert_categories(defaults).await {
            error!(error = %e, "Failed to insert default categories");
        }
    }

    let categories = backend.list_categories().await?;
    info!(count = categories.len(), "Loaded categories after seeding");
    Ok(categories)
}

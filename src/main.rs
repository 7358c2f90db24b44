//! Operator probe for the supplier console.
//!
//! Without arguments: loads the categories (seeding them on first run) and prints
//! the first page of suppliers. With a supplier id: prints that supplier's
//! aggregated detail as JSON.

use dotenvy::dotenv;
use proveedores::{
    backend::rest::RestBackend,
    config::{backend::BackendConfig, catalog::load_catalog_or_default},
    core::{category::load_categories, detail::get_supplier_detail, supplier::fetch_suppliers},
    errors::{Error, Result},
    models::SupplierFilter,
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env files; variables may also be set externally
    dotenv().ok();
    dotenvy::from_filename(".env.local").ok();

    // 3. Load configuration
    let config = BackendConfig::from_env()
        .inspect_err(|e| error!("Failed to load backend configuration: {}", e))?;
    info!(url = %config.url, "Loaded backend configuration");
    let defaults = load_catalog_or_default("config.toml")
        .inspect_err(|e| error!("Failed to load category catalog: {}", e))?;

    let backend = RestBackend::new(&config)?;

    // 4. Supplier detail when an id is given
    if let Some(arg) = env::args().nth(1) {
        let supplier_id = Uuid::parse_str(arg.trim()).map_err(|e| Error::Validation {
            field: "supplier_id",
            message: e.to_string(),
        })?;
        let detail = get_supplier_detail(&backend, supplier_id)
            .await
            .inspect_err(|e| error!("Failed to load supplier detail: {}", e))?;
        match detail {
            Some(detail) => println!("{}", serde_json::to_string_pretty(&detail)?),
            None => println!("Supplier {supplier_id} not found"),
        }
        return Ok(());
    }

    // 5. Otherwise the listing screen
    let categories = load_categories(&backend, &defaults)
        .await
        .inspect_err(|e| error!("Failed to load categories: {}", e))?;
    info!(count = categories.len(), "Categories available");

    let page = fetch_suppliers(&backend, &SupplierFilter::default())
        .await
        .inspect_err(|e| error!("Failed to load suppliers: {}", e))?;
    for supplier in &page.suppliers {
        println!(
            "{}  {:<30} {:<8} docs {}/{} fit, {} unfit  {}",
            supplier.id,
            supplier.name,
            supplier.status.as_str(),
            supplier.documents_fit,
            supplier.documents_count,
            supplier.documents_unfit,
            supplier.category_name.as_deref().unwrap_or("-"),
        );
    }
    println!("{} of {} suppliers", page.suppliers.len(), page.total);

    Ok(())
}

//! Default category catalog loading from config.toml
//!
//! Categories listed under `[[categories]]` are inserted when the hosted seeding
//! procedure is unavailable and the category table is empty. Without a
//! `config.toml` the built-in catalog is used.

use crate::errors::{Error, Result};
use crate::models::NewCategory;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Configuration structure representing the catalog part of config.toml
#[derive(Debug, Default, Deserialize)]
pub struct CatalogConfig {
    /// Categories to seed, in insertion order
    #[serde(default)]
    pub categories: Vec<NewCategory>,
}

/// Built-in default categories.
#[must_use]
pub fn default_categories() -> Vec<NewCategory> {
    vec![
        NewCategory::new("Tecnología", "Proveedores de equipos y servicios tecnológicos"),
        NewCategory::new("Alimentos", "Proveedores de alimentos y bebidas"),
        NewCategory::new("Servicios", "Proveedores de servicios generales"),
        NewCategory::new("Construcción", "Proveedores de materiales y servicios de construcción"),
    ]
}

/// Loads the category catalog from a TOML file
///
/// # Errors
/// Returns `Error::Config` if the file cannot be read, the TOML syntax is
/// invalid, or a category has a blank name.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    let catalog: CatalogConfig = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    for category in &catalog.categories {
        category.validate().map_err(|e| Error::Config {
            message: format!("Invalid category in config.toml: {e}"),
        })?;
    }

    Ok(catalog)
}

/// Loads the catalog at `path`, or the built-in defaults when the file does not
/// exist or lists no categories.
///
/// # Errors
/// Returns `Error::Config` if the file exists but cannot be parsed.
pub fn load_catalog_or_default<P: AsRef<Path>>(path: P) -> Result<Vec<NewCategory>> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(?path, "No catalog file, using built-in categories");
        return Ok(default_categories());
    }

    let catalog = load_catalog(path)?;
    if catalog.categories.is_empty() {
        return Ok(default_categories());
    }
    Ok(catalog.categories)
}

//! Inputs accepted by the console: listing filters and creation forms.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::{DocumentStatus, SupplierStatus};
use super::supplier::SupplierSummary;
use crate::errors::{Error, Result};

/// Default page size of the supplier listing.
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Filter and pagination for the supplier listing. Limit and offset are passed
/// through to the database unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SupplierFilter {
    /// Maximum number of suppliers returned
    pub limit: u64,
    /// Number of suppliers skipped
    pub offset: u64,
    /// Only suppliers with this status
    pub status: Option<SupplierStatus>,
    /// Only suppliers in this category
    pub category_id: Option<Uuid>,
}

impl Default for SupplierFilter {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
            status: None,
            category_id: None,
        }
    }
}

impl SupplierFilter {
    /// Restricts the listing to one status.
    #[must_use]
    pub const fn with_status(mut self, status: SupplierStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the listing to one category.
    #[must_use]
    pub const fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Selects a page.
    #[must_use]
    pub const fn page(mut self, limit: u64, offset: u64) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }
}

/// One page of the supplier listing plus the total matching the filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SupplierPage {
    /// Suppliers on this page
    pub suppliers: Vec<SupplierSummary>,
    /// Number of suppliers matching the filter across all pages
    pub total: u64,
}

/// Parses the category field of a form: blank text means "uncategorized".
///
/// # Errors
/// Returns `Error::Validation` when the text is neither blank nor a UUID.
pub fn parse_category_field(value: &str) -> Result<Option<Uuid>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Uuid::parse_str(trimmed)
        .map(Some)
        .map_err(|e| Error::Validation {
            field: "category_id",
            message: e.to_string(),
        })
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation {
            field,
            message: "cannot be empty".to_string(),
        });
    }
    Ok(())
}

/// Supplier registration form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewSupplier {
    /// Display name
    pub name: String,
    /// Legal name
    pub legal_name: String,
    /// Tax identifier
    pub tax_id: String,
    /// Initial compliance status
    pub status: SupplierStatus,
    /// Contact email
    pub email: String,
    /// Optional phone
    pub phone: Option<String>,
    /// Country
    pub country: String,
    /// Optional category
    pub category_id: Option<Uuid>,
}

impl NewSupplier {
    /// Checks mandatory fields.
    ///
    /// # Errors
    /// Returns `Error::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("legal_name", &self.legal_name)?;
        require("tax_id", &self.tax_id)?;
        require("email", &self.email)?;
        require("country", &self.country)?;
        if !self.email.contains('@') {
            return Err(Error::Validation {
                field: "email",
                message: "must contain '@'".to_string(),
            });
        }
        Ok(())
    }

    /// Phone with blank values folded into `None`.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }
}

/// Document filing form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDocument {
    /// Owning supplier
    pub supplier_id: Uuid,
    /// Kind of document
    pub document_type_id: Uuid,
    /// Display name
    pub name: String,
    /// Storage location of the uploaded file
    pub url: String,
    /// Optional expiration date
    pub expires_on: Option<NaiveDate>,
    /// Initial review status
    pub status: DocumentStatus,
}

impl NewDocument {
    /// Checks mandatory fields.
    ///
    /// # Errors
    /// Returns `Error::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("url", &self.url)
    }
}

/// Transaction recording form.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTransaction {
    /// Owning supplier
    pub supplier_id: Uuid,
    /// Free-text description
    pub description: String,
    /// Amount, must be finite and non-negative
    pub amount: f64,
    /// Date of the transaction
    pub date: NaiveDate,
}

impl NewTransaction {
    /// Checks the description and amount.
    ///
    /// # Errors
    /// Returns `Error::Validation` for a blank description and
    /// `Error::InvalidAmount` for a negative or non-finite amount.
    pub fn validate(&self) -> Result<()> {
        require("description", &self.description)?;
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidAmount {
                amount: self.amount,
            });
        }
        Ok(())
    }
}

/// Category creation input, also the shape of `[[categories]]` in `config.toml`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    /// Display name
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    /// Optional description
    #[serde(default, rename = "descripcion", alias = "description")]
    pub description: Option<String>,
}

impl NewCategory {
    /// Convenience constructor.
    #[must_use]
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: Some(description.to_string()),
        }
    }

    /// Checks the name.
    ///
    /// # Errors
    /// Returns `Error::Validation` for a blank name.
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)
    }
}

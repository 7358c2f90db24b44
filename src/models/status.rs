//! Compliance status values.
//!
//! The hosted schema stores statuses as Spanish literals; the English names are
//! accepted on input everywhere, case-insensitively when parsed from text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::Error;

/// Compliance status of a supplier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupplierStatus {
    /// Supplier may be contracted
    #[serde(rename = "apto", alias = "fit")]
    Fit,
    /// Supplier is blocked
    #[serde(rename = "no_apto", alias = "unfit")]
    Unfit,
}

impl SupplierStatus {
    /// Literal stored by the hosted database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fit => "apto",
            Self::Unfit => "no_apto",
        }
    }
}

impl fmt::Display for SupplierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupplierStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apto" | "fit" => Ok(Self::Fit),
            "no_apto" | "unfit" => Ok(Self::Unfit),
            other => Err(Error::Validation {
                field: "status",
                message: format!("unknown supplier status `{other}`"),
            }),
        }
    }
}

/// Status of a compliance document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Document was reviewed and accepted
    #[serde(rename = "apto", alias = "fit")]
    Fit,
    /// Document was rejected or has expired
    #[serde(rename = "no_apto", alias = "unfit")]
    Unfit,
    /// Document awaits review
    #[default]
    #[serde(rename = "pendiente", alias = "pending")]
    Pending,
}

impl DocumentStatus {
    /// Literal stored by the hosted database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fit => "apto",
            Self::Unfit => "no_apto",
            Self::Pending => "pendiente",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apto" | "fit" => Ok(Self::Fit),
            "no_apto" | "unfit" => Ok(Self::Unfit),
            "pendiente" | "pending" => Ok(Self::Pending),
            other => Err(Error::Validation {
                field: "status",
                message: format!("unknown document status `{other}`"),
            }),
        }
    }
}

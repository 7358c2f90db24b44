//! The flat row returned by the supplier detail procedure.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::{DocumentStatus, SupplierStatus};

/// One row of the outer join of a supplier with at most one document and at most
/// one transaction.
///
/// Supplier columns repeat identically on every row of a result set. Document and
/// transaction columns are `None` when the row carries no match for that side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupplierDetailRow {
    /// Supplier identifier
    #[serde(rename = "proveedor_id", alias = "supplier_id")]
    pub supplier_id: Uuid,
    /// Supplier display name
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    /// Supplier legal name
    #[serde(rename = "razon_social", alias = "legal_name")]
    pub legal_name: String,
    /// Supplier tax identifier
    #[serde(rename = "rfc", alias = "tax_id")]
    pub tax_id: String,
    /// Supplier compliance status
    #[serde(rename = "estatus", alias = "status")]
    pub status: SupplierStatus,
    /// Supplier contact email
    pub email: String,
    /// Supplier phone, possibly empty
    #[serde(default, rename = "telefono", alias = "phone")]
    pub phone: Option<String>,
    /// Supplier country
    #[serde(rename = "pais", alias = "country")]
    pub country: String,
    /// When the supplier was created
    pub created_at: DateTime<Utc>,
    /// Supplier category, if any
    #[serde(default, rename = "categoria_id", alias = "category_id")]
    pub category_id: Option<Uuid>,
    /// Denormalized category name
    #[serde(default, rename = "categoria_nombre", alias = "category_name")]
    pub category_name: Option<String>,

    /// Joined document identifier
    #[serde(default, rename = "documento_id", alias = "document_id")]
    pub document_id: Option<Uuid>,
    /// Joined document name
    #[serde(default, rename = "documento_nombre", alias = "document_name")]
    pub document_name: Option<String>,
    /// Joined document storage URL
    #[serde(default, rename = "documento_url", alias = "document_url")]
    pub document_url: Option<String>,
    /// Joined document expiration date
    #[serde(
        default,
        rename = "documento_fecha_vencimiento",
        alias = "document_expiration"
    )]
    pub document_expiration: Option<NaiveDate>,
    /// Joined document status
    #[serde(default, rename = "documento_estatus", alias = "document_status")]
    pub document_status: Option<DocumentStatus>,
    /// Joined document type identifier
    #[serde(default, rename = "documento_tipo_id", alias = "document_type_id")]
    pub document_type_id: Option<Uuid>,
    /// Joined document type name
    #[serde(default, rename = "documento_tipo_nombre", alias = "document_type_name")]
    pub document_type_name: Option<String>,

    /// Joined transaction identifier
    #[serde(default, rename = "transaccion_id", alias = "transaction_id")]
    pub transaction_id: Option<Uuid>,
    /// Joined transaction description
    #[serde(
        default,
        rename = "transaccion_descripcion",
        alias = "transaction_description"
    )]
    pub transaction_description: Option<String>,
    /// Joined transaction amount
    #[serde(default, rename = "transaccion_monto", alias = "transaction_amount")]
    pub transaction_amount: Option<f64>,
    /// Joined transaction date
    #[serde(default, rename = "transaccion_fecha", alias = "transaction_date")]
    pub transaction_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_decode_gateway_row_with_nulls() {
        let json = serde_json::json!({
            "proveedor_id": "00000000-0000-0000-0000-000000000001",
            "nombre": "Acme",
            "razon_social": "Acme S.A. de C.V.",
            "rfc": "ACM010101AAA",
            "estatus": "apto",
            "email": "compras@acme.mx",
            "telefono": null,
            "pais": "México",
            "created_at": "2024-01-15T10:00:00.123456+00:00",
            "categoria_id": null,
            "categoria_nombre": null,
            "documento_id": null,
            "transaccion_id": "00000000-0000-0000-0000-0000000000a1",
            "transaccion_descripcion": "Compra de equipo",
            "transaccion_monto": 1250.5,
            "transaccion_fecha": "2024-02-01"
        });

        let row: SupplierDetailRow = serde_json::from_value(json).unwrap();
        assert_eq!(row.supplier_id, Uuid::from_u128(1));
        assert_eq!(row.status, SupplierStatus::Fit);
        assert!(row.phone.is_none());
        assert!(row.document_id.is_none());
        assert!(row.document_status.is_none());
        assert_eq!(row.transaction_id, Some(Uuid::from_u128(0xa1)));
        assert_eq!(row.transaction_amount, Some(1250.5));
        assert_eq!(
            row.transaction_date,
            Some(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
        );
    }

    #[test]
    fn test_decode_english_field_names() {
        let json = serde_json::json!({
            "supplier_id": "00000000-0000-0000-0000-000000000002",
            "name": "Globex",
            "legal_name": "Globex Corp",
            "tax_id": "GLX020202BBB",
            "status": "unfit",
            "email": "ap@globex.com",
            "country": "US",
            "created_at": "2024-01-15T10:00:00Z",
            "document_id": "00000000-0000-0000-0000-0000000000d1",
            "document_status": "pending"
        });

        let row: SupplierDetailRow = serde_json::from_value(json).unwrap();
        assert_eq!(row.status, SupplierStatus::Unfit);
        assert_eq!(row.document_id, Some(Uuid::from_u128(0xd1)));
        assert_eq!(row.document_status, Some(DocumentStatus::Pending));
        assert!(row.transaction_id.is_none());
    }
}

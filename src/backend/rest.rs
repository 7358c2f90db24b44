//! REST/RPC backend - talks to the hosted database through its HTTP gateway.
//!
//! The gateway exposes stored procedures at `POST /rest/v1/rpc/{function}` and tables
//! at `/rest/v1/{table}`. Every request carries the project's `apikey` header and a
//! bearer token (the user's access token when one is configured, the anon key
//! otherwise). Non-2xx responses carry a JSON body with `code`, `message`, `details`
//! and `hint`, which is surfaced as [`Error::Upstream`].

use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, Response,
    header::{AUTHORIZATION, CONTENT_RANGE, HeaderMap, HeaderValue},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::SupplierBackend;
use crate::{
    config::backend::BackendConfig,
    errors::{Error, Result},
    models::{
        Category, DocumentType, NewCategory, NewDocument, NewSupplier, NewTransaction,
        SupplierDetailRow, SupplierFilter, SupplierStatus, SupplierSummary,
    },
};

const REST_PATH: &str = "rest/v1";

/// Supplier backend over the hosted REST/RPC gateway.
pub struct RestBackend {
    http: Client,
    base_url: String,
}

/// Error body returned by the gateway.
#[derive(Debug, Deserialize)]
struct GatewayError {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl RestBackend {
    /// Builds an HTTP client carrying the credentials of `config`.
    ///
    /// # Errors
    /// Returns `Error::Config` when the credentials are not valid header values and
    /// `Error::Http` when the client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value("API key", &config.api_key)?);
        let token = config.access_token.as_deref().unwrap_or(&config.api_key);
        headers.insert(
            AUTHORIZATION,
            header_value("access token", &format!("Bearer {token}"))?,
        );

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{REST_PATH}/{path}", self.base_url)
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), body = %body, "Gateway rejected request");
        Err(upstream_error(status.as_u16(), &body))
    }

    #[instrument(skip(self, params))]
    async fn rpc<T: DeserializeOwned>(&self, function: &str, params: &Value) -> Result<T> {
        let request = self
            .http
            .post(self.url(&format!("rpc/{function}")))
            .json(params);
        let response = Self::send(request).await?;
        decode(function, response).await
    }

    #[instrument(skip(self, params))]
    async fn rpc_void(&self, function: &str, params: &Value) -> Result<()> {
        let request = self
            .http
            .post(self.url(&format!("rpc/{function}")))
            .json(params);
        Self::send(request).await?;
        Ok(())
    }

    async fn select_ordered<T: DeserializeOwned>(&self, table: &str, order: &str) -> Result<Vec<T>> {
        let request = self
            .http
            .get(self.url(table))
            .query(&[("select", "*"), ("order", order)]);
        let response = Self::send(request).await?;
        decode(table, response).await
    }

    async fn count_rows(&self, table: &str, filters: &[(&str, String)]) -> Result<u64> {
        let mut query: Vec<(&str, String)> = vec![("select", "*".to_string())];
        query.extend(filters.iter().cloned());

        let request = self
            .http
            .head(self.url(table))
            .header("Prefer", "count=exact")
            .query(&query);
        let response = Self::send(request).await?;

        let range = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| Error::Decode {
                context: format!("{table} count"),
                message: "missing Content-Range header".to_string(),
            })?;
        parse_content_range_total(range).ok_or_else(|| Error::Decode {
            context: format!("{table} count"),
            message: format!("unexpected Content-Range `{range}`"),
        })
    }

    async fn insert_rows<T>(&self, table: &str, rows: &T) -> Result<()>
    where
        T: Serialize + ?Sized + Sync,
    {
        let request = self
            .http
            .post(self.url(table))
            .header("Prefer", "return=minimal")
            .json(rows);
        Self::send(request).await?;
        Ok(())
    }
}

fn header_value(what: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::Config {
        message: format!("{what} is not a valid header value: {e}"),
    })
}

fn upstream_error(status: u16, body: &str) -> Error {
    match serde_json::from_str::<GatewayError>(body) {
        Ok(parsed) => Error::Upstream {
            status,
            code: parsed.code,
            message: parsed.message.unwrap_or_else(|| body.to_string()),
            details: parsed.details,
            hint: parsed.hint,
        },
        Err(_) => Error::Upstream {
            status,
            code: None,
            message: if body.is_empty() {
                format!("HTTP {status}")
            } else {
                body.to_string()
            },
            details: None,
            hint: None,
        },
    }
}

async fn decode<T: DeserializeOwned>(context: &str, response: Response) -> Result<T> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| Error::Decode {
        context: context.to_string(),
        message: e.to_string(),
    })
}

/// Total from a `Content-Range` value such as `0-24/57` or `*/0`.
fn parse_content_range_total(value: &str) -> Option<u64> {
    value
        .rsplit_once('/')
        .and_then(|(_, total)| total.trim().parse().ok())
}

fn with_optional(mut params: Value, key: &str, value: Option<Value>) -> Value {
    if let (Some(map), Some(value)) = (params.as_object_mut(), value) {
        map.insert(key.to_string(), value);
    }
    params
}

#[async_trait]
impl SupplierBackend for RestBackend {
    async fn list_suppliers(&self, filter: &SupplierFilter) -> Result<Vec<SupplierSummary>> {
        let params = json!({
            "_limit": filter.limit,
            "_offset": filter.offset,
            "_estatus": filter.status.map(SupplierStatus::as_str),
            "_categoria_id": filter.category_id,
        });
        let suppliers: Option<Vec<SupplierSummary>> = self.rpc("get_proveedores", &params).await?;
        Ok(suppliers.unwrap_or_default())
    }

    async fn count_suppliers(&self, filter: &SupplierFilter) -> Result<u64> {
        let mut filters = Vec::new();
        if let Some(status) = filter.status {
            filters.push(("estatus", format!("eq.{}", status.as_str())));
        }
        if let Some(category_id) = filter.category_id {
            filters.push(("categoria_id", format!("eq.{category_id}")));
        }
        self.count_rows("proveedores", &filters).await
    }

    async fn supplier_detail_rows(&self, supplier_id: Uuid) -> Result<Vec<SupplierDetailRow>> {
        let rows: Option<Vec<SupplierDetailRow>> = self
            .rpc(
                "get_proveedor_detalle",
                &json!({ "_proveedor_id": supplier_id }),
            )
            .await?;
        Ok(rows.unwrap_or_default())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.select_ordered("categorias", "nombre.asc").await
    }

    async fn seed_default_categories(&self) -> Result<()> {
        self.rpc_void("insertar_categorias_por_defecto", &json!({}))
            .await
    }

    async fn insert_categories(&self, categories: &[NewCategory]) -> Result<()> {
        if categories.is_empty() {
            return Ok(());
        }
        debug!(count = categories.len(), "Inserting categories directly");
        self.insert_rows("categorias", categories).await
    }

    async fn list_document_types(&self) -> Result<Vec<DocumentType>> {
        self.select_ordered("tipos_documentos", "nombre.asc").await
    }

    async fn register_supplier(&self, supplier: &NewSupplier) -> Result<Uuid> {
        let params = json!({
            "_nombre": supplier.name.trim(),
            "_razon_social": supplier.legal_name.trim(),
            "_rfc": supplier.tax_id.trim(),
            "_estatus": supplier.status.as_str(),
            "_email": supplier.email.trim(),
            "_telefono": supplier.phone().unwrap_or_default(),
            "_pais": supplier.country.trim(),
        });
        let params = with_optional(
            params,
            "_categoria_id",
            supplier.category_id.map(|id| json!(id)),
        );
        self.rpc("registrar_proveedor", &params).await
    }

    async fn register_document(&self, document: &NewDocument) -> Result<Uuid> {
        let params = json!({
            "_proveedor_id": document.supplier_id,
            "_tipo_documento_id": document.document_type_id,
            "_nombre": document.name.trim(),
            "_url_archivo": document.url.trim(),
            "_estatus": document.status.as_str(),
        });
        let params = with_optional(
            params,
            "_fecha_vencimiento",
            document.expires_on.map(|d| json!(d)),
        );
        self.rpc("registrar_documento", &params).await
    }

    async fn register_transaction(&self, transaction: &NewTransaction) -> Result<Uuid> {
        let params = json!({
            "_proveedor_id": transaction.supplier_id,
            "_descripcion": transaction.description.trim(),
            "_monto": transaction.amount,
            "_fecha": transaction.date,
        });
        self.rpc("registrar_transaccion", &params).await
    }

    async fn expire_documents(&self) -> Result<()> {
        self.rpc_void("actualizar_estatus_documentos_vencidos", &json!({}))
            .await
    }
}

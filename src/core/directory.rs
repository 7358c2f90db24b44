//! Supplier directory - the listing state behind the console screens.
//!
//! The directory owns the injected backend, the active filter and the last
//! snapshot that loaded successfully. A failed refresh never clears the
//! snapshot: the previous suppliers and categories stay visible and the failure
//! is recorded as a short operator-facing message.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{category, detail, document, supplier, transaction};
use crate::{
    backend::SupplierBackend,
    config::catalog::default_categories,
    errors::Result,
    models::{
        Category, NewCategory, NewDocument, NewSupplier, NewTransaction, SupplierDetail,
        SupplierFilter, SupplierSummary,
    },
};

/// What the listing screen shows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DirectorySnapshot {
    /// Current page of suppliers
    pub suppliers: Vec<SupplierSummary>,
    /// All categories, ordered by name
    pub categories: Vec<Category>,
    /// Suppliers matching the filter across all pages
    pub total: u64,
}

/// Listing state over an injected [`SupplierBackend`].
pub struct SupplierDirectory<B: ?Sized> {
    backend: Arc<B>,
    default_categories: Vec<NewCategory>,
    filter: RwLock<SupplierFilter>,
    snapshot: RwLock<DirectorySnapshot>,
    last_error: RwLock<Option<String>>,
}

impl<B> SupplierDirectory<B>
where
    B: SupplierBackend + ?Sized,
{
    /// Creates an empty directory; call [`SupplierDirectory::refresh`] to load it.
    #[must_use]
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            default_categories: default_categories(),
            filter: RwLock::new(SupplierFilter::default()),
            snapshot: RwLock::new(DirectorySnapshot::default()),
            last_error: RwLock::new(None),
        }
    }

    /// Replaces the categories inserted when the hosted seeding procedure fails.
    #[must_use]
    pub fn with_default_categories(mut self, categories: Vec<NewCategory>) -> Self {
        self.default_categories = categories;
        self
    }

    /// The injected backend.
    #[must_use]
    pub const fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// The active filter.
    pub async fn filter(&self) -> SupplierFilter {
        *self.filter.read().await
    }

    /// Copy of the last snapshot that loaded successfully.
    pub async fn snapshot(&self) -> DirectorySnapshot {
        self.snapshot.read().await.clone()
    }

    /// Message describing the most recent failure, cleared by the next
    /// successful refresh.
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }

    /// Changes the filter and reloads the listing.
    pub async fn set_filter(&self, filter: SupplierFilter) -> Result<()> {
        *self.filter.write().await = filter;
        self.refresh().await
    }

    /// Reloads suppliers, total and categories.
    ///
    /// On failure the previous snapshot is kept and the error is both recorded
    /// and returned.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<()> {
        let filter = self.filter().await;
        let loaded = tokio::try_join!(
            supplier::fetch_suppliers(self.backend.as_ref(), &filter),
            category::load_categories(self.backend.as_ref(), &self.default_categories)
        );

        let (page, categories) = self.record(loaded).await?;
        let mut snapshot = self.snapshot.write().await;
        *snapshot = DirectorySnapshot {
            suppliers: page.suppliers,
            categories,
            total: page.total,
        };
        *self.last_error.write().await = None;
        info!(
            shown = snapshot.suppliers.len(),
            total = snapshot.total,
            categories = snapshot.categories.len(),
            "Directory refreshed"
        );
        Ok(())
    }

    /// Aggregated detail of one supplier; `Ok(None)` when it does not exist.
    pub async fn supplier_detail(&self, supplier_id: Uuid) -> Result<Option<SupplierDetail>> {
        let result = detail::get_supplier_detail(self.backend.as_ref(), supplier_id).await;
        self.record(result).await
    }

    /// Registers a supplier and then reloads the listing.
    ///
    /// A failed reload after a successful registration is recorded but does not
    /// turn the registration into an error.
    pub async fn register_supplier(&self, form: &NewSupplier) -> Result<Uuid> {
        let result = supplier::register_supplier(self.backend.as_ref(), form).await;
        let id = self.record(result).await?;
        if let Err(e) = self.refresh().await {
            warn!(error = %e, %id, "Supplier registered but the listing could not be reloaded");
        }
        Ok(id)
    }

    /// Files a document for a supplier.
    pub async fn register_document(&self, form: &NewDocument) -> Result<Uuid> {
        let result = document::register_document(self.backend.as_ref(), form).await;
        self.record(result).await
    }

    /// Records a transaction against a supplier.
    pub async fn register_transaction(&self, form: &NewTransaction) -> Result<Uuid> {
        let result = transaction::register_transaction(self.backend.as_ref(), form).await;
        self.record(result).await
    }

    async fn record<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            warn!(error = %e, upstream = e.is_upstream(), "Directory operation failed");
            *self.last_error.write().await = Some(e.user_message());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::backend::rest::RestBackend;
    use crate::config::backend::BackendConfig;
    use crate::errors::Error;
    use crate::models::SupplierStatus;
    use crate::test_utils::{setup_test_backend, supplier_form};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_refresh_loads_snapshot() -> Result<()> {
        let fixture = setup_test_backend().await?;
        fixture.supplier("Acme", SupplierStatus::Fit, None).await?;
        let directory = SupplierDirectory::new(Arc::new(fixture.backend));

        directory.refresh().await?;
        let snapshot = directory.snapshot().await;
        assert_eq!(snapshot.total, 1);
        assert_eq!(snapshot.suppliers[0].name, "Acme");
        assert_eq!(snapshot.categories.len(), 4, "defaults seeded on first load");
        assert_eq!(directory.last_error().await, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_register_supplier_refreshes_listing() -> Result<()> {
        let fixture = setup_test_backend().await?;
        let directory = SupplierDirectory::new(Arc::new(fixture.backend));
        directory.refresh().await?;
        assert_eq!(directory.snapshot().await.total, 0);

        let id = directory
            .register_supplier(&supplier_form("Globex", SupplierStatus::Unfit, None))
            .await?;

        let snapshot = directory.snapshot().await;
        assert_eq!(snapshot.total, 1);
        assert_eq!(snapshot.suppliers[0].id, id);
        Ok(())
    }

    #[tokio::test]
    async fn test_filter_change_reloads() -> Result<()> {
        let fixture = setup_test_backend().await?;
        fixture.supplier("Acme", SupplierStatus::Fit, None).await?;
        fixture.supplier("Globex", SupplierStatus::Unfit, None).await?;
        let directory = SupplierDirectory::new(Arc::new(fixture.backend));

        directory
            .set_filter(SupplierFilter::default().with_status(SupplierStatus::Unfit))
            .await?;
        let snapshot = directory.snapshot().await;
        assert_eq!(snapshot.total, 1);
        assert_eq!(snapshot.suppliers[0].name, "Globex");
        assert_eq!(directory.filter().await.status, Some(SupplierStatus::Unfit));
        Ok(())
    }

    #[tokio::test]
    async fn test_validation_error_is_recorded() -> Result<()> {
        let fixture = setup_test_backend().await?;
        let directory = SupplierDirectory::new(Arc::new(fixture.backend));
        let mut form = supplier_form("Acme", SupplierStatus::Fit, None);
        form.email = "no-at-sign".to_string();

        let result = directory.register_supplier(&form).await;
        assert!(matches!(result, Err(Error::Validation { field: "email", .. })));
        assert_eq!(
            directory.last_error().await.as_deref(),
            Some("Invalid email: must contain '@'")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/rpc/get_proveedores"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": "00000000-0000-0000-0000-000000000051",
                "nombre": "Acme",
                "razon_social": "Acme S.A. de C.V.",
                "rfc": "ACM010101AAA",
                "estatus": "apto",
                "email": "compras@acme.mx",
                "pais": "México",
                "created_at": "2024-01-15T10:00:00+00:00"
            }])))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/rest/v1/proveedores"))
            .respond_with(ResponseTemplate::new(200).insert_header("Content-Range", "0-0/1"))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/categorias"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "00000000-0000-0000-0000-000000000001", "nombre": "Alimentos" }
            ])))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let backend = RestBackend::new(&BackendConfig::new(server.uri(), "anon")).unwrap();
        let directory = SupplierDirectory::new(Arc::new(backend));

        directory.refresh().await.unwrap();
        let before = directory.snapshot().await;
        assert_eq!(before.total, 1);
        assert_eq!(before.categories.len(), 1);

        let err = directory.refresh().await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(directory.snapshot().await, before);
        assert_eq!(
            directory.last_error().await.as_deref(),
            Some("Could not reach the supplier database, please try again")
        );
    }

    #[tokio::test]
    async fn test_works_with_trait_objects() -> Result<()> {
        let fixture = setup_test_backend().await?;
        let supplier_id = fixture.supplier("Acme", SupplierStatus::Fit, None).await?;
        let backend: Arc<dyn SupplierBackend> = Arc::new(fixture.backend);
        let directory = SupplierDirectory::new(backend);

        let detail = directory.supplier_detail(supplier_id).await?.unwrap();
        assert_eq!(detail.supplier.name, "Acme");
        assert!(directory.supplier_detail(Uuid::from_u128(404)).await?.is_none());
        Ok(())
    }
}

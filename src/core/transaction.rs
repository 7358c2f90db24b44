//! Transaction business logic - records monetary events against a supplier.

use tracing::{info, instrument};
use uuid::Uuid;

use crate::{backend::SupplierBackend, errors::Result, models::NewTransaction};

/// Validates and records a transaction, returning its identifier.
///
/// # Errors
/// Returns `Error::Validation` for a blank description and `Error::InvalidAmount`
/// for a negative or non-finite amount, in both cases without calling the
/// backend.
#[instrument(skip(backend, transaction), fields(supplier_id = %transaction.supplier_id))]
pub async fn register_transaction<B>(backend: &B, transaction: &NewTransaction) -> Result<Uuid>
where
    B: SupplierBackend + ?Sized,
{
    transaction.validate()?;
    let id = backend.register_transaction(transaction).await?;
    info!(%id, amount = transaction.amount, "Registered transaction");
    Ok(id)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::detail::get_supplier_detail;
    use crate::errors::Error;
    use crate::models::SupplierStatus;
    use crate::test_utils::setup_test_backend;
    use chrono::NaiveDate;

    fn form(supplier_id: Uuid, amount: f64) -> NewTransaction {
        NewTransaction {
            supplier_id,
            description: "Compra de insumos".to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_register_transaction() -> Result<()> {
        let fixture = setup_test_backend().await?;
        let supplier_id = fixture.supplier("Acme", SupplierStatus::Fit, None).await?;

        let id = register_transaction(&fixture.backend, &form(supplier_id, 2500.75)).await?;

        let detail = get_supplier_detail(&fixture.backend, supplier_id)
            .await?
            .unwrap();
        assert_eq!(detail.transactions.len(), 1);
        assert_eq!(detail.transactions[0].id, id);
        assert_eq!(detail.transactions[0].amount, 2500.75);
        assert_eq!(detail.transactions[0].description, "Compra de insumos");
        assert_eq!(detail.transactions[0].date, NaiveDate::from_ymd_opt(2024, 5, 10));
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_amounts_are_rejected() -> Result<()> {
        let fixture = setup_test_backend().await?;
        let supplier_id = fixture.supplier("Acme", SupplierStatus::Fit, None).await?;

        for amount in [-1.0, f64::NAN, f64::NEG_INFINITY] {
            let result = register_transaction(&fixture.backend, &form(supplier_id, amount)).await;
            assert!(matches!(result, Err(Error::InvalidAmount { .. })));
        }

        let detail = get_supplier_detail(&fixture.backend, supplier_id)
            .await?
            .unwrap();
        assert!(detail.transactions.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_supplier_is_rejected() -> Result<()> {
        let fixture = setup_test_backend().await?;
        let result = register_transaction(&fixture.backend, &form(Uuid::from_u128(404), 10.0)).await;
        assert!(matches!(
            result,
            Err(Error::Validation {
                field: "supplier_id",
                ..
            })
        ));
        Ok(())
    }
}

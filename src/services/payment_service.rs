use rust_decimal::Decimal;

use crate::{
    dto::payments::{CreatePaymentMethodRequest, UpdatePaymentMethodRequest},
    error::{AppError, AppResult},
    models::PaymentMethod,
    pricing::validate_tax_rate,
    repository::{NewPaymentMethod, PaymentMethodChanges},
    state::AppState,
};

pub async fn list_payment_methods(state: &AppState) -> AppResult<Vec<PaymentMethod>> {
    Ok(state.payments.list().await?)
}

pub async fn create_payment_method(
    state: &AppState,
    payload: CreatePaymentMethodRequest,
) -> AppResult<PaymentMethod> {
    let name = payload
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    let (Some(name), Some(tax_rate)) = (name, payload.tax_rate) else {
        return Err(AppError::bad_request("name and tax rate are required"));
    };
    check_tax_rate(tax_rate)?;

    let method = state
        .payments
        .create(NewPaymentMethod { name, tax_rate })
        .await?;
    tracing::info!(payment_method_id = method.id, tax_rate = %method.tax_rate, "payment method created");
    Ok(method)
}

/// Past sales keep the totals computed with the old rate.
pub async fn update_payment_method(
    state: &AppState,
    id: i32,
    payload: UpdatePaymentMethodRequest,
) -> AppResult<PaymentMethod> {
    let name = match payload.name {
        Some(name) if name.trim().is_empty() => {
            return Err(AppError::bad_request("name cannot be blank"));
        }
        other => other.map(|n| n.trim().to_string()),
    };
    if let Some(tax_rate) = payload.tax_rate {
        check_tax_rate(tax_rate)?;
    }

    let method = state
        .payments
        .update(
            id,
            PaymentMethodChanges {
                name,
                tax_rate: payload.tax_rate,
            },
        )
        .await?
        .ok_or_else(|| AppError::not_found("payment method not found"))?;
    tracing::info!(payment_method_id = method.id, tax_rate = %method.tax_rate, "payment method updated");
    Ok(method)
}

fn check_tax_rate(tax_rate: Decimal) -> AppResult<()> {
    validate_tax_rate(tax_rate).map_err(|_| AppError::bad_request("tax rate must be between 0 and 100"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryStore;
    use rust_decimal_macros::dec;

    fn create(name: Option<&str>, tax_rate: Option<Decimal>) -> CreatePaymentMethodRequest {
        CreatePaymentMethodRequest {
            name: name.map(str::to_string),
            tax_rate,
        }
    }

    #[tokio::test]
    async fn zero_rate_is_accepted_but_missing_rate_is_not() {
        let store = MemoryStore::new();
        let state = store.state();

        let pix = create_payment_method(&state, create(Some("Pix"), Some(Decimal::ZERO)))
            .await
            .unwrap();
        assert_eq!(pix.tax_rate, Decimal::ZERO);

        let err = create_payment_method(&state, create(Some("Pix"), None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = create_payment_method(&state, create(Some("  "), Some(dec!(1))))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn rejects_rates_outside_percentage_range() {
        let store = MemoryStore::new();
        let err = create_payment_method(&store.state(), create(Some("Crédito"), Some(dec!(101))))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(store.payments.snapshot().is_empty());
    }

    #[tokio::test]
    async fn lists_by_name() {
        let store = MemoryStore::new();
        let state = store.state();
        for name in ["Pix", "Crédito", "Dinheiro"] {
            create_payment_method(&state, create(Some(name), Some(Decimal::ZERO)))
                .await
                .unwrap();
        }
        let names: Vec<String> = list_payment_methods(&state)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Crédito", "Dinheiro", "Pix"]);
    }

    #[tokio::test]
    async fn updates_rate_of_existing_method() {
        let store = MemoryStore::new();
        let state = store.state();
        let debit = create_payment_method(&state, create(Some("Débito"), Some(dec!(1.99))))
            .await
            .unwrap();

        let updated = update_payment_method(
            &state,
            debit.id,
            UpdatePaymentMethodRequest {
                name: None,
                tax_rate: Some(dec!(2.49)),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Débito");
        assert_eq!(updated.tax_rate, dec!(2.49));

        let missing = update_payment_method(&state, 77, UpdatePaymentMethodRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(missing, AppError::NotFound(_)));
    }
}

use rust_decimal::Decimal;

use crate::{
    dto::products::CreateProductRequest,
    error::{AppError, AppResult},
    models::Product,
    repository::NewProduct,
    state::AppState,
};

pub async fn list_products(state: &AppState) -> AppResult<Vec<Product>> {
    Ok(state.products.list().await?)
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<Product> {
    let new_product = validate_new_product(payload)?;
    let product = state.products.create(new_product).await?;

    tracing::info!(product_id = product.id, name = %product.name, "product created");
    Ok(product)
}

/// Deletes a product. Sale lines that referenced it keep their own price.
pub async fn delete_product(state: &AppState, id: i32) -> AppResult<Product> {
    let deleted = state
        .products
        .delete(id)
        .await?
        .ok_or_else(|| AppError::not_found("product not found"))?;

    tracing::info!(product_id = id, "product deleted");
    Ok(deleted)
}

pub fn validate_new_product(payload: CreateProductRequest) -> AppResult<NewProduct> {
    let name = non_blank(payload.name)
        .ok_or_else(|| AppError::bad_request("name is required"))?;

    let price = payload
        .unit_price
        .or(payload.price)
        .or(payload.kg_price)
        .ok_or_else(|| AppError::bad_request("a unit or per-kilogram price is required"))?;
    if price <= Decimal::ZERO {
        return Err(AppError::bad_request("price must be greater than zero"));
    }

    Ok(NewProduct {
        name,
        price,
        category: non_blank(payload.category),
        image_url: non_blank(payload.image_url),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryStore;
    use rust_decimal_macros::dec;

    fn request(name: &str) -> CreateProductRequest {
        CreateProductRequest {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn unit_price_wins_over_other_prices() {
        let product = validate_new_product(CreateProductRequest {
            unit_price: Some(dec!(3.50)),
            price: Some(dec!(9.99)),
            kg_price: Some(dec!(12.00)),
            ..request("Banana")
        })
        .unwrap();
        assert_eq!(product.price, dec!(3.50));
    }

    #[test]
    fn kg_price_is_used_when_alone() {
        let product = validate_new_product(CreateProductRequest {
            kg_price: Some(dec!(12.00)),
            category: Some("Frutas".into()),
            ..request("  Uva  ")
        })
        .unwrap();
        assert_eq!(product.name, "Uva");
        assert_eq!(product.price, dec!(12.00));
        assert_eq!(product.category.as_deref(), Some("Frutas"));
    }

    #[test]
    fn blank_optional_fields_become_null() {
        let product = validate_new_product(CreateProductRequest {
            price: Some(dec!(1)),
            category: Some("   ".into()),
            image_url: Some(String::new()),
            ..request("Couve")
        })
        .unwrap();
        assert_eq!(product.category, None);
        assert_eq!(product.image_url, None);
    }

    #[test]
    fn name_and_price_are_required() {
        let missing_name = validate_new_product(CreateProductRequest {
            price: Some(dec!(1)),
            ..Default::default()
        });
        assert!(matches!(missing_name, Err(AppError::BadRequest(_))));

        let missing_price = validate_new_product(request("Couve"));
        assert!(matches!(missing_price, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn price_must_be_positive() {
        let zero = validate_new_product(CreateProductRequest {
            unit_price: Some(Decimal::ZERO),
            ..request("Couve")
        });
        assert!(matches!(zero, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn deleting_twice_reports_not_found() {
        let store = MemoryStore::new();
        let state = store.state();
        let product = create_product(
            &state,
            CreateProductRequest {
                price: Some(dec!(4.00)),
                ..request("Cenoura")
            },
        )
        .await
        .unwrap();

        let deleted = delete_product(&state, product.id).await.unwrap();
        assert_eq!(deleted.id, product.id);

        let again = delete_product(&state, product.id).await.unwrap_err();
        assert!(matches!(again, AppError::NotFound(_)));
        assert!(list_products(&state).await.unwrap().is_empty());
    }
}

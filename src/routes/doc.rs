use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        items::{CreateItemRequest, ItemList},
        payments::{CreatePaymentMethodRequest, PaymentMethodList, UpdatePaymentMethodRequest},
        products::{CreateProductRequest, ProductList},
        sales::{CreateSaleRequest, DailySummary, PaymentMethodTotals, SaleItemRequest, SaleList},
    },
    models::{Item, PaymentMethod, Product, Sale, SaleDetail, SaleItem, SaleItemDetail},
    response::ErrorBody,
    routes::{health, items, payments, products, sales},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        items::list_items,
        items::create_item,
        products::list_products,
        products::create_product,
        products::delete_product,
        payments::list_payment_methods,
        payments::create_payment_method,
        payments::update_payment_method,
        sales::list_sales,
        sales::create_sale,
        sales::daily_summary
    ),
    components(
        schemas(
            Item,
            Product,
            PaymentMethod,
            Sale,
            SaleItem,
            SaleItemDetail,
            SaleDetail,
            CreateItemRequest,
            CreateProductRequest,
            CreatePaymentMethodRequest,
            UpdatePaymentMethodRequest,
            CreateSaleRequest,
            SaleItemRequest,
            ItemList,
            ProductList,
            PaymentMethodList,
            SaleList,
            DailySummary,
            PaymentMethodTotals,
            ErrorBody,
            health::HealthData
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Items", description = "Legacy demo items"),
        (name = "Products", description = "Product catalog"),
        (name = "Payments", description = "Payment methods and their tax rates"),
        (name = "Sales", description = "Sale recording and daily figures"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

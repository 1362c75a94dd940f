use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::SaleDetail;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemRequest {
    pub product_id: i32,
    pub quantity: i32,
    /// Unit price charged for this line.
    pub price: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    pub items: Option<Vec<SaleItemRequest>>,
    pub payment_method_id: Option<i32>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct SaleList {
    #[schema(value_type = Vec<SaleDetail>)]
    pub items: Vec<SaleDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodTotals {
    pub payment_method_id: i32,
    pub name: String,
    pub sale_count: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_gross: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_net: Decimal,
}

/// Aggregate figures for one calendar day of sales.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: NaiveDate,
    pub sale_count: u64,
    pub items_sold: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_gross: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_net: Decimal,
    pub by_payment_method: Vec<PaymentMethodTotals>,
}

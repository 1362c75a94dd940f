//! Data-access interfaces, one per entity.
//!
//! Services only talk to these traits. The SeaORM implementations live in the
//! submodules; tests swap in the in-memory ones from `memory`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::DbErr;

use crate::{
    models::{Item, PaymentMethod, Product, SaleDetail},
    pricing::{PricedLine, SaleTotals},
};

pub mod items;
#[cfg(test)]
pub mod memory;
pub mod payments;
pub mod products;
pub mod sales;

pub use items::SeaOrmItemRepository;
pub use payments::SeaOrmPaymentMethodRepository;
pub use products::SeaOrmProductRepository;
pub use sales::SeaOrmSaleRepository;

pub type RepoResult<T> = Result<T, DbErr>;

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPaymentMethod {
    pub name: String,
    pub tax_rate: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentMethodChanges {
    pub name: Option<String>,
    pub tax_rate: Option<Decimal>,
}

/// A priced sale ready to be written together with its lines.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub payment_method_id: i32,
    pub totals: SaleTotals,
    pub lines: Vec<PricedLine>,
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, newest first.
    async fn list(&self) -> RepoResult<Vec<Product>>;

    async fn create(&self, product: NewProduct) -> RepoResult<Product>;

    /// Products matching `ids`; unknown ids are simply absent.
    async fn find_many(&self, ids: &[i32]) -> RepoResult<Vec<Product>>;

    /// Returns the deleted row, or `None` when nothing matched.
    async fn delete(&self, id: i32) -> RepoResult<Option<Product>>;
}

#[async_trait]
pub trait PaymentMethodRepository: Send + Sync {
    /// All payment methods ordered by name.
    async fn list(&self) -> RepoResult<Vec<PaymentMethod>>;

    async fn find(&self, id: i32) -> RepoResult<Option<PaymentMethod>>;

    async fn create(&self, method: NewPaymentMethod) -> RepoResult<PaymentMethod>;

    async fn update(
        &self,
        id: i32,
        changes: PaymentMethodChanges,
    ) -> RepoResult<Option<PaymentMethod>>;
}

#[async_trait]
pub trait SaleRepository: Send + Sync {
    /// Writes the sale and all of its lines in one transaction.
    async fn create(&self, sale: NewSale) -> RepoResult<SaleDetail>;

    /// Sales created in `[from, until)`, newest first.
    async fn list_between(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> RepoResult<Vec<SaleDetail>>;
}

#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<Item>>;

    async fn create(&self, title: String) -> RepoResult<Item>;
}

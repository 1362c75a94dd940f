use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::repository::{
    ItemRepository, PaymentMethodRepository, ProductRepository, SaleRepository,
    SeaOrmItemRepository, SeaOrmPaymentMethodRepository, SeaOrmProductRepository,
    SeaOrmSaleRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
    pub payments: Arc<dyn PaymentMethodRepository>,
    pub sales: Arc<dyn SaleRepository>,
    pub items: Arc<dyn ItemRepository>,
}

impl AppState {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        payments: Arc<dyn PaymentMethodRepository>,
        sales: Arc<dyn SaleRepository>,
        items: Arc<dyn ItemRepository>,
    ) -> Self {
        Self {
            products,
            payments,
            sales,
            items,
        }
    }

    /// Backs every repository with the same SeaORM connection pool.
    pub fn from_orm(orm: DatabaseConnection) -> Self {
        Self::new(
            Arc::new(SeaOrmProductRepository::new(orm.clone())),
            Arc::new(SeaOrmPaymentMethodRepository::new(orm.clone())),
            Arc::new(SeaOrmSaleRepository::new(orm.clone())),
            Arc::new(SeaOrmItemRepository::new(orm)),
        )
    }
}

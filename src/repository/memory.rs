use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    models::{Item, PaymentMethod, Product, Sale, SaleDetail, SaleItem, SaleItemDetail},
    repository::{
        ItemRepository, NewPaymentMethod, NewProduct, NewSale, PaymentMethodChanges,
        PaymentMethodRepository, ProductRepository, RepoResult, SaleRepository,
    },
    state::AppState,
};

#[derive(Default)]
pub struct MemoryProducts {
    rows: Mutex<Vec<Product>>,
}

impl MemoryProducts {
    pub fn snapshot(&self) -> Vec<Product> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductRepository for MemoryProducts {
    async fn list(&self) -> RepoResult<Vec<Product>> {
        let mut rows = self.snapshot();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn create(&self, product: NewProduct) -> RepoResult<Product> {
        let mut rows = self.rows.lock().unwrap();
        let created = Product {
            id: rows.len() as i32 + 1,
            name: product.name,
            price: product.price,
            category: product.category,
            image_url: product.image_url,
            created_at: Utc::now(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn find_many(&self, ids: &[i32]) -> RepoResult<Vec<Product>> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|p| ids.contains(&p.id))
            .collect())
    }

    async fn delete(&self, id: i32) -> RepoResult<Option<Product>> {
        let mut rows = self.rows.lock().unwrap();
        let position = rows.iter().position(|p| p.id == id);
        Ok(position.map(|i| rows.remove(i)))
    }
}

#[derive(Default)]
pub struct MemoryPayments {
    rows: Mutex<Vec<PaymentMethod>>,
}

impl MemoryPayments {
    pub fn snapshot(&self) -> Vec<PaymentMethod> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentMethodRepository for MemoryPayments {
    async fn list(&self) -> RepoResult<Vec<PaymentMethod>> {
        let mut rows = self.snapshot();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn find(&self, id: i32) -> RepoResult<Option<PaymentMethod>> {
        Ok(self.snapshot().into_iter().find(|m| m.id == id))
    }

    async fn create(&self, method: NewPaymentMethod) -> RepoResult<PaymentMethod> {
        let mut rows = self.rows.lock().unwrap();
        let created = PaymentMethod {
            id: rows.len() as i32 + 1,
            name: method.name,
            tax_rate: method.tax_rate,
            created_at: Utc::now(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        changes: PaymentMethodChanges,
    ) -> RepoResult<Option<PaymentMethod>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            row.name = name;
        }
        if let Some(tax_rate) = changes.tax_rate {
            row.tax_rate = tax_rate;
        }
        Ok(Some(row.clone()))
    }
}

pub struct MemorySales {
    products: Arc<MemoryProducts>,
    payments: Arc<MemoryPayments>,
    rows: Mutex<Vec<SaleDetail>>,
}

impl MemorySales {
    pub fn new(products: Arc<MemoryProducts>, payments: Arc<MemoryPayments>) -> Self {
        Self {
            products,
            payments,
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn snapshot(&self) -> Vec<SaleDetail> {
        self.rows.lock().unwrap().clone()
    }

    /// Stores an already built sale, e.g. one dated in the past.
    pub fn insert(&self, sale: SaleDetail) {
        self.rows.lock().unwrap().push(sale);
    }
}

#[async_trait]
impl SaleRepository for MemorySales {
    async fn create(&self, sale: NewSale) -> RepoResult<SaleDetail> {
        let payment_method = self
            .payments
            .find(sale.payment_method_id)
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound("payment method".into()))?;
        let products = self.products.snapshot();

        let mut rows = self.rows.lock().unwrap();
        let sale_id = rows.len() as i32 + 1;
        let item_offset: usize = rows.iter().map(|s| s.items.len()).sum();
        let items = sale
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| SaleItemDetail {
                item: SaleItem {
                    id: (item_offset + i + 1) as i32,
                    sale_id,
                    product_id: Some(line.product_id),
                    quantity: line.quantity,
                    price: line.unit_price,
                    subtotal: line.subtotal,
                },
                product: products.iter().find(|p| p.id == line.product_id).cloned(),
            })
            .collect();

        let detail = SaleDetail {
            sale: Sale {
                id: sale_id,
                total_gross: sale.totals.gross,
                total_tax: sale.totals.tax,
                total_net: sale.totals.net,
                payment_method_id: sale.payment_method_id,
                created_at: Utc::now(),
            },
            payment_method,
            items,
        };
        rows.push(detail.clone());
        Ok(detail)
    }

    async fn list_between(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> RepoResult<Vec<SaleDetail>> {
        let mut rows: Vec<SaleDetail> = self
            .snapshot()
            .into_iter()
            .filter(|s| s.sale.created_at >= from && s.sale.created_at < until)
            .collect();
        rows.sort_by(|a, b| {
            b.sale
                .created_at
                .cmp(&a.sale.created_at)
                .then(b.sale.id.cmp(&a.sale.id))
        });
        Ok(rows)
    }
}

#[derive(Default)]
pub struct MemoryItems {
    rows: Mutex<Vec<Item>>,
}

#[async_trait]
impl ItemRepository for MemoryItems {
    async fn list(&self) -> RepoResult<Vec<Item>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn create(&self, title: String) -> RepoResult<Item> {
        let mut rows = self.rows.lock().unwrap();
        let item = Item {
            id: rows.len() as i32 + 1,
            title,
        };
        rows.push(item.clone());
        Ok(item)
    }
}

/// In-memory repositories wired into an `AppState`, with handles kept for assertions.
pub struct MemoryStore {
    pub products: Arc<MemoryProducts>,
    pub payments: Arc<MemoryPayments>,
    pub sales: Arc<MemorySales>,
    pub items: Arc<MemoryItems>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let products = Arc::new(MemoryProducts::default());
        let payments = Arc::new(MemoryPayments::default());
        let sales = Arc::new(MemorySales::new(products.clone(), payments.clone()));
        Self {
            products,
            payments,
            sales,
            items: Arc::new(MemoryItems::default()),
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(
            self.products.clone(),
            self.payments.clone(),
            self.sales.clone(),
            self.items.clone(),
        )
    }
}

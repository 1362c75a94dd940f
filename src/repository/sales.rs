use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::{
    entity::{
        payment_methods::{Column as PaymentCol, Entity as PaymentMethods},
        products::{Column as ProdCol, Entity as Products},
        sale_items::{
            ActiveModel as SaleItemActive, Column as SaleItemCol, Entity as SaleItems,
            Model as SaleItemModel,
        },
        sales::{ActiveModel as SaleActive, Column as SaleCol, Entity as Sales, Model as SaleModel},
    },
    models::{PaymentMethod, Product, Sale, SaleDetail, SaleItem, SaleItemDetail},
    repository::{
        NewSale, RepoResult, SaleRepository, payments::payment_method_from_entity,
        products::product_from_entity,
    },
};

#[derive(Clone)]
pub struct SeaOrmSaleRepository {
    orm: DatabaseConnection,
}

impl SeaOrmSaleRepository {
    pub fn new(orm: DatabaseConnection) -> Self {
        Self { orm }
    }
}

#[async_trait]
impl SaleRepository for SeaOrmSaleRepository {
    async fn create(&self, sale: NewSale) -> RepoResult<SaleDetail> {
        let txn = self.orm.begin().await?;

        let row = SaleActive {
            id: NotSet,
            total_gross: Set(sale.totals.gross),
            total_tax: Set(sale.totals.tax),
            total_net: Set(sale.totals.net),
            payment_method_id: Set(sale.payment_method_id),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await?;

        let mut items = Vec::with_capacity(sale.lines.len());
        for line in &sale.lines {
            let item = SaleItemActive {
                id: NotSet,
                sale_id: Set(row.id),
                product_id: Set(Some(line.product_id)),
                quantity: Set(line.quantity),
                price: Set(line.unit_price),
                subtotal: Set(line.subtotal),
            }
            .insert(&txn)
            .await?;
            items.push(item);
        }

        let detail = hydrate(&txn, vec![row], items)
            .await?
            .pop()
            .ok_or_else(|| DbErr::Custom("inserted sale vanished".into()))?;

        txn.commit().await?;
        Ok(detail)
    }

    async fn list_between(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> RepoResult<Vec<SaleDetail>> {
        let sales = Sales::find()
            .filter(SaleCol::CreatedAt.gte(from.fixed_offset()))
            .filter(SaleCol::CreatedAt.lt(until.fixed_offset()))
            .order_by_desc(SaleCol::CreatedAt)
            .order_by_desc(SaleCol::Id)
            .all(&self.orm)
            .await?;
        if sales.is_empty() {
            return Ok(Vec::new());
        }

        let sale_ids: Vec<i32> = sales.iter().map(|s| s.id).collect();
        let items = SaleItems::find()
            .filter(SaleItemCol::SaleId.is_in(sale_ids))
            .order_by_asc(SaleItemCol::Id)
            .all(&self.orm)
            .await?;

        hydrate(&self.orm, sales, items).await
    }
}

/// Joins payment methods and products onto sale rows, keeping `sales` order.
async fn hydrate<C>(
    conn: &C,
    sales: Vec<SaleModel>,
    items: Vec<SaleItemModel>,
) -> RepoResult<Vec<SaleDetail>>
where
    C: ConnectionTrait,
{
    let method_ids: BTreeSet<i32> = sales.iter().map(|s| s.payment_method_id).collect();
    let methods: HashMap<i32, PaymentMethod> = PaymentMethods::find()
        .filter(PaymentCol::Id.is_in(method_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|m| (m.id, payment_method_from_entity(m)))
        .collect();

    let product_ids: BTreeSet<i32> = items.iter().filter_map(|i| i.product_id).collect();
    let products: HashMap<i32, Product> = if product_ids.is_empty() {
        HashMap::new()
    } else {
        Products::find()
            .filter(ProdCol::Id.is_in(product_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|p| (p.id, product_from_entity(p)))
            .collect()
    };

    let mut lines: HashMap<i32, Vec<SaleItemDetail>> = HashMap::new();
    for item in items {
        let product = item.product_id.and_then(|id| products.get(&id).cloned());
        lines.entry(item.sale_id).or_default().push(SaleItemDetail {
            item: sale_item_from_entity(item),
            product,
        });
    }

    sales
        .into_iter()
        .map(|sale| -> RepoResult<SaleDetail> {
            let payment_method = methods.get(&sale.payment_method_id).cloned().ok_or_else(|| {
                DbErr::RecordNotFound(format!(
                    "payment method {} of sale {}",
                    sale.payment_method_id, sale.id
                ))
            })?;
            let items = lines.remove(&sale.id).unwrap_or_default();
            Ok(SaleDetail {
                sale: sale_from_entity(sale),
                payment_method,
                items,
            })
        })
        .collect()
}

fn sale_from_entity(model: SaleModel) -> Sale {
    Sale {
        id: model.id,
        total_gross: model.total_gross,
        total_tax: model.total_tax,
        total_net: model.total_net,
        payment_method_id: model.payment_method_id,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn sale_item_from_entity(model: SaleItemModel) -> SaleItem {
    SaleItem {
        id: model.id,
        sale_id: model.sale_id,
        product_id: model.product_id,
        quantity: model.quantity,
        price: model.price,
        subtotal: model.subtotal,
    }
}

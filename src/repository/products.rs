use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    models::Product,
    repository::{NewProduct, ProductRepository, RepoResult},
};

#[derive(Clone)]
pub struct SeaOrmProductRepository {
    orm: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(orm: DatabaseConnection) -> Self {
        Self { orm }
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn list(&self) -> RepoResult<Vec<Product>> {
        let products = Products::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(product_from_entity)
            .collect();
        Ok(products)
    }

    async fn create(&self, product: NewProduct) -> RepoResult<Product> {
        let active = ActiveModel {
            id: NotSet,
            name: Set(product.name),
            price: Set(product.price),
            category: Set(product.category),
            image_url: Set(product.image_url),
            created_at: Set(Utc::now().into()),
        };
        let model = active.insert(&self.orm).await?;
        Ok(product_from_entity(model))
    }

    async fn find_many(&self, ids: &[i32]) -> RepoResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let products = Products::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.orm)
            .await?
            .into_iter()
            .map(product_from_entity)
            .collect();
        Ok(products)
    }

    async fn delete(&self, id: i32) -> RepoResult<Option<Product>> {
        let existing = match Products::find_by_id(id).one(&self.orm).await? {
            Some(p) => p,
            None => return Ok(None),
        };
        let deleted = product_from_entity(existing.clone());
        let result = existing.delete(&self.orm).await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        Ok(Some(deleted))
    }
}

pub(crate) fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        price: model.price,
        category: model.category,
        image_url: model.image_url,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

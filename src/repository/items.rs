use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder, Set,
};

use crate::{
    entity::items::{ActiveModel, Column, Entity as Items, Model as ItemModel},
    models::Item,
    repository::{ItemRepository, RepoResult},
};

#[derive(Clone)]
pub struct SeaOrmItemRepository {
    orm: DatabaseConnection,
}

impl SeaOrmItemRepository {
    pub fn new(orm: DatabaseConnection) -> Self {
        Self { orm }
    }
}

#[async_trait]
impl ItemRepository for SeaOrmItemRepository {
    async fn list(&self) -> RepoResult<Vec<Item>> {
        let items = Items::find()
            .order_by_asc(Column::Id)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(item_from_entity)
            .collect();
        Ok(items)
    }

    async fn create(&self, title: String) -> RepoResult<Item> {
        let model = ActiveModel {
            id: NotSet,
            title: Set(title),
        }
        .insert(&self.orm)
        .await?;
        Ok(item_from_entity(model))
    }
}

fn item_from_entity(model: ItemModel) -> Item {
    Item {
        id: model.id,
        title: model.title,
    }
}

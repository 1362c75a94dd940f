use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder, Set,
};

use crate::{
    entity::payment_methods::{
        ActiveModel, Column, Entity as PaymentMethods, Model as PaymentMethodModel,
    },
    models::PaymentMethod,
    repository::{NewPaymentMethod, PaymentMethodChanges, PaymentMethodRepository, RepoResult},
};

#[derive(Clone)]
pub struct SeaOrmPaymentMethodRepository {
    orm: DatabaseConnection,
}

impl SeaOrmPaymentMethodRepository {
    pub fn new(orm: DatabaseConnection) -> Self {
        Self { orm }
    }
}

#[async_trait]
impl PaymentMethodRepository for SeaOrmPaymentMethodRepository {
    async fn list(&self) -> RepoResult<Vec<PaymentMethod>> {
        let methods = PaymentMethods::find()
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(payment_method_from_entity)
            .collect();
        Ok(methods)
    }

    async fn find(&self, id: i32) -> RepoResult<Option<PaymentMethod>> {
        let method = PaymentMethods::find_by_id(id)
            .one(&self.orm)
            .await?
            .map(payment_method_from_entity);
        Ok(method)
    }

    async fn create(&self, method: NewPaymentMethod) -> RepoResult<PaymentMethod> {
        let active = ActiveModel {
            id: NotSet,
            name: Set(method.name),
            tax_rate: Set(method.tax_rate),
            created_at: Set(Utc::now().into()),
        };
        let model = active.insert(&self.orm).await?;
        Ok(payment_method_from_entity(model))
    }

    async fn update(
        &self,
        id: i32,
        changes: PaymentMethodChanges,
    ) -> RepoResult<Option<PaymentMethod>> {
        let existing = match PaymentMethods::find_by_id(id).one(&self.orm).await? {
            Some(m) => m,
            None => return Ok(None),
        };

        let mut active: ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(tax_rate) = changes.tax_rate {
            active.tax_rate = Set(tax_rate);
        }

        let model = active.update(&self.orm).await?;
        Ok(Some(payment_method_from_entity(model)))
    }
}

pub(crate) fn payment_method_from_entity(model: PaymentMethodModel) -> PaymentMethod {
    PaymentMethod {
        id: model.id,
        name: model.name,
        tax_rate: model.tax_rate,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

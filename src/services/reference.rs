use crate::{
    db::DbPool,
    entities::{article, business_partner, document_type, movement_type, user, warehouse},
    errors::ServiceError,
};
use sea_orm::EntityTrait;
use std::sync::Arc;

/// Read-only lookups over the reference tables the ledger validates against.
/// CRUD for these tables lives outside the core; nothing here mutates.
#[derive(Clone)]
pub struct ReferenceDataService {
    db_pool: Arc<DbPool>,
}

impl ReferenceDataService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    pub async fn lookup_warehouse(&self, id: i32) -> Result<warehouse::Model, ServiceError> {
        warehouse::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or(ServiceError::WarehouseNotFound(id))
    }

    pub async fn lookup_article(&self, id: i32) -> Result<article::Model, ServiceError> {
        article::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or(ServiceError::ArticleNotFound(id))
    }

    /// Resolves a movement type; callers read `factor` off the model to sign
    /// their quantities.
    pub async fn lookup_movement_type(
        &self,
        id: i32,
    ) -> Result<movement_type::Model, ServiceError> {
        movement_type::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or(ServiceError::MovementTypeNotFound(id))
    }

    pub async fn lookup_user(&self, id: i32) -> Result<user::Model, ServiceError> {
        user::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or(ServiceError::UserNotFound(id))
    }

    pub async fn lookup_partner(&self, id: i32) -> Result<business_partner::Model, ServiceError> {
        business_partner::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or(ServiceError::PartnerNotFound(id))
    }

    pub async fn lookup_document_type(
        &self,
        id: i32,
    ) -> Result<document_type::Model, ServiceError> {
        document_type::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or(ServiceError::DocumentTypeNotFound(id))
    }
}

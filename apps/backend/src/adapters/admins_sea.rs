//! SeaORM adapter for the admin lookup table.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::entities::admins;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;
use crate::repos::admins::AdminRepo;

#[derive(Debug, Clone)]
pub struct AdminRepoSea {
    db: DatabaseConnection,
}

impl AdminRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminRepo for AdminRepoSea {
    async fn is_admin(&self, user_id: Uuid) -> Result<bool, DomainError> {
        let found = admins::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(found.is_some())
    }
}

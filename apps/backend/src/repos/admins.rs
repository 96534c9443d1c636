use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::domain::DomainError;

#[async_trait]
pub trait AdminRepo: Send + Sync {
    async fn is_admin(&self, user_id: Uuid) -> Result<bool, DomainError>;
}

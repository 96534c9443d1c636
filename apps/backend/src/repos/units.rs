use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::schema_router::TableName;
use crate::domain::units::{NewUnit, Unit};
use crate::errors::domain::DomainError;

/// Characters and pets share one row shape.
#[async_trait]
pub trait UnitRepo: Send + Sync {
    /// Units of one game ordered by name.
    async fn list_units(&self, table: &TableName, game_id: Uuid) -> Result<Vec<Unit>, DomainError>;
    async fn find_unit(
        &self,
        table: &TableName,
        unit_id: Uuid,
    ) -> Result<Option<Unit>, DomainError>;
    async fn insert_unit(
        &self,
        table: &TableName,
        game_id: Uuid,
        unit: &NewUnit,
    ) -> Result<Uuid, DomainError>;
    /// Returns false when the unit no longer exists.
    async fn update_unit(
        &self,
        table: &TableName,
        unit_id: Uuid,
        unit: &NewUnit,
    ) -> Result<bool, DomainError>;
    /// Returns false when nothing was deleted.
    async fn delete_unit(&self, table: &TableName, unit_id: Uuid) -> Result<bool, DomainError>;
}

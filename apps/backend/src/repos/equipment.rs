use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::schema_router::TableName;
use crate::domain::units::{Equipment, NewEquipment};
use crate::errors::domain::DomainError;

#[async_trait]
pub trait EquipmentRepo: Send + Sync {
    /// Equipment of one game ordered by name.
    async fn list_equipment(
        &self,
        table: &TableName,
        game_id: Uuid,
    ) -> Result<Vec<Equipment>, DomainError>;
    async fn find_equipment(
        &self,
        table: &TableName,
        equipment_id: Uuid,
    ) -> Result<Option<Equipment>, DomainError>;
    async fn insert_equipment(
        &self,
        table: &TableName,
        game_id: Uuid,
        equipment: &NewEquipment,
    ) -> Result<Uuid, DomainError>;
    async fn update_equipment(
        &self,
        table: &TableName,
        equipment_id: Uuid,
        equipment: &NewEquipment,
    ) -> Result<bool, DomainError>;
    async fn delete_equipment(
        &self,
        table: &TableName,
        equipment_id: Uuid,
    ) -> Result<bool, DomainError>;
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::schema_router::TableName;
use crate::domain::team::{NewTeam, Team};
use crate::errors::domain::DomainError;

#[async_trait]
pub trait TeamRepo: Send + Sync {
    async fn list_teams(&self, table: &TableName, game_id: Uuid) -> Result<Vec<Team>, DomainError>;
    async fn find_team(
        &self,
        table: &TableName,
        team_id: Uuid,
    ) -> Result<Option<Team>, DomainError>;
    /// Single insert; returns the new team id.
    async fn insert_team(&self, table: &TableName, team: &NewTeam) -> Result<Uuid, DomainError>;
    /// Overwrites name, mode, formation and companion. Returns false when
    /// the team no longer exists.
    async fn update_team(
        &self,
        table: &TableName,
        team_id: Uuid,
        team: &NewTeam,
    ) -> Result<bool, DomainError>;
    async fn delete_team(&self, table: &TableName, team_id: Uuid) -> Result<bool, DomainError>;
}

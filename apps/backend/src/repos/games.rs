use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::game::{Game, NewGame};
use crate::errors::domain::DomainError;

#[async_trait]
pub trait GameRepo: Send + Sync {
    /// All games ordered by name.
    async fn list_games(&self) -> Result<Vec<Game>, DomainError>;
    async fn find_game(&self, game_id: Uuid) -> Result<Option<Game>, DomainError>;
    async fn find_game_by_slug(&self, slug: &str) -> Result<Option<Game>, DomainError>;
    /// A taken slug is a `SlugTaken` conflict.
    async fn insert_game(&self, game: &NewGame) -> Result<Uuid, DomainError>;
    /// Returns false when the game no longer exists.
    async fn update_game(&self, game_id: Uuid, game: &NewGame) -> Result<bool, DomainError>;
}

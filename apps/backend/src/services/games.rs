//! Game catalog and per-game schema routing.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, info};
use uuid::Uuid;

use super::access::require_admin;
use crate::domain::game::{Game, GameDraft, NewGame};
use crate::domain::schema_router::SchemaRoutes;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::{AdminRepo, GameRepo};

/// Game metadata is treated as immutable for this long.
pub const ROUTES_TTL: Duration = Duration::from_secs(60);
const CACHE_CAPACITY: u64 = 512;

/// A loaded game together with its resolved table routes.
#[derive(Debug, Clone, PartialEq)]
pub struct GameContext {
    pub game: Game,
    pub routes: SchemaRoutes,
}

impl GameContext {
    pub fn new(game: Game) -> Result<Self, DomainError> {
        let routes = game.routes()?;
        Ok(Self { game, routes })
    }

    pub fn game_id(&self) -> Uuid {
        self.game.id
    }
}

fn game_not_found(game_id: Uuid) -> DomainError {
    DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
}

pub struct GameService {
    repo: Arc<dyn GameRepo>,
    admins: Arc<dyn AdminRepo>,
    contexts: Cache<Uuid, Arc<GameContext>>,
}

impl GameService {
    pub fn new(repo: Arc<dyn GameRepo>, admins: Arc<dyn AdminRepo>) -> Self {
        Self::with_ttl(repo, admins, ROUTES_TTL)
    }

    pub fn with_ttl(repo: Arc<dyn GameRepo>, admins: Arc<dyn AdminRepo>, ttl: Duration) -> Self {
        Self {
            repo,
            admins,
            contexts: Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// All games, ordered by name.
    pub async fn list(&self) -> Result<Vec<Game>, DomainError> {
        self.repo.list_games().await
    }

    /// Load a game and its routes, from cache when fresh.
    pub async fn load(&self, game_id: Uuid) -> Result<Arc<GameContext>, DomainError> {
        if let Some(ctx) = self.contexts.get(&game_id).await {
            debug!(game_id = %game_id, "game context cache hit");
            return Ok(ctx);
        }

        let game = self
            .repo
            .find_game(game_id)
            .await?
            .ok_or_else(|| game_not_found(game_id))?;
        self.remember(game).await
    }

    pub async fn load_by_slug(&self, slug: &str) -> Result<Arc<GameContext>, DomainError> {
        let game = self
            .repo
            .find_game_by_slug(slug)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Game, format!("Game '{slug}' not found"))
            })?;
        self.remember(game).await
    }

    async fn remember(&self, game: Game) -> Result<Arc<GameContext>, DomainError> {
        let ctx = Arc::new(GameContext::new(game)?);
        info!(
            game_id = %ctx.game.id,
            features = ?ctx.routes.features(),
            "game routes resolved"
        );
        self.contexts.insert(ctx.game.id, ctx.clone()).await;
        Ok(ctx)
    }

    /// Drop a cached context so the next load re-reads metadata.
    pub async fn invalidate(&self, game_id: Uuid) {
        self.contexts.invalidate(&game_id).await;
    }

    /// Slugs are unique across games; `except` is the game being edited.
    async fn ensure_slug_free(
        &self,
        game: &NewGame,
        except: Option<Uuid>,
    ) -> Result<(), DomainError> {
        match self.repo.find_game_by_slug(&game.slug).await? {
            Some(other) if Some(other.id) != except => Err(DomainError::conflict(
                ConflictKind::SlugTaken,
                format!("Game slug already in use: {}", game.slug),
            )),
            _ => Ok(()),
        }
    }

    /// Admin-only. Table entries in the metadata must be plain identifiers.
    pub async fn create_game(
        &self,
        draft: &GameDraft,
        user_id: Uuid,
    ) -> Result<Arc<GameContext>, DomainError> {
        require_admin(self.admins.as_ref(), user_id).await?;
        let new_game = draft.validate()?;
        self.ensure_slug_free(&new_game, None).await?;

        let game_id = self.repo.insert_game(&new_game).await?;
        info!(game_id = %game_id, slug = %new_game.slug, by = %user_id, "game created");
        self.invalidate(game_id).await;
        self.load(game_id).await
    }

    /// Admin-only. Replaces name, slug, icon, status and metadata, then
    /// drops the cached routes so the new tables apply immediately.
    pub async fn update_game(
        &self,
        game_id: Uuid,
        draft: &GameDraft,
        user_id: Uuid,
    ) -> Result<Arc<GameContext>, DomainError> {
        require_admin(self.admins.as_ref(), user_id).await?;
        let new_game = draft.validate()?;
        self.ensure_slug_free(&new_game, Some(game_id)).await?;

        if !self.repo.update_game(game_id, &new_game).await? {
            return Err(game_not_found(game_id));
        }
        info!(game_id = %game_id, slug = %new_game.slug, by = %user_id, "game updated");
        self.invalidate(game_id).await;
        self.load(game_id).await
    }
}

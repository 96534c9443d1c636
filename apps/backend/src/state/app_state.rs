use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::adapters::{
    AdminRepoSea, CommentRepoSea, EquipmentRepoSea, GameRepoSea, MemoryStore, PostRepoSea,
    TeamRepoSea, UnitRepoSea,
};
use crate::repos::{AdminRepo, CommentRepo, EquipmentRepo, GameRepo, PostRepo, TeamRepo, UnitRepo};
use crate::services::{DiscussionService, GameService, TeamService, UnitService};

/// One implementation of every repository trait.
#[derive(Clone)]
pub struct Repos {
    pub games: Arc<dyn GameRepo>,
    pub units: Arc<dyn UnitRepo>,
    pub equipment: Arc<dyn EquipmentRepo>,
    pub teams: Arc<dyn TeamRepo>,
    pub admins: Arc<dyn AdminRepo>,
    pub posts: Arc<dyn PostRepo>,
    pub comments: Arc<dyn CommentRepo>,
}

impl Repos {
    /// SeaORM adapters sharing one connection pool.
    pub fn postgres(db: DatabaseConnection) -> Self {
        Self {
            games: Arc::new(GameRepoSea::new(db.clone())),
            units: Arc::new(UnitRepoSea::new(db.clone())),
            equipment: Arc::new(EquipmentRepoSea::new(db.clone())),
            teams: Arc::new(TeamRepoSea::new(db.clone())),
            admins: Arc::new(AdminRepoSea::new(db.clone())),
            posts: Arc::new(PostRepoSea::new(db.clone())),
            comments: Arc::new(CommentRepoSea::new(db)),
        }
    }

    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            games: store.clone(),
            units: store.clone(),
            equipment: store.clone(),
            teams: store.clone(),
            admins: store.clone(),
            posts: store.clone(),
            comments: store,
        }
    }
}

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (absent when running on the in-memory store)
    pub db: Option<DatabaseConnection>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    pub games: Arc<GameService>,
    pub units: Arc<UnitService>,
    pub teams: Arc<TeamService>,
    pub discussion: Arc<DiscussionService>,
    pub admins: Arc<dyn AdminRepo>,
}

impl AppState {
    pub fn new(db: Option<DatabaseConnection>, repos: Repos, security: SecurityConfig) -> Self {
        Self {
            db,
            security,
            games: Arc::new(GameService::new(repos.games, repos.admins.clone())),
            units: Arc::new(UnitService::new(
                repos.units.clone(),
                repos.equipment,
                repos.admins.clone(),
            )),
            teams: Arc::new(TeamService::new(
                repos.teams.clone(),
                repos.units,
                repos.admins.clone(),
                repos.comments.clone(),
            )),
            discussion: Arc::new(DiscussionService::new(
                repos.posts,
                repos.comments,
                repos.teams,
                repos.admins.clone(),
            )),
            admins: repos.admins,
        }
    }

    /// State backed by an in-memory store, for tests and local demos.
    pub fn in_memory(store: Arc<MemoryStore>, security: SecurityConfig) -> Self {
        Self::new(None, Repos::memory(store), security)
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}

use std::sync::Arc;

use tracing::info;

use crate::adapters::MemoryStore;
use crate::config::db::DbKind;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::{AppState, Repos};
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_kind: DbKind,
    store: Option<Arc<MemoryStore>>,
    repos: Option<Repos>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_kind: DbKind::Memory,
            store: None,
            repos: None,
        }
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = kind;
        self
    }

    /// Use a pre-seeded store instead of an empty one. Implies `DbKind::Memory`.
    pub fn with_memory_store(mut self, store: Arc<MemoryStore>) -> Self {
        self.db_kind = DbKind::Memory;
        self.store = Some(store);
        self
    }

    /// Inject repositories directly, e.g. a failing team repo in tests.
    /// Takes precedence over the database choice.
    pub fn with_repos(mut self, repos: Repos) -> Self {
        self.repos = Some(repos);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        if let Some(repos) = self.repos {
            return Ok(AppState::new(None, repos, self.security_config));
        }

        match self.db_kind {
            DbKind::Postgres(profile) => {
                // single entrypoint: build + migrate
                let conn = bootstrap_db(profile).await?;
                let repos = Repos::postgres(conn.clone());
                Ok(AppState::new(Some(conn), repos, self.security_config))
            }
            DbKind::Memory => {
                info!("using in-memory store");
                let store = self.store.unwrap_or_default();
                Ok(AppState::in_memory(store, self.security_config))
            }
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

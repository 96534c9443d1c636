//! SeaORM adapter for the game catalog.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use tracing::warn;
use uuid::Uuid;

use crate::domain::game::{Game, GameMetadata, GameStatus, NewGame};
use crate::entities::games;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;
use crate::repos::games::GameRepo;

/// SeaORM implementation of GameRepo.
#[derive(Debug, Clone)]
pub struct GameRepoSea {
    db: DatabaseConnection,
}

impl GameRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Convert a stored row into the domain game.
///
/// A missing status reads as active; a metadata document that does not
/// have the expected shape is data corruption.
pub fn game_from_row(row: games::Model) -> Result<Game, DomainError> {
    let status = match row.status.as_deref() {
        None => GameStatus::default(),
        Some(raw) => raw.parse()?,
    };

    let metadata = match row.metadata {
        None | Some(serde_json::Value::Null) => GameMetadata::default(),
        Some(value) => serde_json::from_value(value).map_err(|e| {
            warn!(game_id = %row.id, error = %e, "malformed game metadata");
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Malformed metadata for game {}", row.id),
            )
        })?,
    };

    Ok(Game {
        id: row.id,
        name: row.name,
        slug: row.slug,
        icon_url: row.icon_url,
        status,
        metadata,
    })
}

/// Writable columns of a game row; the id is left for the caller.
fn active_model(game: &NewGame) -> Result<games::ActiveModel, DomainError> {
    let metadata = serde_json::to_value(&game.metadata).map_err(|e| {
        DomainError::infra(InfraErrorKind::Other("Serialize".into()), e.to_string())
    })?;

    Ok(games::ActiveModel {
        id: NotSet,
        name: Set(game.name.clone()),
        slug: Set(game.slug.clone()),
        icon_url: Set(game.icon_url.clone()),
        status: Set(Some(game.status.as_str().to_string())),
        metadata: Set(Some(metadata)),
    })
}

#[async_trait]
impl GameRepo for GameRepoSea {
    async fn list_games(&self) -> Result<Vec<Game>, DomainError> {
        let rows = games::Entity::find()
            .order_by_asc(games::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        rows.into_iter().map(game_from_row).collect()
    }

    async fn find_game(&self, game_id: Uuid) -> Result<Option<Game>, DomainError> {
        games::Entity::find_by_id(game_id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(game_from_row)
            .transpose()
    }

    async fn find_game_by_slug(&self, slug: &str) -> Result<Option<Game>, DomainError> {
        games::Entity::find()
            .filter(games::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(game_from_row)
            .transpose()
    }

    async fn insert_game(&self, game: &NewGame) -> Result<Uuid, DomainError> {
        let mut model = active_model(game)?;
        model.id = Set(Uuid::new_v4());

        let row = model.insert(&self.db).await.map_err(map_db_err)?;
        Ok(row.id)
    }

    async fn update_game(&self, game_id: Uuid, game: &NewGame) -> Result<bool, DomainError> {
        let res = games::Entity::update_many()
            .set(active_model(game)?)
            .filter(games::Column::Id.eq(game_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(res.rows_affected > 0)
    }
}

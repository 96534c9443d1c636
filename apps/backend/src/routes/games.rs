//! Game catalog routes.

use actix_web::{web, HttpResponse, Result};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use super::{game_context, parse_id};
use crate::domain::game::{Game, GameDraft, GameMetadata, GameStatus};
use crate::domain::schema_router::{EntityKind, FeatureSet};
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::services::GameContext;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct GameResponse {
    id: Uuid,
    name: String,
    slug: String,
    icon_url: Option<String>,
    status: GameStatus,
    features: FeatureSet,
    /// Enabled kinds in navigation order.
    navigation: Vec<EntityKind>,
}

impl GameResponse {
    fn new(game: &Game, features: FeatureSet) -> Self {
        Self {
            id: game.id,
            name: game.name.clone(),
            slug: game.slug.clone(),
            icon_url: game.icon().map(str::to_string),
            status: game.status,
            navigation: features.enabled().collect(),
            features,
        }
    }

    fn from_context(ctx: &GameContext) -> Self {
        Self::new(&ctx.game, ctx.routes.features())
    }
}

/// Admin view of a saved game: the public shape plus the stored metadata.
#[derive(Debug, Serialize)]
struct SavedGameResponse {
    #[serde(flatten)]
    game: GameResponse,
    metadata: GameMetadata,
}

impl SavedGameResponse {
    fn from_context(ctx: &GameContext) -> Self {
        Self {
            game: GameResponse::from_context(ctx),
            metadata: ctx.game.metadata.clone(),
        }
    }
}

/// GET /api/games
async fn list_games(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let games = app_state.games.list().await?;
    let body: Vec<GameResponse> = games
        .iter()
        .map(|game| {
            // A broken catalog entry should not take the whole list down.
            let features = match game.routes() {
                Ok(routes) => routes.features(),
                Err(e) => {
                    warn!(game_id = %game.id, error = %e, "game metadata unreadable");
                    FeatureSet::default()
                }
            };
            GameResponse::new(game, features)
        })
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/games/{game_id}
async fn get_game(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ctx = game_context(&app_state, &path).await?;
    Ok(HttpResponse::Ok().json(GameResponse::from_context(&ctx)))
}

/// GET /api/games/by-slug/{slug}
async fn get_game_by_slug(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ctx = app_state.games.load_by_slug(&path).await?;
    Ok(HttpResponse::Ok().json(GameResponse::from_context(&ctx)))
}

/// POST /api/games (admin)
async fn create_game(
    user: CurrentUser,
    body: ValidatedJson<GameDraft>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ctx = app_state.games.create_game(&body, user.user_id).await?;
    Ok(HttpResponse::Created().json(SavedGameResponse::from_context(&ctx)))
}

/// PUT /api/games/{game_id} (admin)
async fn update_game(
    path: web::Path<String>,
    user: CurrentUser,
    body: ValidatedJson<GameDraft>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game_id = parse_id(&path, "game")?;
    let ctx = app_state
        .games
        .update_game(game_id, &body, user.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(SavedGameResponse::from_context(&ctx)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_games))
            .route(web::post().to(create_game)),
    );
    cfg.service(web::resource("/by-slug/{slug}").route(web::get().to(get_game_by_slug)));
    cfg.service(
        web::resource("/{game_id}")
            .route(web::get().to(get_game))
            .route(web::put().to(update_game)),
    );
}

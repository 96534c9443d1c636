use std::sync::Arc;

use actix_web::web;
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::GameContext;
use crate::state::app_state::AppState;

pub mod discussion;
pub mod games;
pub mod health;
pub mod me;
pub mod teams;
pub mod units;

/// Configure application routes.
///
/// Shared by `main.rs` and the HTTP tests; middleware is wrapped around the
/// `App` by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Caller routes: /api/me/**
    cfg.service(web::scope("/api/me").configure(me::configure_routes));

    // Game routes: /api/games/**
    cfg.service(
        web::scope("/api/games")
            .configure(games::configure_routes)
            .configure(units::configure_routes)
            .configure(teams::configure_routes)
            .configure(discussion::configure_routes),
    );
}

/// Parse a UUID path segment.
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidId, format!("Invalid {what} id: {raw}"))
    })
}

/// Resolve the `{game_id}` segment to a cached game context.
pub(crate) async fn game_context(
    state: &AppState,
    raw_game_id: &str,
) -> Result<Arc<GameContext>, AppError> {
    let game_id = parse_id(raw_game_id, "game")?;
    Ok(state.games.load(game_id).await?)
}

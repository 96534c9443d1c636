//! Team routes. Create and edit replay the payload through the builder in
//! the service, so nothing here re-checks formation rules.

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use uuid::Uuid;

use super::{game_context, parse_id};
use crate::domain::formation::GameMode;
use crate::domain::team::TeamFilter;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{CurrentUser, MaybeUser, ValidatedJson};
use crate::services::TeamDraft;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct TeamListQuery {
    mode: Option<String>,
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TeamPayload {
    name: String,
    mode: GameMode,
    #[serde(default)]
    front: Vec<Uuid>,
    #[serde(default)]
    back: Vec<Uuid>,
    #[serde(default, alias = "pet_id")]
    companion_id: Option<Uuid>,
}

impl From<TeamPayload> for TeamDraft {
    fn from(p: TeamPayload) -> Self {
        TeamDraft {
            name: p.name,
            mode: p.mode,
            front: p.front,
            back: p.back,
            companion_id: p.companion_id,
        }
    }
}

fn parse_filter(query: TeamListQuery) -> Result<TeamFilter, AppError> {
    let mode = match query.mode.as_deref() {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(
            raw.parse::<GameMode>()
                .map_err(|e| AppError::bad_request(ErrorCode::BadRequest, e))?,
        ),
    };
    Ok(TeamFilter {
        mode,
        query: query.q,
    })
}

/// GET /api/games/{game_id}/teams?mode=&q=
async fn list_teams(
    path: web::Path<String>,
    query: web::Query<TeamListQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ctx = game_context(&app_state, &path).await?;
    let filter = parse_filter(query.into_inner())?;
    let teams = app_state.teams.list(&ctx, &filter).await?;
    Ok(HttpResponse::Ok().json(teams))
}

/// GET /api/games/{game_id}/teams/{team_id}
async fn get_team(
    path: web::Path<(String, String)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (game_id, team_id) = path.into_inner();
    let ctx = game_context(&app_state, &game_id).await?;
    let team_id = parse_id(&team_id, "team")?;
    let detail = app_state.teams.detail(&ctx, team_id).await?;
    Ok(HttpResponse::Ok().json(detail))
}

/// POST /api/games/{game_id}/teams
///
/// Anonymous callers get through extraction so the builder can report
/// `AuthenticationRequired` after validating the draft.
async fn create_team(
    path: web::Path<String>,
    user: MaybeUser,
    body: ValidatedJson<TeamPayload>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ctx = game_context(&app_state, &path).await?;
    let owner = user.0.as_ref().map(CurrentUser::owner);
    let draft = TeamDraft::from(body.into_inner());
    let team = app_state.teams.create(&ctx, owner.as_ref(), &draft).await?;
    Ok(HttpResponse::Created().json(team))
}

/// PUT /api/games/{game_id}/teams/{team_id}
async fn update_team(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    body: ValidatedJson<TeamPayload>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (game_id, team_id) = path.into_inner();
    let ctx = game_context(&app_state, &game_id).await?;
    let team_id = parse_id(&team_id, "team")?;
    let owner = user.owner();
    let draft = TeamDraft::from(body.into_inner());
    let team = app_state
        .teams
        .update(&ctx, Some(&owner), team_id, &draft)
        .await?;
    Ok(HttpResponse::Ok().json(team))
}

/// DELETE /api/games/{game_id}/teams/{team_id}
async fn delete_team(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (game_id, team_id) = path.into_inner();
    let ctx = game_context(&app_state, &game_id).await?;
    let team_id = parse_id(&team_id, "team")?;
    app_state.teams.delete(&ctx, user.user_id, team_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{game_id}/teams")
            .route(web::get().to(list_teams))
            .route(web::post().to(create_team)),
    );
    cfg.service(
        web::resource("/{game_id}/teams/{team_id}")
            .route(web::get().to(get_team))
            .route(web::put().to(update_team))
            .route(web::delete().to(delete_team)),
    );
}

//! Character, pet and equipment database routes.

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use super::{game_context, parse_id};
use crate::domain::schema_router::EntityKind;
use crate::domain::units::{EquipmentDraft, EquipmentFilter, UnitDraft};
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EquipmentQuery {
    q: Option<String>,
    #[serde(rename = "type")]
    equip_type: Option<String>,
}

async fn list_units(
    kind: EntityKind,
    game_id: &str,
    query: &SearchQuery,
    app_state: &AppState,
) -> Result<HttpResponse, AppError> {
    let ctx = game_context(app_state, game_id).await?;
    let units = app_state
        .units
        .list_units(&ctx, kind, query.q.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(units))
}

async fn get_unit(
    kind: EntityKind,
    (game_id, unit_id): &(String, String),
    app_state: &AppState,
) -> Result<HttpResponse, AppError> {
    let ctx = game_context(app_state, game_id).await?;
    let unit_id = parse_id(unit_id, kind.as_str())?;
    let unit = app_state.units.get_unit(&ctx, kind, unit_id).await?;
    Ok(HttpResponse::Ok().json(unit))
}

async fn create_unit(
    kind: EntityKind,
    game_id: &str,
    draft: &UnitDraft,
    user: &CurrentUser,
    app_state: &AppState,
) -> Result<HttpResponse, AppError> {
    let ctx = game_context(app_state, game_id).await?;
    let unit = app_state
        .units
        .create_unit(&ctx, kind, draft, user.user_id)
        .await?;
    Ok(HttpResponse::Created().json(unit))
}

async fn update_unit(
    kind: EntityKind,
    (game_id, unit_id): &(String, String),
    draft: &UnitDraft,
    user: &CurrentUser,
    app_state: &AppState,
) -> Result<HttpResponse, AppError> {
    let ctx = game_context(app_state, game_id).await?;
    let unit_id = parse_id(unit_id, kind.as_str())?;
    let unit = app_state
        .units
        .update_unit(&ctx, kind, unit_id, draft, user.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(unit))
}

async fn delete_unit(
    kind: EntityKind,
    (game_id, unit_id): &(String, String),
    user: &CurrentUser,
    app_state: &AppState,
) -> Result<HttpResponse, AppError> {
    let ctx = game_context(app_state, game_id).await?;
    let unit_id = parse_id(unit_id, kind.as_str())?;
    app_state
        .units
        .delete_unit(&ctx, kind, unit_id, user.user_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/games/{game_id}/characters
async fn list_characters(
    path: web::Path<String>,
    query: web::Query<SearchQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    list_units(EntityKind::Characters, &path, &query, &app_state).await
}

/// POST /api/games/{game_id}/characters (admin)
async fn create_character(
    path: web::Path<String>,
    user: CurrentUser,
    body: ValidatedJson<UnitDraft>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    create_unit(EntityKind::Characters, &path, &body, &user, &app_state).await
}

/// GET /api/games/{game_id}/characters/{unit_id}
async fn get_character(
    path: web::Path<(String, String)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    get_unit(EntityKind::Characters, &path, &app_state).await
}

/// PUT /api/games/{game_id}/characters/{unit_id} (admin)
async fn update_character(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    body: ValidatedJson<UnitDraft>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    update_unit(EntityKind::Characters, &path, &body, &user, &app_state).await
}

/// DELETE /api/games/{game_id}/characters/{unit_id} (admin)
async fn delete_character(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    delete_unit(EntityKind::Characters, &path, &user, &app_state).await
}

/// GET /api/games/{game_id}/pets
async fn list_pets(
    path: web::Path<String>,
    query: web::Query<SearchQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    list_units(EntityKind::Pets, &path, &query, &app_state).await
}

/// POST /api/games/{game_id}/pets (admin)
async fn create_pet(
    path: web::Path<String>,
    user: CurrentUser,
    body: ValidatedJson<UnitDraft>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    create_unit(EntityKind::Pets, &path, &body, &user, &app_state).await
}

/// GET /api/games/{game_id}/pets/{unit_id}
async fn get_pet(
    path: web::Path<(String, String)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    get_unit(EntityKind::Pets, &path, &app_state).await
}

/// PUT /api/games/{game_id}/pets/{unit_id} (admin)
async fn update_pet(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    body: ValidatedJson<UnitDraft>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    update_unit(EntityKind::Pets, &path, &body, &user, &app_state).await
}

/// DELETE /api/games/{game_id}/pets/{unit_id} (admin)
async fn delete_pet(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    delete_unit(EntityKind::Pets, &path, &user, &app_state).await
}

/// GET /api/games/{game_id}/equipment?q=&type=
async fn list_equipment(
    path: web::Path<String>,
    query: web::Query<EquipmentQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ctx = game_context(&app_state, &path).await?;
    let EquipmentQuery { q, equip_type } = query.into_inner();
    let filter = EquipmentFilter {
        query: q,
        equip_type,
    };
    let items = app_state.units.list_equipment(&ctx, &filter).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// POST /api/games/{game_id}/equipment (admin)
async fn create_equipment(
    path: web::Path<String>,
    user: CurrentUser,
    body: ValidatedJson<EquipmentDraft>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ctx = game_context(&app_state, &path).await?;
    let item = app_state
        .units
        .create_equipment(&ctx, &body, user.user_id)
        .await?;
    Ok(HttpResponse::Created().json(item))
}

/// GET /api/games/{game_id}/equipment/{equipment_id}
async fn get_equipment(
    path: web::Path<(String, String)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (game_id, equipment_id) = path.into_inner();
    let ctx = game_context(&app_state, &game_id).await?;
    let equipment_id = parse_id(&equipment_id, "equipment")?;
    let item = app_state.units.get_equipment(&ctx, equipment_id).await?;
    Ok(HttpResponse::Ok().json(item))
}

/// PUT /api/games/{game_id}/equipment/{equipment_id} (admin)
async fn update_equipment(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    body: ValidatedJson<EquipmentDraft>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (game_id, equipment_id) = path.into_inner();
    let ctx = game_context(&app_state, &game_id).await?;
    let equipment_id = parse_id(&equipment_id, "equipment")?;
    let item = app_state
        .units
        .update_equipment(&ctx, equipment_id, &body, user.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(item))
}

/// DELETE /api/games/{game_id}/equipment/{equipment_id} (admin)
async fn delete_equipment(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (game_id, equipment_id) = path.into_inner();
    let ctx = game_context(&app_state, &game_id).await?;
    let equipment_id = parse_id(&equipment_id, "equipment")?;
    app_state
        .units
        .delete_equipment(&ctx, equipment_id, user.user_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{game_id}/characters")
            .route(web::get().to(list_characters))
            .route(web::post().to(create_character)),
    );
    cfg.service(
        web::resource("/{game_id}/characters/{unit_id}")
            .route(web::get().to(get_character))
            .route(web::put().to(update_character))
            .route(web::delete().to(delete_character)),
    );
    cfg.service(
        web::resource("/{game_id}/pets")
            .route(web::get().to(list_pets))
            .route(web::post().to(create_pet)),
    );
    cfg.service(
        web::resource("/{game_id}/pets/{unit_id}")
            .route(web::get().to(get_pet))
            .route(web::put().to(update_pet))
            .route(web::delete().to(delete_pet)),
    );
    cfg.service(
        web::resource("/{game_id}/equipment")
            .route(web::get().to(list_equipment))
            .route(web::post().to(create_equipment)),
    );
    cfg.service(
        web::resource("/{game_id}/equipment/{equipment_id}")
            .route(web::get().to(get_equipment))
            .route(web::put().to(update_equipment))
            .route(web::delete().to(delete_equipment)),
    );
}

use actix_web::{web, HttpResponse, Result};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct AdminStatus {
    user_id: Uuid,
    display_name: String,
    is_admin: bool,
}

/// GET /api/me/admin
async fn admin_status(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let is_admin = app_state.admins.is_admin(user.user_id).await?;
    Ok(HttpResponse::Ok().json(AdminStatus {
        user_id: user.user_id,
        display_name: user.display_name,
        is_admin,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/admin").route(web::get().to(admin_status)));
}

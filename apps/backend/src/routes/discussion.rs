//! Discussion posts and comment threads on posts and saved teams.

use actix_web::{web, HttpResponse, Result};

use super::{game_context, parse_id};
use crate::domain::discussion::{CommentDraft, PostDraft, Thread};
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::state::app_state::AppState;

/// GET /api/games/{game_id}/posts
async fn list_posts(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ctx = game_context(&app_state, &path).await?;
    let posts = app_state.discussion.list_posts(&ctx).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// POST /api/games/{game_id}/posts
async fn create_post(
    path: web::Path<String>,
    user: CurrentUser,
    body: ValidatedJson<PostDraft>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ctx = game_context(&app_state, &path).await?;
    let post = app_state
        .discussion
        .create_post(&ctx, &user.owner(), &body)
        .await?;
    Ok(HttpResponse::Created().json(post))
}

/// GET /api/games/{game_id}/posts/{post_id}
async fn get_post(
    path: web::Path<(String, String)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (game_id, post_id) = path.into_inner();
    let ctx = game_context(&app_state, &game_id).await?;
    let post_id = parse_id(&post_id, "post")?;
    let post = app_state.discussion.get_post(&ctx, post_id).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/games/{game_id}/posts/{post_id} (author or admin)
async fn delete_post(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (game_id, post_id) = path.into_inner();
    let ctx = game_context(&app_state, &game_id).await?;
    let post_id = parse_id(&post_id, "post")?;
    app_state
        .discussion
        .delete_post(&ctx, post_id, user.user_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn list_comments(
    game_id: &str,
    thread: Thread,
    app_state: &AppState,
) -> Result<HttpResponse, AppError> {
    let ctx = game_context(app_state, game_id).await?;
    let comments = app_state.discussion.list_comments(&ctx, thread).await?;
    Ok(HttpResponse::Ok().json(comments))
}

async fn add_comment(
    game_id: &str,
    thread: Thread,
    draft: &CommentDraft,
    user: &CurrentUser,
    app_state: &AppState,
) -> Result<HttpResponse, AppError> {
    let ctx = game_context(app_state, game_id).await?;
    let comment = app_state
        .discussion
        .add_comment(&ctx, thread, &user.owner(), draft)
        .await?;
    Ok(HttpResponse::Created().json(comment))
}

/// GET /api/games/{game_id}/posts/{post_id}/comments
async fn list_post_comments(
    path: web::Path<(String, String)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (game_id, post_id) = path.into_inner();
    let thread = Thread::post(parse_id(&post_id, "post")?);
    list_comments(&game_id, thread, &app_state).await
}

/// POST /api/games/{game_id}/posts/{post_id}/comments
async fn add_post_comment(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    body: ValidatedJson<CommentDraft>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (game_id, post_id) = path.into_inner();
    let thread = Thread::post(parse_id(&post_id, "post")?);
    add_comment(&game_id, thread, &body, &user, &app_state).await
}

/// GET /api/games/{game_id}/teams/{team_id}/comments
async fn list_team_comments(
    path: web::Path<(String, String)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (game_id, team_id) = path.into_inner();
    let thread = Thread::team(parse_id(&team_id, "team")?);
    list_comments(&game_id, thread, &app_state).await
}

/// POST /api/games/{game_id}/teams/{team_id}/comments
async fn add_team_comment(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    body: ValidatedJson<CommentDraft>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (game_id, team_id) = path.into_inner();
    let thread = Thread::team(parse_id(&team_id, "team")?);
    add_comment(&game_id, thread, &body, &user, &app_state).await
}

/// DELETE /api/games/{game_id}/comments/{comment_id} (author or admin)
async fn delete_comment(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (game_id, comment_id) = path.into_inner();
    let ctx = game_context(&app_state, &game_id).await?;
    let comment_id = parse_id(&comment_id, "comment")?;
    app_state
        .discussion
        .delete_comment(&ctx, comment_id, user.user_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{game_id}/posts")
            .route(web::get().to(list_posts))
            .route(web::post().to(create_post)),
    );
    cfg.service(
        web::resource("/{game_id}/posts/{post_id}")
            .route(web::get().to(get_post))
            .route(web::delete().to(delete_post)),
    );
    cfg.service(
        web::resource("/{game_id}/posts/{post_id}/comments")
            .route(web::get().to(list_post_comments))
            .route(web::post().to(add_post_comment)),
    );
    cfg.service(
        web::resource("/{game_id}/teams/{team_id}/comments")
            .route(web::get().to(list_team_comments))
            .route(web::post().to(add_team_comment)),
    );
    cfg.service(
        web::resource("/{game_id}/comments/{comment_id}")
            .route(web::delete().to(delete_comment)),
    );
}

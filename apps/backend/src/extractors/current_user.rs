use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use serde::Serialize;
use uuid::Uuid;

use super::auth_token::AuthToken;
use crate::auth::jwt::verify_access_token;
use crate::domain::team::Owner;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Signed-in caller, taken from a verified access token.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub display_name: String,
}

impl CurrentUser {
    pub fn owner(&self) -> Owner {
        Owner {
            user_id: self.user_id,
            display_name: self.display_name.clone(),
        }
    }
}

/// Caller if a token was sent. A token that is present but invalid is still
/// rejected.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

fn authenticate(req: &HttpRequest) -> Result<Option<CurrentUser>, AppError> {
    let Some(AuthToken { token }) = AuthToken::from_headers(req)? else {
        return Ok(None);
    };
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    let claims = verify_access_token(&token, &state.security)?;
    Ok(Some(CurrentUser {
        user_id: claims.sub,
        display_name: claims.display_name(),
        email: claims.email,
    }))
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            authenticate(req)
                .and_then(|user| user.ok_or_else(AppError::unauthorized_missing_bearer)),
        )
    }
}

impl FromRequest for MaybeUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(MaybeUser))
    }
}

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::auth::claims::{AccessClaims, UserMetadata};
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Token lifetime for locally minted tokens.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Mint an access token shaped like the provider's. Used by tests and
/// local tooling; production tokens come from the provider.
pub fn mint_access_token(
    sub: Uuid,
    email: Option<&str>,
    full_name: Option<&str>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;

    let claims = AccessClaims {
        sub,
        email: email.map(str::to_string),
        aud: security.audience.clone(),
        iat,
        exp: iat + ACCESS_TOKEN_TTL_SECS,
        user_metadata: UserMetadata {
            full_name: full_name.map(str::to_string),
        },
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify signature, expiry and audience, and return the claims.
pub fn verify_access_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<AccessClaims, AppError> {
    let mut validation = Validation::new(security.algorithm);
    validation.set_audience(&[security.audience.as_str()]);

    decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}

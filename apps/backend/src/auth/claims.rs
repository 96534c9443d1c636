//! Claims carried by access tokens from the managed auth provider.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ANONYMOUS: &str = "Anonymous";

/// Profile fields the provider copies into the token.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AccessClaims {
    /// Provider user id
    pub sub: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    pub aud: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl AccessClaims {
    /// Name shown on teams this user saves.
    pub fn display_name(&self) -> String {
        self.user_metadata
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(ANONYMOUS)
            .to_string()
    }
}

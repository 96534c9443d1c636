pub mod auth_token;
pub mod current_user;
pub mod validated_json;

pub use auth_token::AuthToken;
pub use current_user::{CurrentUser, MaybeUser};
pub use validated_json::ValidatedJson;

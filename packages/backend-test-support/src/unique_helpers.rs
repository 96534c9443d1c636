//! Unique test data, so tests sharing a store never collide.

use uuid::Uuid;

/// `{prefix}-{8 hex chars}`, usable as a game slug or team name.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("game");
/// assert_ne!(a, unique_str("game"));
/// assert!(a.starts_with("game-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &simple[..8])
}

/// Per-game table name in the `{prefix}_{kind}` style used by the catalog.
///
/// ```
/// use backend_test_support::unique_helpers::unique_table;
///
/// let t = unique_table("characters");
/// assert!(t.ends_with("_characters"));
/// assert!(t.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
/// ```
pub fn unique_table(kind: &str) -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("g{}_{kind}", &simple[..8])
}

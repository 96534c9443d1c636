//! Fixed-name tables. Per-game unit and team tables are addressed
//! dynamically by the adapters.

pub mod admins;
pub mod comments;
pub mod games;
pub mod posts;

pub use admins::Entity as Admins;
pub use admins::Model as Admin;
pub use comments::Entity as Comments;
pub use comments::Model as CommentRow;
pub use games::Entity as Games;
pub use games::Model as GameRow;
pub use posts::Entity as Posts;
pub use posts::Model as PostRow;

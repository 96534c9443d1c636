//! Repository traits for domain layer.
//!
//! Unit, equipment and team tables are chosen per game by the schema
//! router, so those traits take the resolved [`TableName`] on every call.

pub mod admins;
pub mod discussion;
pub mod equipment;
pub mod games;
pub mod teams;
pub mod units;

pub use admins::AdminRepo;
pub use discussion::{CommentRepo, PostRepo};
pub use equipment::EquipmentRepo;
pub use games::GameRepo;
pub use teams::TeamRepo;
pub use units::UnitRepo;

//! Repository implementations: SeaORM over Postgres, and an in-memory store.

mod dynamic;

pub mod admins_sea;
pub mod discussion_sea;
pub mod equipment_sea;
pub mod games_sea;
pub mod memory;
pub mod teams_sea;
pub mod units_sea;

pub use admins_sea::AdminRepoSea;
pub use discussion_sea::{CommentRepoSea, PostRepoSea};
pub use equipment_sea::EquipmentRepoSea;
pub use games_sea::GameRepoSea;
pub use memory::MemoryStore;
pub use teams_sea::TeamRepoSea;
pub use units_sea::UnitRepoSea;

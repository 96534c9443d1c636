//! Domain layer: pure game-community logic, no I/O.

pub mod builder;
pub mod discussion;
pub mod formation;
pub mod game;
pub mod schema_router;
pub mod team;
pub mod units;

#[cfg(test)]
mod tests_builder;
#[cfg(test)]
mod tests_formation;

// Re-exports for ergonomics
pub use builder::{BuilderState, TeamBuilder};
pub use discussion::{
    Comment, CommentDraft, NewComment, NewPost, Post, PostDraft, Thread, ThreadKind,
};
pub use formation::{
    CapacityLimit, Formation, FormationError, GameMode, Row, UnitId, ValidationIssue,
    BACK_CAPACITY, FRONT_CAPACITY,
};
pub use game::{slugify, Game, GameDraft, GameMetadata, GameStatus, NewGame, TablesMetadata};
pub use schema_router::{EntityKind, FeatureSet, SchemaRoutes, TableName};
pub use team::{filter_teams, NewTeam, Owner, Team, TeamFilter};
pub use units::{
    matches_query, resolve_formation, Equipment, EquipmentDraft, EquipmentFilter, FormationView,
    NewEquipment, NewUnit, SlotView, Unit, UnitDraft,
};

//! Application services. Each one owns the repositories it needs and
//! returns `DomainError`; HTTP mapping happens in the route layer.

pub mod access;
pub mod discussion;
pub mod games;
pub mod teams;
pub mod units;

pub use discussion::DiscussionService;
pub use games::{GameContext, GameService};
pub use teams::{TeamDetail, TeamDraft, TeamService};
pub use units::UnitService;

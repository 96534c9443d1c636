use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::formation::{Formation, GameMode, UnitId};
use crate::domain::units::matches_query;

/// Identity of the signed-in user saving a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub user_id: Uuid,
    pub display_name: String,
}

/// Team row ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    pub game_id: Uuid,
    pub name: String,
    pub mode: GameMode,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub formation: Formation,
    pub companion_id: Option<UnitId>,
    /// Display snapshot of the companion's image, filled in by the service.
    pub companion_image_url: Option<String>,
}

/// Persisted team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: Uuid,
    pub game_id: Uuid,
    pub name: String,
    pub mode: GameMode,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub formation: Formation,
    pub companion_id: Option<UnitId>,
    pub companion_image_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Team list filters.
#[derive(Debug, Clone, Default)]
pub struct TeamFilter {
    pub mode: Option<GameMode>,
    pub query: Option<String>,
}

impl TeamFilter {
    /// Mode must match exactly; the query matches team name or owner name.
    pub fn matches(&self, team: &Team) -> bool {
        if self.mode.is_some_and(|mode| mode != team.mode) {
            return false;
        }
        match self.query.as_deref() {
            Some(q) => matches_query(&team.name, q) || matches_query(&team.owner_name, q),
            None => true,
        }
    }
}

/// Teams newest first, filtered.
pub fn filter_teams(mut teams: Vec<Team>, filter: &TeamFilter) -> Vec<Team> {
    teams.retain(|team| filter.matches(team));
    teams.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    teams
}

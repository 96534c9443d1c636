//! Front/back formation rules.
//!
//! Rows are dense lists of unit ids in insertion order; a row's capacity is
//! simply the maximum list length. The game mode adds a combined cap across
//! both rows that is independent of the per-row caps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub type UnitId = Uuid;

pub const FRONT_CAPACITY: usize = 5;
pub const BACK_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Row {
    Front,
    Back,
}

impl Row {
    pub const fn capacity(self) -> usize {
        match self {
            Row::Front => FRONT_CAPACITY,
            Row::Back => BACK_CAPACITY,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Row::Front => "front",
            Row::Back => "back",
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity a team is built for. Determines the combined unit cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    Arena,
    GuildWar,
}

impl GameMode {
    pub const fn total_cap(self) -> usize {
        match self {
            GameMode::Arena => 5,
            GameMode::GuildWar => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            GameMode::Arena => "Arena",
            GameMode::GuildWar => "GuildWar",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Arena" => Ok(GameMode::Arena),
            "GuildWar" => Ok(GameMode::GuildWar),
            other => Err(format!("unknown game mode: {other:?}")),
        }
    }
}

/// Which cap an `add` ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityLimit {
    Total { mode: GameMode, cap: usize },
    Row { row: Row, cap: usize },
}

impl fmt::Display for CapacityLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityLimit::Total { mode, cap } => write!(f, "{mode} allows at most {cap} units"),
            CapacityLimit::Row { row, cap } => write!(f, "{row} row holds at most {cap} units"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyName,
    NoUnits,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyName => f.write_str("team name must not be empty"),
            ValidationIssue::NoUnits => f.write_str("select at least one unit"),
        }
    }
}

/// Errors raised while arranging or committing a formation.
///
/// Every variant is recoverable; none of them leaves a session half-mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormationError {
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(CapacityLimit),
    #[error("unit {0} is already in the formation")]
    DuplicateUnit(UnitId),
    #[error("validation failed: {0}")]
    ValidationFailed(ValidationIssue),
    #[error("failed to save team: {detail}")]
    PersistenceFailed { detail: String },
    #[error("sign in to save a team")]
    AuthenticationRequired,
    #[error("{occupied} units assigned but {mode} allows {cap}")]
    ModeOverCapacity {
        mode: GameMode,
        occupied: usize,
        cap: usize,
    },
    #[error("a save is already in progress")]
    CommitInProgress,
    #[error("team builder session is closed")]
    SessionClosed,
}

/// Unit arrangement across the two rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    #[serde(default)]
    pub front: Vec<UnitId>,
    #[serde(default)]
    pub back: Vec<UnitId>,
}

impl Formation {
    pub fn row(&self, row: Row) -> &[UnitId] {
        match row {
            Row::Front => &self.front,
            Row::Back => &self.back,
        }
    }

    fn row_mut(&mut self, row: Row) -> &mut Vec<UnitId> {
        match row {
            Row::Front => &mut self.front,
            Row::Back => &mut self.back,
        }
    }

    pub fn occupied(&self) -> usize {
        self.front.len() + self.back.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied() == 0
    }

    pub fn contains(&self, unit_id: UnitId) -> bool {
        self.front.contains(&unit_id) || self.back.contains(&unit_id)
    }

    /// All unit ids, front row first.
    pub fn unit_ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.front.iter().chain(self.back.iter()).copied()
    }

    /// Append `unit_id` to `row`.
    ///
    /// Checks run in a fixed order and the first failure wins: the mode's
    /// combined cap, then uniqueness across rows, then the row's own cap.
    pub fn add(
        &mut self,
        unit_id: UnitId,
        row: Row,
        mode: GameMode,
    ) -> Result<(), FormationError> {
        let cap = mode.total_cap();
        if self.occupied() >= cap {
            return Err(FormationError::CapacityExceeded(CapacityLimit::Total {
                mode,
                cap,
            }));
        }
        if self.contains(unit_id) {
            return Err(FormationError::DuplicateUnit(unit_id));
        }
        let slots = self.row_mut(row);
        if slots.len() >= row.capacity() {
            return Err(FormationError::CapacityExceeded(CapacityLimit::Row {
                row,
                cap: row.capacity(),
            }));
        }
        slots.push(unit_id);
        Ok(())
    }

    /// Remove `unit_id` from `row`, shifting later slots forward.
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, unit_id: UnitId, row: Row) -> bool {
        let slots = self.row_mut(row);
        match slots.iter().position(|id| *id == unit_id) {
            Some(idx) => {
                slots.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Rebuild a formation from stored rows, re-applying every rule.
    pub fn rebuild(
        front: &[UnitId],
        back: &[UnitId],
        mode: GameMode,
    ) -> Result<Self, FormationError> {
        let mut formation = Formation::default();
        for id in front {
            formation.add(*id, Row::Front, mode)?;
        }
        for id in back {
            formation.add(*id, Row::Back, mode)?;
        }
        Ok(formation)
    }

    /// Like [`rebuild`](Self::rebuild), but entries that break a rule are
    /// skipped instead of failing the whole formation.
    ///
    /// Returns the surviving formation and one rejection per skipped entry,
    /// in the order they were met.
    pub fn rebuild_lenient(
        front: &[UnitId],
        back: &[UnitId],
        mode: GameMode,
    ) -> (Self, Vec<(UnitId, FormationError)>) {
        let mut formation = Formation::default();
        let mut rejected = Vec::new();
        let rows = front
            .iter()
            .map(|id| (*id, Row::Front))
            .chain(back.iter().map(|id| (*id, Row::Back)));
        for (id, row) in rows {
            if let Err(e) = formation.add(id, row, mode) {
                rejected.push((id, e));
            }
        }
        (formation, rejected)
    }
}

//! In-progress team building session.
//!
//! A `TeamBuilder` is owned by whoever drives the session (an HTTP handler
//! replaying a request, or a client). Saving is split in two so the
//! persistence call can happen outside the builder:
//!
//! 1. [`TeamBuilder::begin_commit`] validates and returns the [`NewTeam`] to
//!    insert. The session is marked as committing.
//! 2. [`TeamBuilder::finish_commit`] records the outcome. On failure the
//!    session reopens with every selection intact so the save can be retried.

use uuid::Uuid;

use crate::domain::formation::{Formation, FormationError, GameMode, Row, UnitId, ValidationIssue};
use crate::domain::team::{NewTeam, Owner, Team};

/// Occupancy/lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Empty,
    PartiallyFilled,
    /// Occupancy has reached the mode's combined cap.
    Full,
    Committed,
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Open,
    Committing,
    Committed(Uuid),
    Abandoned,
}

#[derive(Debug, Clone)]
pub struct TeamBuilder {
    game_id: Uuid,
    editing: Option<Uuid>,
    name: String,
    mode: GameMode,
    formation: Formation,
    companion: Option<UnitId>,
    phase: Phase,
}

impl TeamBuilder {
    pub fn new(game_id: Uuid, mode: GameMode) -> Self {
        Self {
            game_id,
            editing: None,
            name: String::new(),
            mode,
            formation: Formation::default(),
            companion: None,
            phase: Phase::Open,
        }
    }

    /// Reload a session from a stored team for the edit flow.
    ///
    /// The stored rows are re-applied under the team's mode; entries that
    /// would break a rule are left out of the session.
    pub fn from_team(team: &Team) -> Self {
        let (formation, _) =
            Formation::rebuild_lenient(&team.formation.front, &team.formation.back, team.mode);
        Self {
            game_id: team.game_id,
            editing: Some(team.id),
            name: team.name.clone(),
            mode: team.mode,
            formation,
            companion: team.companion_id,
            phase: Phase::Open,
        }
    }

    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    /// Team being edited, if this session was loaded from one.
    pub fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn companion(&self) -> Option<UnitId> {
        self.companion
    }

    pub fn is_committing(&self) -> bool {
        self.phase == Phase::Committing
    }

    pub fn state(&self) -> BuilderState {
        match self.phase {
            Phase::Committed(_) => BuilderState::Committed,
            Phase::Abandoned => BuilderState::Abandoned,
            Phase::Open | Phase::Committing => {
                let occupied = self.formation.occupied();
                if occupied == 0 {
                    BuilderState::Empty
                } else if occupied >= self.mode.total_cap() {
                    BuilderState::Full
                } else {
                    BuilderState::PartiallyFilled
                }
            }
        }
    }

    fn ensure_open(&self) -> Result<(), FormationError> {
        match self.phase {
            Phase::Open | Phase::Committing => Ok(()),
            Phase::Committed(_) | Phase::Abandoned => Err(FormationError::SessionClosed),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FormationError> {
        self.ensure_open()?;
        self.name = name.into();
        Ok(())
    }

    /// Switch mode. Refused while more units are assigned than the new mode
    /// allows; nothing is evicted.
    pub fn set_mode(&mut self, mode: GameMode) -> Result<(), FormationError> {
        self.ensure_open()?;
        let occupied = self.formation.occupied();
        if occupied > mode.total_cap() {
            return Err(FormationError::ModeOverCapacity {
                mode,
                occupied,
                cap: mode.total_cap(),
            });
        }
        self.mode = mode;
        Ok(())
    }

    pub fn add_unit(&mut self, unit_id: UnitId, row: Row) -> Result<(), FormationError> {
        self.ensure_open()?;
        self.formation.add(unit_id, row, self.mode)
    }

    /// No-op when the unit is not in `row`.
    pub fn remove_unit(&mut self, unit_id: UnitId, row: Row) -> Result<(), FormationError> {
        self.ensure_open()?;
        self.formation.remove(unit_id, row);
        Ok(())
    }

    /// Empty both rows, keeping name, mode, and companion.
    pub fn clear_formation(&mut self) -> Result<(), FormationError> {
        self.ensure_open()?;
        self.formation = Formation::default();
        Ok(())
    }

    pub fn select_companion(&mut self, unit_id: Option<UnitId>) -> Result<(), FormationError> {
        self.ensure_open()?;
        self.companion = unit_id;
        Ok(())
    }

    /// Validate the session and produce the row to persist.
    ///
    /// Checked in order: session open and not already saving, trimmed name
    /// non-empty, at least one unit assigned, an owner is signed in.
    pub fn begin_commit(&mut self, owner: Option<&Owner>) -> Result<NewTeam, FormationError> {
        match self.phase {
            Phase::Open => {}
            Phase::Committing => return Err(FormationError::CommitInProgress),
            Phase::Committed(_) | Phase::Abandoned => return Err(FormationError::SessionClosed),
        }

        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormationError::ValidationFailed(ValidationIssue::EmptyName));
        }
        if self.formation.is_empty() {
            return Err(FormationError::ValidationFailed(ValidationIssue::NoUnits));
        }
        let owner = owner.ok_or(FormationError::AuthenticationRequired)?;

        let new_team = NewTeam {
            game_id: self.game_id,
            name: name.to_string(),
            mode: self.mode,
            owner_id: owner.user_id,
            owner_name: owner.display_name.clone(),
            formation: self.formation.clone(),
            companion_id: self.companion,
            companion_image_url: None,
        };
        self.phase = Phase::Committing;
        Ok(new_team)
    }

    /// Record the persistence outcome of a commit started with
    /// [`begin_commit`](Self::begin_commit).
    pub fn finish_commit(
        &mut self,
        outcome: Result<Uuid, String>,
    ) -> Result<Uuid, FormationError> {
        if self.phase != Phase::Committing {
            return Err(FormationError::SessionClosed);
        }
        match outcome {
            Ok(team_id) => {
                self.phase = Phase::Committed(team_id);
                Ok(team_id)
            }
            Err(detail) => {
                self.phase = Phase::Open;
                Err(FormationError::PersistenceFailed { detail })
            }
        }
    }

    /// Discard the session.
    pub fn abandon(&mut self) {
        if !matches!(self.phase, Phase::Committed(_)) {
            self.phase = Phase::Abandoned;
        }
    }

    /// Id of the saved team once committed.
    pub fn committed_id(&self) -> Option<Uuid> {
        match self.phase {
            Phase::Committed(id) => Some(id),
            _ => None,
        }
    }
}

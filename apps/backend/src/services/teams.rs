//! Team list, detail and the save flows.
//!
//! Every create or edit request is replayed through a [`TeamBuilder`], so the
//! formation rules hold for HTTP clients exactly as they do for an
//! interactive session.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::games::GameContext;
use crate::domain::builder::TeamBuilder;
use crate::domain::discussion::Thread;
use crate::domain::formation::{FormationError, GameMode, Row, UnitId};
use crate::domain::schema_router::{EntityKind, TableName};
use crate::domain::team::{filter_teams, NewTeam, Owner, Team, TeamFilter};
use crate::domain::units::{resolve_formation, SlotView};
use crate::errors::domain::{DomainError, ForbiddenKind, NotFoundKind, ValidationKind};
use crate::repos::{AdminRepo, CommentRepo, TeamRepo, UnitRepo};

/// A submitted team, as the client arranged it.
#[derive(Debug, Clone)]
pub struct TeamDraft {
    pub name: String,
    pub mode: GameMode,
    pub front: Vec<UnitId>,
    pub back: Vec<UnitId>,
    pub companion_id: Option<UnitId>,
}

/// A team with its slots resolved against the current roster.
#[derive(Debug, Clone, Serialize)]
pub struct TeamDetail {
    #[serde(flatten)]
    pub team: Team,
    pub front: Vec<SlotView>,
    pub back: Vec<SlotView>,
    pub companion: Option<SlotView>,
}

pub struct TeamService {
    teams: Arc<dyn TeamRepo>,
    units: Arc<dyn UnitRepo>,
    admins: Arc<dyn AdminRepo>,
    comments: Arc<dyn CommentRepo>,
}

fn team_not_found(team_id: Uuid) -> DomainError {
    DomainError::not_found(NotFoundKind::Team, format!("Team {team_id} not found"))
}

/// Apply a draft on top of an open session.
///
/// The formation is cleared first so an edit replaces the stored arrangement
/// instead of appending to it. The mode switch happens on the empty
/// formation and therefore always succeeds.
fn replay(builder: &mut TeamBuilder, draft: &TeamDraft) -> Result<(), FormationError> {
    builder.clear_formation()?;
    builder.set_mode(draft.mode)?;
    builder.set_name(draft.name.as_str())?;
    for id in &draft.front {
        builder.add_unit(*id, Row::Front)?;
    }
    for id in &draft.back {
        builder.add_unit(*id, Row::Back)?;
    }
    builder.select_companion(draft.companion_id)
}

impl TeamService {
    pub fn new(
        teams: Arc<dyn TeamRepo>,
        units: Arc<dyn UnitRepo>,
        admins: Arc<dyn AdminRepo>,
        comments: Arc<dyn CommentRepo>,
    ) -> Self {
        Self {
            teams,
            units,
            admins,
            comments,
        }
    }

    /// Teams for this game, newest first.
    pub async fn list(
        &self,
        ctx: &GameContext,
        filter: &TeamFilter,
    ) -> Result<Vec<Team>, DomainError> {
        let table = ctx.routes.require_table(EntityKind::Teams)?;
        let teams = self.teams.list_teams(table, ctx.game_id()).await?;
        Ok(filter_teams(teams, filter))
    }

    async fn load_team(
        &self,
        ctx: &GameContext,
        table: &TableName,
        team_id: Uuid,
    ) -> Result<Team, DomainError> {
        self.teams
            .find_team(table, team_id)
            .await?
            .filter(|t| t.game_id == ctx.game_id())
            .ok_or_else(|| team_not_found(team_id))
    }

    pub async fn detail(
        &self,
        ctx: &GameContext,
        team_id: Uuid,
    ) -> Result<TeamDetail, DomainError> {
        let table = ctx.routes.require_table(EntityKind::Teams)?;
        let team = self.load_team(ctx, table, team_id).await?;

        let roster = match ctx.routes.resolve_table(EntityKind::Characters) {
            Some(characters) => self.units.list_units(characters, ctx.game_id()).await?,
            None => Vec::new(),
        };
        let view = resolve_formation(&team.formation, &roster);

        let companion = match team.companion_id {
            Some(pet_id) => Some(self.companion_slot(ctx, &team, pet_id).await?),
            None => None,
        };

        Ok(TeamDetail {
            team,
            front: view.front,
            back: view.back,
            companion,
        })
    }

    /// Live pet record when available, else the image snapshot taken at save.
    async fn companion_slot(
        &self,
        ctx: &GameContext,
        team: &Team,
        pet_id: UnitId,
    ) -> Result<SlotView, DomainError> {
        let live = match ctx.routes.resolve_table(EntityKind::Pets) {
            Some(pets) => self
                .units
                .find_unit(pets, pet_id)
                .await?
                .filter(|p| p.game_id == ctx.game_id()),
            None => None,
        };
        Ok(match live {
            Some(pet) => SlotView {
                unit_id: pet_id,
                name: Some(pet.name),
                image_url: pet.image_url,
            },
            None => SlotView {
                unit_id: pet_id,
                name: None,
                image_url: team.companion_image_url.clone(),
            },
        })
    }

    /// Every placed unit must be one of this game's characters and the
    /// companion one of its pets. Returns the companion's image snapshot.
    async fn check_roster(
        &self,
        ctx: &GameContext,
        new_team: &NewTeam,
    ) -> Result<Option<String>, DomainError> {
        let characters = ctx.routes.require_table(EntityKind::Characters)?;
        let roster: HashSet<UnitId> = self
            .units
            .list_units(characters, ctx.game_id())
            .await?
            .into_iter()
            .map(|u| u.id)
            .collect();

        if let Some(unknown) = new_team.formation.unit_ids().find(|id| !roster.contains(id)) {
            return Err(DomainError::validation(
                ValidationKind::UnknownUnit,
                format!("unit {unknown} is not a character of this game"),
            ));
        }

        let Some(pet_id) = new_team.companion_id else {
            return Ok(None);
        };
        let pets = ctx.routes.require_table(EntityKind::Pets)?;
        match self.units.find_unit(pets, pet_id).await? {
            Some(pet) if pet.game_id == ctx.game_id() => Ok(pet.image_url),
            _ => Err(DomainError::validation(
                ValidationKind::UnknownUnit,
                format!("companion {pet_id} is not a pet of this game"),
            )),
        }
    }

    /// Validate, check the roster and prepare the row. On a roster failure
    /// the session is abandoned.
    async fn prepare(
        &self,
        ctx: &GameContext,
        builder: &mut TeamBuilder,
        owner: Option<&Owner>,
    ) -> Result<NewTeam, DomainError> {
        let mut new_team = builder.begin_commit(owner)?;
        match self.check_roster(ctx, &new_team).await {
            Ok(snapshot) => {
                new_team.companion_image_url = snapshot;
                Ok(new_team)
            }
            Err(e) => {
                builder.abandon();
                Err(e)
            }
        }
    }

    pub async fn create(
        &self,
        ctx: &GameContext,
        owner: Option<&Owner>,
        draft: &TeamDraft,
    ) -> Result<Team, DomainError> {
        let table = ctx.routes.require_table(EntityKind::Teams)?;

        let mut builder = TeamBuilder::new(ctx.game_id(), draft.mode);
        replay(&mut builder, draft)?;
        let new_team = self.prepare(ctx, &mut builder, owner).await?;

        let outcome = self.teams.insert_team(table, &new_team).await.map_err(|e| {
            error!(game_id = %ctx.game_id(), table = %table, error = %e, "team insert failed");
            e.to_string()
        });
        let team_id = builder.finish_commit(outcome)?;

        info!(game_id = %ctx.game_id(), team_id = %team_id, mode = %new_team.mode, "team created");
        Ok(Team {
            id: team_id,
            game_id: new_team.game_id,
            name: new_team.name,
            mode: new_team.mode,
            owner_id: new_team.owner_id,
            owner_name: new_team.owner_name,
            formation: new_team.formation,
            companion_id: new_team.companion_id,
            companion_image_url: new_team.companion_image_url,
            created_at: OffsetDateTime::now_utc(),
        })
    }

    /// Owner-only edit. The builder is reloaded from the stored team and the
    /// draft applied on top.
    pub async fn update(
        &self,
        ctx: &GameContext,
        owner: Option<&Owner>,
        team_id: Uuid,
        draft: &TeamDraft,
    ) -> Result<Team, DomainError> {
        let owner = owner.ok_or(FormationError::AuthenticationRequired)?;
        let table = ctx.routes.require_table(EntityKind::Teams)?;
        let stored = self.load_team(ctx, table, team_id).await?;
        if stored.owner_id != owner.user_id {
            warn!(team_id = %team_id, user_id = %owner.user_id, "edit refused for non-owner");
            return Err(DomainError::forbidden(
                ForbiddenKind::NotOwner,
                "Only the team owner can edit this team",
            ));
        }

        let mut builder = TeamBuilder::from_team(&stored);
        replay(&mut builder, draft)?;
        let new_team = self.prepare(ctx, &mut builder, Some(owner)).await?;

        let outcome = match self.teams.update_team(table, team_id, &new_team).await {
            Ok(true) => Ok(team_id),
            Ok(false) => {
                builder.abandon();
                return Err(team_not_found(team_id));
            }
            Err(e) => {
                error!(
                    game_id = %ctx.game_id(),
                    team_id = %team_id,
                    error = %e,
                    "team update failed"
                );
                Err(e.to_string())
            }
        };
        builder.finish_commit(outcome)?;

        debug!(team_id = %team_id, "team updated");
        Ok(Team {
            name: new_team.name,
            mode: new_team.mode,
            formation: new_team.formation,
            companion_id: new_team.companion_id,
            companion_image_url: new_team.companion_image_url,
            ..stored
        })
    }

    /// Owners delete their own teams; admins may delete any.
    pub async fn delete(
        &self,
        ctx: &GameContext,
        user_id: Uuid,
        team_id: Uuid,
    ) -> Result<(), DomainError> {
        let table = ctx.routes.require_table(EntityKind::Teams)?;
        let stored = self.load_team(ctx, table, team_id).await?;
        if stored.owner_id != user_id && !self.admins.is_admin(user_id).await? {
            return Err(DomainError::forbidden(
                ForbiddenKind::NotOwner,
                "Only the team owner or an admin can delete this team",
            ));
        }

        if !self.teams.delete_team(table, team_id).await? {
            return Err(team_not_found(team_id));
        }
        let comments = self.comments.delete_thread(Thread::team(team_id)).await?;
        info!(
            game_id = %ctx.game_id(),
            team_id = %team_id,
            by = %user_id,
            comments,
            "team deleted"
        );
        Ok(())
    }
}

//! Character, pet and equipment databases.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::access::require_admin;
use super::games::GameContext;
use crate::domain::schema_router::EntityKind;
use crate::domain::units::{
    matches_query, Equipment, EquipmentDraft, EquipmentFilter, Unit, UnitDraft,
};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::{AdminRepo, EquipmentRepo, UnitRepo};

pub struct UnitService {
    units: Arc<dyn UnitRepo>,
    equipment: Arc<dyn EquipmentRepo>,
    admins: Arc<dyn AdminRepo>,
}

/// Only characters and pets live in unit tables.
fn unit_kind(kind: EntityKind) -> Result<EntityKind, DomainError> {
    match kind {
        EntityKind::Characters | EntityKind::Pets => Ok(kind),
        other => Err(DomainError::validation(
            ValidationKind::Other("UnitKind".into()),
            format!("{other} are not units"),
        )),
    }
}

fn unit_not_found(kind: EntityKind, unit_id: Uuid) -> DomainError {
    DomainError::not_found(
        NotFoundKind::Unit(kind),
        format!("{kind} entry {unit_id} not found"),
    )
}

fn equipment_not_found(equipment_id: Uuid) -> DomainError {
    DomainError::not_found(
        NotFoundKind::Equipment,
        format!("Equipment {equipment_id} not found"),
    )
}

impl UnitService {
    pub fn new(
        units: Arc<dyn UnitRepo>,
        equipment: Arc<dyn EquipmentRepo>,
        admins: Arc<dyn AdminRepo>,
    ) -> Self {
        Self {
            units,
            equipment,
            admins,
        }
    }

    /// Units of one kind for this game, filtered by name when `query` is set.
    pub async fn list_units(
        &self,
        ctx: &GameContext,
        kind: EntityKind,
        query: Option<&str>,
    ) -> Result<Vec<Unit>, DomainError> {
        let table = ctx.routes.require_table(unit_kind(kind)?)?;
        let mut units = self.units.list_units(table, ctx.game_id()).await?;
        if let Some(q) = query {
            units.retain(|u| matches_query(&u.name, q));
        }
        Ok(units)
    }

    pub async fn get_unit(
        &self,
        ctx: &GameContext,
        kind: EntityKind,
        unit_id: Uuid,
    ) -> Result<Unit, DomainError> {
        let table = ctx.routes.require_table(unit_kind(kind)?)?;
        self.units
            .find_unit(table, unit_id)
            .await?
            .filter(|u| u.game_id == ctx.game_id())
            .ok_or_else(|| unit_not_found(kind, unit_id))
    }

    /// Admin-only. The new entry belongs to this game.
    pub async fn create_unit(
        &self,
        ctx: &GameContext,
        kind: EntityKind,
        draft: &UnitDraft,
        user_id: Uuid,
    ) -> Result<Unit, DomainError> {
        require_admin(self.admins.as_ref(), user_id).await?;
        let table = ctx.routes.require_table(unit_kind(kind)?)?;
        let fields = draft.validate()?;

        let unit_id = self.units.insert_unit(table, ctx.game_id(), &fields).await?;
        info!(game_id = %ctx.game_id(), %kind, unit_id = %unit_id, by = %user_id, "unit created");
        self.get_unit(ctx, kind, unit_id).await
    }

    /// Admin-only. Overwrites every editable field.
    pub async fn update_unit(
        &self,
        ctx: &GameContext,
        kind: EntityKind,
        unit_id: Uuid,
        draft: &UnitDraft,
        user_id: Uuid,
    ) -> Result<Unit, DomainError> {
        require_admin(self.admins.as_ref(), user_id).await?;
        let table = ctx.routes.require_table(unit_kind(kind)?)?;
        let fields = draft.validate()?;
        self.get_unit(ctx, kind, unit_id).await?;

        if !self.units.update_unit(table, unit_id, &fields).await? {
            return Err(unit_not_found(kind, unit_id));
        }
        info!(game_id = %ctx.game_id(), %kind, unit_id = %unit_id, by = %user_id, "unit updated");
        self.get_unit(ctx, kind, unit_id).await
    }

    /// Admin-only removal of a character or pet entry.
    pub async fn delete_unit(
        &self,
        ctx: &GameContext,
        kind: EntityKind,
        unit_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), DomainError> {
        require_admin(self.admins.as_ref(), user_id).await?;
        let table = ctx.routes.require_table(unit_kind(kind)?)?;
        self.get_unit(ctx, kind, unit_id).await?;

        if !self.units.delete_unit(table, unit_id).await? {
            return Err(unit_not_found(kind, unit_id));
        }
        info!(
            game_id = %ctx.game_id(),
            %kind,
            unit_id = %unit_id,
            by = %user_id,
            "unit deleted"
        );
        Ok(())
    }

    pub async fn list_equipment(
        &self,
        ctx: &GameContext,
        filter: &EquipmentFilter,
    ) -> Result<Vec<Equipment>, DomainError> {
        let table = ctx.routes.require_table(EntityKind::Equipment)?;
        let mut items = self.equipment.list_equipment(table, ctx.game_id()).await?;
        items.retain(|e| filter.matches(e));
        Ok(items)
    }

    pub async fn get_equipment(
        &self,
        ctx: &GameContext,
        equipment_id: Uuid,
    ) -> Result<Equipment, DomainError> {
        let table = ctx.routes.require_table(EntityKind::Equipment)?;
        self.equipment
            .find_equipment(table, equipment_id)
            .await?
            .filter(|e| e.game_id == ctx.game_id())
            .ok_or_else(|| equipment_not_found(equipment_id))
    }

    pub async fn create_equipment(
        &self,
        ctx: &GameContext,
        draft: &EquipmentDraft,
        user_id: Uuid,
    ) -> Result<Equipment, DomainError> {
        require_admin(self.admins.as_ref(), user_id).await?;
        let table = ctx.routes.require_table(EntityKind::Equipment)?;
        let fields = draft.validate()?;

        let equipment_id = self
            .equipment
            .insert_equipment(table, ctx.game_id(), &fields)
            .await?;
        info!(
            game_id = %ctx.game_id(),
            equipment_id = %equipment_id,
            by = %user_id,
            "equipment created"
        );
        self.get_equipment(ctx, equipment_id).await
    }

    pub async fn update_equipment(
        &self,
        ctx: &GameContext,
        equipment_id: Uuid,
        draft: &EquipmentDraft,
        user_id: Uuid,
    ) -> Result<Equipment, DomainError> {
        require_admin(self.admins.as_ref(), user_id).await?;
        let table = ctx.routes.require_table(EntityKind::Equipment)?;
        let fields = draft.validate()?;
        self.get_equipment(ctx, equipment_id).await?;

        if !self
            .equipment
            .update_equipment(table, equipment_id, &fields)
            .await?
        {
            return Err(equipment_not_found(equipment_id));
        }
        info!(
            game_id = %ctx.game_id(),
            equipment_id = %equipment_id,
            by = %user_id,
            "equipment updated"
        );
        self.get_equipment(ctx, equipment_id).await
    }

    pub async fn delete_equipment(
        &self,
        ctx: &GameContext,
        equipment_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), DomainError> {
        require_admin(self.admins.as_ref(), user_id).await?;
        let table = ctx.routes.require_table(EntityKind::Equipment)?;
        self.get_equipment(ctx, equipment_id).await?;

        if !self.equipment.delete_equipment(table, equipment_id).await? {
            return Err(equipment_not_found(equipment_id));
        }
        info!(
            game_id = %ctx.game_id(),
            equipment_id = %equipment_id,
            by = %user_id,
            "equipment deleted"
        );
        Ok(())
    }
}

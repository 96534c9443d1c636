//! Per-game table routing.
//!
//! Each game keeps its characters, pets, equipment and teams in tables whose
//! names come from the game's metadata. `SchemaRoutes` is the typed view of
//! that metadata: a kind either resolves to a validated [`TableName`] or is
//! absent, in which case the feature is disabled for the game. There are no
//! fallback table names.

use std::fmt;

use lazy_regex::regex_is_match;
use serde::{Deserialize, Serialize};

use crate::domain::game::{GameMetadata, TablesMetadata};
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Logical entity collections a game may enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Characters,
    Pets,
    Equipment,
    Teams,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Characters,
        EntityKind::Pets,
        EntityKind::Equipment,
        EntityKind::Teams,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            EntityKind::Characters => "characters",
            EntityKind::Pets => "pets",
            EntityKind::Equipment => "equipment",
            EntityKind::Teams => "teams",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend table name that is safe to use as a quoted SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TableName(String);

impl TableName {
    /// Validate a raw table name.
    ///
    /// Accepts `[A-Za-z_][A-Za-z0-9_]*` up to 63 bytes, the length at which
    /// Postgres truncates identifiers.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if !regex_is_match!(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$", raw) {
            return Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("invalid table name in game metadata: {raw:?}"),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolved table names for one game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaRoutes {
    characters: Option<TableName>,
    pets: Option<TableName>,
    equipment: Option<TableName>,
    teams: Option<TableName>,
}

impl SchemaRoutes {
    /// Build routes from a game's metadata.
    ///
    /// Missing, empty, or whitespace-only entries are absent. A non-empty entry
    /// that is not a valid identifier is reported as data corruption rather
    /// than dropped, so a typo in metadata cannot silently hide a feature.
    pub fn from_metadata(metadata: &GameMetadata) -> Result<Self, DomainError> {
        let Some(tables) = metadata.tables.as_ref() else {
            return Ok(Self::default());
        };

        Ok(Self {
            characters: route_entry(tables, EntityKind::Characters)?,
            pets: route_entry(tables, EntityKind::Pets)?,
            equipment: route_entry(tables, EntityKind::Equipment)?,
            teams: route_entry(tables, EntityKind::Teams)?,
        })
    }

    /// Concrete table for `kind`, or `None` when the game does not enable it.
    pub fn resolve_table(&self, kind: EntityKind) -> Option<&TableName> {
        match kind {
            EntityKind::Characters => self.characters.as_ref(),
            EntityKind::Pets => self.pets.as_ref(),
            EntityKind::Equipment => self.equipment.as_ref(),
            EntityKind::Teams => self.teams.as_ref(),
        }
    }

    /// Like [`resolve_table`](Self::resolve_table) but absence is an error.
    pub fn require_table(&self, kind: EntityKind) -> Result<&TableName, DomainError> {
        self.resolve_table(kind).ok_or(DomainError::FeatureDisabled(kind))
    }

    pub fn features(&self) -> FeatureSet {
        FeatureSet {
            characters: self.characters.is_some(),
            pets: self.pets.is_some(),
            equipment: self.equipment.is_some(),
            teams: self.teams.is_some(),
        }
    }
}

fn route_entry(
    tables: &TablesMetadata,
    kind: EntityKind,
) -> Result<Option<TableName>, DomainError> {
    let raw = match kind {
        EntityKind::Characters => tables.characters.as_deref(),
        EntityKind::Pets => tables.pets.as_deref(),
        EntityKind::Equipment => tables.equipment.as_deref(),
        EntityKind::Teams => tables.teams.as_deref(),
    };

    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) => TableName::parse(name).map(Some),
    }
}

/// Which navigation entries a game page shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeatureSet {
    pub characters: bool,
    pub pets: bool,
    pub equipment: bool,
    pub teams: bool,
}

impl FeatureSet {
    pub fn is_enabled(&self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Characters => self.characters,
            EntityKind::Pets => self.pets,
            EntityKind::Equipment => self.equipment,
            EntityKind::Teams => self.teams,
        }
    }

    /// Enabled kinds in navigation order.
    pub fn enabled(&self) -> impl Iterator<Item = EntityKind> + '_ {
        EntityKind::ALL.into_iter().filter(|k| self.is_enabled(*k))
    }
}

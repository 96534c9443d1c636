use std::str::FromStr;

use lazy_regex::regex_replace_all;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::schema_router::{SchemaRoutes, TableName};
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

/// Publication status of a game page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Active,
    ComingSoon,
}

impl GameStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            GameStatus::Active => "active",
            GameStatus::ComingSoon => "coming_soon",
        }
    }
}

impl FromStr for GameStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(GameStatus::Active),
            "coming_soon" => Ok(GameStatus::ComingSoon),
            other => Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("unknown game status: {other:?}"),
            )),
        }
    }
}

/// Raw `metadata.tables` object as stored with the game row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablesMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pets: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<String>,
}

impl TablesMetadata {
    /// Trimmed copy with blank entries dropped.
    ///
    /// Used when metadata is written: an entry that is not a plain table
    /// identifier is rejected up front instead of surfacing later as
    /// corruption.
    pub fn normalized(&self) -> Result<Self, DomainError> {
        let entry = |raw: &Option<String>| -> Result<Option<String>, DomainError> {
            match raw.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(name) => match TableName::parse(name) {
                    Ok(table) => Ok(Some(table.as_str().to_string())),
                    Err(_) => Err(DomainError::validation(
                        ValidationKind::InvalidTableName,
                        format!("{name:?} is not a valid table name"),
                    )),
                },
            }
        };

        Ok(Self {
            characters: entry(&self.characters)?,
            pets: entry(&self.pets)?,
            equipment: entry(&self.equipment)?,
            teams: entry(&self.teams)?,
        })
    }
}

/// Game metadata column. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<TablesMetadata>,
}

/// A game community page.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub icon_url: Option<String>,
    pub status: GameStatus,
    pub metadata: GameMetadata,
}

impl Game {
    pub fn routes(&self) -> Result<SchemaRoutes, DomainError> {
        SchemaRoutes::from_metadata(&self.metadata)
    }

    /// Icon reference, treating the legacy `-` placeholder as missing.
    pub fn icon(&self) -> Option<&str> {
        self.icon_url
            .as_deref()
            .filter(|url| !url.is_empty() && *url != "-")
    }
}

/// URL slug derived the way the catalog always has: lowercase, spaces to
/// dashes, then everything but ASCII word characters and dashes removed.
pub fn slugify(raw: &str) -> String {
    let dashed = raw.trim().to_lowercase().replace(' ', "-");
    regex_replace_all!(r"[^A-Za-z0-9_-]+", &dashed, "").into_owned()
}

/// Admin-submitted game fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameDraft {
    pub name: String,
    /// Derived from the name when absent.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default)]
    pub metadata: GameMetadata,
}

/// Game row ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub name: String,
    pub slug: String,
    pub icon_url: Option<String>,
    pub status: GameStatus,
    pub metadata: GameMetadata,
}

impl GameDraft {
    pub fn validate(&self) -> Result<NewGame, DomainError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::Other("EmptyName".into()),
                "game name must not be empty",
            ));
        }

        let slug = slugify(self.slug.as_deref().unwrap_or(name));
        if slug.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::Other("EmptySlug".into()),
                "slug needs at least one ASCII letter, digit, '-' or '_'",
            ));
        }

        let tables = match &self.metadata.tables {
            Some(tables) => Some(tables.normalized()?),
            None => None,
        };

        Ok(NewGame {
            name: name.to_string(),
            slug,
            icon_url: self
                .icon_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty() && *url != "-")
                .map(str::to_string),
            status: self.status,
            metadata: GameMetadata { tables },
        })
    }
}

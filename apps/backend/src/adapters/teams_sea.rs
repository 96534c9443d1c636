//! SeaORM adapter for team tables.

use async_trait::async_trait;
use sea_orm::sea_query::{Order, Query, SelectStatement, SimpleExpr};
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult};
use serde_json::Value;
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use super::dynamic::{col, game_eq, id_eq, insert_returning_id, statement_err, table, touched_any};
use crate::domain::formation::{Formation, GameMode, UnitId};
use crate::domain::schema_router::TableName;
use crate::domain::team::{NewTeam, Team};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;
use crate::repos::teams::TeamRepo;

const COLUMNS: [&str; 10] = [
    "id",
    "game_id",
    "user_id",
    "username",
    "name",
    "mode",
    "formation",
    "pet_id",
    "pet_image_url",
    "created_at",
];

#[derive(Debug, FromQueryResult)]
struct TeamRow {
    id: Uuid,
    game_id: Uuid,
    user_id: Uuid,
    username: Option<String>,
    name: String,
    mode: String,
    formation: Value,
    pet_id: Option<Uuid>,
    pet_image_url: Option<String>,
    created_at: OffsetDateTime,
}

impl TryFrom<TeamRow> for Team {
    type Error = DomainError;

    fn try_from(row: TeamRow) -> Result<Self, Self::Error> {
        let mode: GameMode = row.mode.parse().map_err(|e: String| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("team {}: {e}", row.id),
            )
        })?;
        let formation = decode_formation(row.id, mode, &row.formation)?;

        Ok(Team {
            id: row.id,
            game_id: row.game_id,
            name: row.name,
            mode,
            owner_id: row.user_id,
            owner_name: row.username.unwrap_or_else(|| "Anonymous".to_string()),
            formation,
            companion_id: row.pet_id,
            companion_image_url: row.pet_image_url,
            created_at: row.created_at,
        })
    }
}

/// Read a stored formation document.
///
/// Older rows stored image URLs instead of unit ids; entries that are not
/// UUIDs are dropped with a warning. The remaining ids are re-applied under
/// the team's mode, and entries that break a rule (a repeated unit, a full
/// row, more units than the mode allows) are dropped with a warning too.
/// Anything that is not an object with optional `front`/`back` arrays is
/// data corruption.
pub fn decode_formation(
    team_id: Uuid,
    mode: GameMode,
    raw: &Value,
) -> Result<Formation, DomainError> {
    let Value::Object(map) = raw else {
        return Err(corrupt(team_id, "formation is not an object"));
    };

    let row = |key: &str| -> Result<Vec<UnitId>, DomainError> {
        match map.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(entries)) => {
                let mut ids = Vec::with_capacity(entries.len());
                for entry in entries {
                    match entry.as_str().map(Uuid::parse_str) {
                        Some(Ok(id)) => ids.push(id),
                        _ => {
                            warn!(team_id = %team_id, row = key, "dropping legacy formation entry")
                        }
                    }
                }
                Ok(ids)
            }
            Some(_) => Err(corrupt(team_id, "formation row is not an array")),
        }
    };

    let (formation, rejected) = Formation::rebuild_lenient(&row("front")?, &row("back")?, mode);
    for (unit_id, reason) in rejected {
        warn!(
            team_id = %team_id,
            unit_id = %unit_id,
            reason = %reason,
            "dropping stored formation entry"
        );
    }
    Ok(formation)
}

fn corrupt(team_id: Uuid, what: &str) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("team {team_id}: {what}"),
    )
}

fn formation_value(formation: &Formation) -> Result<Value, DomainError> {
    serde_json::to_value(formation).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("Serialize".into()),
            format!("failed to encode formation: {e}"),
        )
    })
}

#[derive(Debug, Clone)]
pub struct TeamRepoSea {
    db: DatabaseConnection,
}

impl TeamRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn select(table_name: &TableName) -> SelectStatement {
        Query::select()
            .columns(COLUMNS.map(col))
            .from(table(table_name))
            .to_owned()
    }
}

#[async_trait]
impl TeamRepo for TeamRepoSea {
    async fn list_teams(
        &self,
        table_name: &TableName,
        game_id: Uuid,
    ) -> Result<Vec<Team>, DomainError> {
        let stmt = Self::select(table_name)
            .and_where(game_eq(game_id))
            .order_by(col("created_at"), Order::Desc)
            .to_owned();
        let backend = self.db.get_database_backend();

        let rows = TeamRow::find_by_statement(backend.build(&stmt))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        rows.into_iter().map(Team::try_from).collect()
    }

    async fn find_team(
        &self,
        table_name: &TableName,
        team_id: Uuid,
    ) -> Result<Option<Team>, DomainError> {
        let stmt = Self::select(table_name).and_where(id_eq(team_id)).to_owned();
        let backend = self.db.get_database_backend();

        TeamRow::find_by_statement(backend.build(&stmt))
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(Team::try_from)
            .transpose()
    }

    async fn insert_team(
        &self,
        table_name: &TableName,
        team: &NewTeam,
    ) -> Result<Uuid, DomainError> {
        let values: [SimpleExpr; 8] = [
            team.game_id.into(),
            team.owner_id.into(),
            team.owner_name.clone().into(),
            team.name.clone().into(),
            team.mode.as_str().into(),
            formation_value(&team.formation)?.into(),
            team.companion_id.into(),
            team.companion_image_url.clone().into(),
        ];
        let stmt = Query::insert()
            .into_table(table(table_name))
            .columns(
                [
                    "game_id",
                    "user_id",
                    "username",
                    "name",
                    "mode",
                    "formation",
                    "pet_id",
                    "pet_image_url",
                ]
                .map(col),
            )
            .values(values)
            .map_err(statement_err)?
            .returning_col(col("id"))
            .to_owned();

        insert_returning_id(&self.db, &stmt).await
    }

    async fn update_team(
        &self,
        table_name: &TableName,
        team_id: Uuid,
        team: &NewTeam,
    ) -> Result<bool, DomainError> {
        let stmt = Query::update()
            .table(table(table_name))
            .values([
                (col("name"), team.name.clone().into()),
                (col("mode"), team.mode.as_str().into()),
                (col("formation"), formation_value(&team.formation)?.into()),
                (col("pet_id"), team.companion_id.into()),
                (
                    col("pet_image_url"),
                    team.companion_image_url.clone().into(),
                ),
            ])
            .and_where(id_eq(team_id))
            .to_owned();

        touched_any(&self.db, &stmt).await
    }

    async fn delete_team(
        &self,
        table_name: &TableName,
        team_id: Uuid,
    ) -> Result<bool, DomainError> {
        let stmt = Query::delete()
            .from_table(table(table_name))
            .and_where(id_eq(team_id))
            .to_owned();

        touched_any(&self.db, &stmt).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_unit_ids_in_order() {
        let [a, b, c] = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let raw = json!({ "front": [a, b], "back": [c] });

        let formation = decode_formation(Uuid::nil(), GameMode::Arena, &raw).unwrap();
        assert_eq!(formation.front, vec![a, b]);
        assert_eq!(formation.back, vec![c]);
    }

    #[test]
    fn legacy_image_urls_are_dropped() {
        let a = Uuid::new_v4();
        let raw = json!({
            "front": ["https://cdn.example/rudy.png", a],
            "back": [null, 42],
        });

        let formation = decode_formation(Uuid::nil(), GameMode::Arena, &raw).unwrap();
        assert_eq!(formation.front, vec![a]);
        assert!(formation.back.is_empty());
    }

    #[test]
    fn stored_rows_are_held_to_the_mode_rules() {
        let front: Vec<Uuid> = (0..6).map(|_| Uuid::new_v4()).collect();
        let a = Uuid::new_v4();
        let raw = json!({ "front": front, "back": [a, a] });

        let formation = decode_formation(Uuid::nil(), GameMode::GuildWar, &raw).unwrap();
        assert_eq!(formation.occupied(), 3);
        assert_eq!(formation.front, front[..3].to_vec());
        assert!(formation.back.is_empty());

        let formation = decode_formation(Uuid::nil(), GameMode::Arena, &raw).unwrap();
        assert_eq!(formation.front, front[..5].to_vec());
        assert!(formation.back.is_empty());

        let raw = json!({ "front": [a], "back": [a] });
        let formation = decode_formation(Uuid::nil(), GameMode::Arena, &raw).unwrap();
        assert_eq!(formation.front, vec![a]);
        assert!(formation.back.is_empty());
    }

    #[test]
    fn missing_rows_are_empty() {
        let formation = decode_formation(Uuid::nil(), GameMode::Arena, &json!({})).unwrap();
        assert!(formation.is_empty());
    }

    #[test]
    fn non_object_is_corruption() {
        let err = decode_formation(Uuid::nil(), GameMode::Arena, &json!(["x"])).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Infra(InfraErrorKind::DataCorruption, _)
        ));

        let err =
            decode_formation(Uuid::nil(), GameMode::Arena, &json!({ "front": "x" })).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Infra(InfraErrorKind::DataCorruption, _)
        ));
    }
}

//! SeaORM adapter for character and pet tables.

use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Order, Query, SelectStatement, SimpleExpr};
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult};
use uuid::Uuid;

use super::dynamic::{col, game_eq, id_eq, insert_returning_id, statement_err, table, touched_any};
use crate::domain::schema_router::TableName;
use crate::domain::units::{NewUnit, Unit};
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;
use crate::repos::units::UnitRepo;

const COLUMNS: [&str; 8] = [
    "id",
    "game_id",
    "name",
    "image_url",
    "description",
    "role",
    "element",
    "rarity",
];

const WRITABLE: [&str; 6] = ["name", "image_url", "description", "role", "element", "rarity"];

fn writable_values(unit: &NewUnit) -> [SimpleExpr; 6] {
    [
        unit.name.clone().into(),
        unit.image_url.clone().into(),
        unit.description.clone().into(),
        unit.role.clone().into(),
        unit.element.clone().into(),
        unit.rarity.clone().into(),
    ]
}

fn assignments(unit: &NewUnit) -> Vec<(Alias, SimpleExpr)> {
    WRITABLE
        .map(col)
        .into_iter()
        .zip(writable_values(unit))
        .collect()
}

#[derive(Debug, FromQueryResult)]
struct UnitRow {
    id: Uuid,
    game_id: Uuid,
    name: String,
    image_url: Option<String>,
    description: Option<String>,
    role: Option<String>,
    element: Option<String>,
    rarity: Option<String>,
}

impl From<UnitRow> for Unit {
    fn from(row: UnitRow) -> Self {
        Unit {
            id: row.id,
            name: row.name,
            game_id: row.game_id,
            image_url: row.image_url,
            description: row.description,
            role: row.role,
            element: row.element,
            rarity: row.rarity,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UnitRepoSea {
    db: DatabaseConnection,
}

impl UnitRepoSea {
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
impl UnitRepo for UnitRepoSea {
    async fn list_units(
        &self,
        table_name: &TableName,
        game_id: Uuid,
    ) -> Result<Vec<Unit>, DomainError> {
        let stmt = Self::select(table_name)
            .and_where(game_eq(game_id))
            .order_by(col("name"), Order::Asc)
            .to_owned();
        let backend = self.db.get_database_backend();

        let rows = UnitRow::find_by_statement(backend.build(&stmt))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().map(Unit::from).collect())
    }

    async fn find_unit(
        &self,
        table_name: &TableName,
        unit_id: Uuid,
    ) -> Result<Option<Unit>, DomainError> {
        let stmt = Self::select(table_name).and_where(id_eq(unit_id)).to_owned();
        let backend = self.db.get_database_backend();

        let row = UnitRow::find_by_statement(backend.build(&stmt))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(row.map(Unit::from))
    }

    async fn insert_unit(
        &self,
        table_name: &TableName,
        game_id: Uuid,
        unit: &NewUnit,
    ) -> Result<Uuid, DomainError> {
        let mut values = vec![SimpleExpr::from(game_id)];
        values.extend(writable_values(unit));
        let stmt = Query::insert()
            .into_table(table(table_name))
            .columns(std::iter::once("game_id").chain(WRITABLE).map(col))
            .values(values)
            .map_err(statement_err)?
            .returning_col(col("id"))
            .to_owned();

        insert_returning_id(&self.db, &stmt).await
    }

    async fn update_unit(
        &self,
        table_name: &TableName,
        unit_id: Uuid,
        unit: &NewUnit,
    ) -> Result<bool, DomainError> {
        let stmt = Query::update()
            .table(table(table_name))
            .values(assignments(unit))
            .and_where(id_eq(unit_id))
            .to_owned();

        touched_any(&self.db, &stmt).await
    }

    async fn delete_unit(
        &self,
        table_name: &TableName,
        unit_id: Uuid,
    ) -> Result<bool, DomainError> {
        let stmt = Query::delete()
            .from_table(table(table_name))
            .and_where(id_eq(unit_id))
            .to_owned();

        touched_any(&self.db, &stmt).await
    }
}

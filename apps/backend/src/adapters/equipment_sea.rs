//! SeaORM adapter for equipment tables.

use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr, Order, Query, SelectStatement, SimpleExpr};
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult};
use uuid::Uuid;

use super::dynamic::{col, game_eq, id_eq, insert_returning_id, statement_err, table, touched_any};
use crate::domain::schema_router::TableName;
use crate::domain::units::{Equipment, NewEquipment};
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;
use crate::repos::equipment::EquipmentRepo;

// `type` is read back under the alias `equip_type`.
const COLUMNS: [&str; 10] = [
    "id",
    "game_id",
    "name",
    "name_en",
    "image_url",
    "description",
    "rarity",
    "stats",
    "special_effect",
    "how_to_obtain",
];

const WRITABLE: [&str; 9] = [
    "name",
    "name_en",
    "image_url",
    "description",
    "type",
    "rarity",
    "stats",
    "special_effect",
    "how_to_obtain",
];

fn writable_values(equipment: &NewEquipment) -> [SimpleExpr; 9] {
    [
        equipment.name.clone().into(),
        equipment.name_en.clone().into(),
        equipment.image_url.clone().into(),
        equipment.description.clone().into(),
        equipment.equip_type.clone().into(),
        equipment.rarity.clone().into(),
        equipment.stats.clone().into(),
        equipment.special_effect.clone().into(),
        equipment.how_to_obtain.clone().into(),
    ]
}

fn assignments(equipment: &NewEquipment) -> Vec<(Alias, SimpleExpr)> {
    WRITABLE
        .map(col)
        .into_iter()
        .zip(writable_values(equipment))
        .collect()
}

#[derive(Debug, FromQueryResult)]
struct EquipmentRow {
    id: Uuid,
    game_id: Uuid,
    name: String,
    name_en: Option<String>,
    image_url: Option<String>,
    description: Option<String>,
    equip_type: String,
    rarity: String,
    stats: Option<serde_json::Value>,
    special_effect: Option<String>,
    how_to_obtain: Option<String>,
}

impl From<EquipmentRow> for Equipment {
    fn from(row: EquipmentRow) -> Self {
        Equipment {
            id: row.id,
            game_id: row.game_id,
            name: row.name,
            name_en: row.name_en,
            image_url: row.image_url,
            description: row.description,
            equip_type: row.equip_type,
            rarity: row.rarity,
            stats: row.stats,
            special_effect: row.special_effect,
            how_to_obtain: row.how_to_obtain,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EquipmentRepoSea {
    db: DatabaseConnection,
}

impl EquipmentRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn select(table_name: &TableName) -> SelectStatement {
        Query::select()
            .columns(COLUMNS.map(col))
            .expr_as(Expr::col(col("type")), col("equip_type"))
            .from(table(table_name))
            .to_owned()
    }
}

#[async_trait]
impl EquipmentRepo for EquipmentRepoSea {
    async fn list_equipment(
        &self,
        table_name: &TableName,
        game_id: Uuid,
    ) -> Result<Vec<Equipment>, DomainError> {
        let stmt = Self::select(table_name)
            .and_where(game_eq(game_id))
            .order_by(col("name"), Order::Asc)
            .to_owned();
        let backend = self.db.get_database_backend();

        let rows = EquipmentRow::find_by_statement(backend.build(&stmt))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().map(Equipment::from).collect())
    }

    async fn find_equipment(
        &self,
        table_name: &TableName,
        equipment_id: Uuid,
    ) -> Result<Option<Equipment>, DomainError> {
        let stmt = Self::select(table_name)
            .and_where(id_eq(equipment_id))
            .to_owned();
        let backend = self.db.get_database_backend();

        let row = EquipmentRow::find_by_statement(backend.build(&stmt))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(row.map(Equipment::from))
    }

    async fn insert_equipment(
        &self,
        table_name: &TableName,
        game_id: Uuid,
        equipment: &NewEquipment,
    ) -> Result<Uuid, DomainError> {
        let mut values = vec![SimpleExpr::from(game_id)];
        values.extend(writable_values(equipment));
        let stmt = Query::insert()
            .into_table(table(table_name))
            .columns(std::iter::once("game_id").chain(WRITABLE).map(col))
            .values(values)
            .map_err(statement_err)?
            .returning_col(col("id"))
            .to_owned();

        insert_returning_id(&self.db, &stmt).await
    }

    async fn update_equipment(
        &self,
        table_name: &TableName,
        equipment_id: Uuid,
        equipment: &NewEquipment,
    ) -> Result<bool, DomainError> {
        let stmt = Query::update()
            .table(table(table_name))
            .values(assignments(equipment))
            .and_where(id_eq(equipment_id))
            .to_owned();

        touched_any(&self.db, &stmt).await
    }

    async fn delete_equipment(
        &self,
        table_name: &TableName,
        equipment_id: Uuid,
    ) -> Result<bool, DomainError> {
        let stmt = Query::delete()
            .from_table(table(table_name))
            .and_where(id_eq(equipment_id))
            .to_owned();

        touched_any(&self.db, &stmt).await
    }
}

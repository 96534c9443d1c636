//! Helpers for tables whose names come from game metadata.
//!
//! Table names reach this module only as validated [`TableName`]s, and are
//! always passed to `sea_query` as identifiers, never spliced into SQL.

use std::fmt::Display;

use sea_orm::sea_query::{Alias, Expr, InsertStatement, SimpleExpr};
use sea_orm::{ConnectionTrait, StatementBuilder};
use uuid::Uuid;

use crate::domain::schema_router::TableName;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;

pub fn table(name: &TableName) -> Alias {
    Alias::new(name.as_str())
}

pub fn col(name: &'static str) -> Alias {
    Alias::new(name)
}

pub fn id_eq(id: Uuid) -> SimpleExpr {
    Expr::col(col("id")).eq(id)
}

pub fn game_eq(game_id: Uuid) -> SimpleExpr {
    Expr::col(col("game_id")).eq(game_id)
}

/// A statement `sea_query` refused to build.
pub fn statement_err(err: impl Display) -> DomainError {
    DomainError::infra(InfraErrorKind::Other("Query".into()), err.to_string())
}

/// Runs an `INSERT .. RETURNING id`.
pub async fn insert_returning_id<C>(db: &C, stmt: &InsertStatement) -> Result<Uuid, DomainError>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();
    let row = db
        .query_one(backend.build(stmt))
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::Other("Insert".into()),
                "insert returned no id",
            )
        })?;
    row.try_get::<Uuid>("", "id").map_err(map_db_err)
}

/// Runs an UPDATE or DELETE; true when at least one row matched.
pub async fn touched_any<C, S>(db: &C, stmt: &S) -> Result<bool, DomainError>
where
    C: ConnectionTrait,
    S: StatementBuilder,
{
    let backend = db.get_database_backend();
    let res = db
        .execute(backend.build(stmt))
        .await
        .map_err(map_db_err)?;
    Ok(res.rows_affected() > 0)
}

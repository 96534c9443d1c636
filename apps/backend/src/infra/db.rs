use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

/// Connect for the given profile and owner. Does NOT run migrations.
pub async fn connect_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let database_url = db_url(profile, owner)?;

    let mut opts = ConnectOptions::new(database_url);
    opts.sqlx_logging(false);

    let conn = Database::connect(opts).await?;
    Ok(conn)
}

/// Apply pending migrations with owner credentials, then connect as the app.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let owner_conn = connect_db(profile, DbOwner::Owner).await?;
    migrate(&owner_conn, MigrationCommand::Up).await?;
    info!(?profile, "migrations applied");
    drop(owner_conn);

    connect_db(profile, DbOwner::App).await
}

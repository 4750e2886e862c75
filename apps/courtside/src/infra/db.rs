use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::DbSettings;
use crate::errors::domain::DomainError;

/// Connect using `settings` and bring the schema up to date.
pub async fn connect_db(settings: &DbSettings) -> Result<DatabaseConnection, DomainError> {
    let kind = settings.kind()?;
    let max_connections = settings.effective_max_connections()?;

    let mut options = ConnectOptions::new(settings.url.clone());
    options
        .max_connections(max_connections)
        .min_connections(max_connections.min(1))
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let conn = Database::connect(options).await?;
    info!(?kind, max_connections, "database connected");

    migrate(&conn, MigrationCommand::Up).await?;
    Ok(conn)
}

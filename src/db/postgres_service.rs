use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

#[derive(Clone)]
pub struct PostgresService {
    pub(crate) database_connection: DatabaseConnection,
}

impl PostgresService {
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        let mut opts = ConnectOptions::new(uri.to_owned());
        // Bound lock waits so a stuck transaction surfaces as a retryable
        // failure instead of hanging the caller.
        opts.connect_timeout(Duration::from_secs(5))
            .acquire_timeout(Duration::from_secs(5));

        log::info!("Connecting to PostgreSQL...");
        let db = Database::connect(opts).await?;
        log::info!("Running migrations...");
        Migrator::up(&db, None).await?;
        log::info!("Database ready.");
        Ok(Self {
            database_connection: db,
        })
    }
}

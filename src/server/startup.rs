use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::server::{config::Config, error::AppError};

/// Connects to the monitor database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then runs
/// all pending SeaORM migrations so the `server_status` and `admin_setting` tables exist.
/// This function must complete successfully before any job is scheduled.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Connects to the node directory database.
///
/// The directory is owned by the network proxy; no migrations are run against it and it
/// is only ever read.
///
/// # Arguments
/// - `config` - Application configuration containing the directory database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected directory database
/// - `Err(AppError::DbErr)` - Failed to connect
pub async fn connect_to_directory(config: &Config) -> Result<DatabaseConnection, AppError> {
    let mut opt = ConnectOptions::new(&config.directory_database_url);
    opt.sqlx_logging(false);

    Ok(Database::connect(opt).await?)
}

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Creates a database connection to the given URL
pub async fn connect(url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(url);
    options.sqlx_logging_level(log::LevelFilter::Debug);

    Database::connect(options).await
}

use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

use crate::config::DatabaseConfig;
use crate::error::Result;

pub type DbPool = Pool<Postgres>;

/// Connect the Postgres pool the booking repository runs on.
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections.unwrap_or(10))
        .connect(&config.url)
        .await?;

    Ok(pool)
}

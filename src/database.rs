pub mod schema;
pub mod sqlx;

use std::str::FromStr;

use ::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use ::sqlx::SqlitePool;

use crate::error::Error;

/// Opens the database file (created when missing) with foreign keys enforced on every connection.
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true).foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        // an in-memory database lives as long as its connection
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    Ok(pool)
}

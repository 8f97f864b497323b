//! Datastore access. One process-wide SQLite pool capped at a single
//! connection, opened lazily on first use and reused for the life of the
//! process. The `OnceCell` guard keeps concurrent first requests from
//! double-initializing it.

pub mod employees;
pub mod timesheets;

use log::info;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::env;
use tokio::sync::OnceCell;

static POOL: OnceCell<SqlitePool> = OnceCell::const_new();

const DEFAULT_DATABASE_URL: &str = "sqlite://database.sqlite?mode=rwc";

pub async fn pool() -> Result<&'static SqlitePool, sqlx::Error> {
    POOL.get_or_try_init(|| async {
        let url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let pool = connect(&url).await?;
        info!("database ready at {}", url);
        Ok(pool)
    })
    .await
}

/// Opens a single-connection pool against `url` and ensures the schema
/// exists. Tests call this directly with `sqlite::memory:`.
pub async fn connect(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(url)
        .await?;
    init_schema(&pool).await?;
    Ok(pool)
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS employees (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name     TEXT NOT NULL,
            email         TEXT NOT NULL,
            phone         TEXT NOT NULL,
            date_of_birth TEXT NOT NULL,
            job_title     TEXT NOT NULL,
            department    TEXT NOT NULL,
            salary        REAL NOT NULL,
            start_date    TEXT NOT NULL,
            end_date      TEXT,
            photo_path    TEXT,
            document_path TEXT
        )",
    )
    .execute(pool)
    .await?;

    // The relationship is declared but not pragma-enforced, matching the
    // original write path's acceptance of a dangling employee_id.
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS timesheets (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id INTEGER NOT NULL REFERENCES employees(id),
            start_time  TEXT NOT NULL,
            end_time    TEXT NOT NULL,
            summary     TEXT
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

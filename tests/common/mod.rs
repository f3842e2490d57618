use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Fresh in-memory database with the schema applied. A single connection is
/// used so every query sees the same memory database.
pub async fn setup_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("connect to in-memory sqlite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");

    pool
}

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteExecutor;

use crate::models::{Module, NewModule};

pub async fn find_by_id(
    db: impl SqliteExecutor<'_>,
    id: i64,
) -> Result<Option<Module>, sqlx::Error> {
    sqlx::query_as::<_, Module>(
        "SELECT id, course_id, title, description, order_index, is_published, published_at, \
         created_at, updated_at FROM modules WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn find_by_course(
    db: impl SqliteExecutor<'_>,
    course_id: i64,
) -> Result<Vec<Module>, sqlx::Error> {
    sqlx::query_as::<_, Module>(
        "SELECT id, course_id, title, description, order_index, is_published, published_at, \
         created_at, updated_at FROM modules WHERE course_id = ? ORDER BY order_index",
    )
    .bind(course_id)
    .fetch_all(db)
    .await
}

pub async fn find_published_by_course(
    db: impl SqliteExecutor<'_>,
    course_id: i64,
) -> Result<Vec<Module>, sqlx::Error> {
    sqlx::query_as::<_, Module>(
        "SELECT id, course_id, title, description, order_index, is_published, published_at, \
         created_at, updated_at FROM modules \
         WHERE course_id = ? AND is_published = 1 ORDER BY order_index",
    )
    .bind(course_id)
    .fetch_all(db)
    .await
}

/// Next free 1-based position in the course's ordering.
pub async fn next_order_index(
    db: impl SqliteExecutor<'_>,
    course_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(MAX(order_index), 0) + 1 FROM modules WHERE course_id = ?",
    )
    .bind(course_id)
    .fetch_one(db)
    .await
}

pub async fn insert(
    db: impl SqliteExecutor<'_>,
    new: &NewModule,
    order_index: i64,
) -> Result<i64, sqlx::Error> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO modules \
         (course_id, title, description, order_index, is_published, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(new.course_id)
    .bind(&new.title)
    .bind(&new.description)
    .bind(order_index)
    .bind(new.is_published)
    .bind(now)
    .bind(now)
    .execute(db)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Overwrites the editable fields; `course_id` and `published_at` are managed
/// elsewhere and never touched here.
pub async fn update(
    db: impl SqliteExecutor<'_>,
    id: i64,
    new: &NewModule,
    order_index: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE modules SET title = ?, description = ?, order_index = ?, is_published = ?, \
         updated_at = ? WHERE id = ?",
    )
    .bind(&new.title)
    .bind(&new.description)
    .bind(order_index)
    .bind(new.is_published)
    .bind(Utc::now())
    .bind(id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn set_published(
    db: impl SqliteExecutor<'_>,
    id: i64,
    is_published: bool,
    published_at: Option<DateTime<Utc>>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE modules SET is_published = ?, published_at = ?, updated_at = ? WHERE id = ?",
    )
    .bind(is_published)
    .bind(published_at)
    .bind(Utc::now())
    .bind(id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn set_order_index(
    db: impl SqliteExecutor<'_>,
    id: i64,
    order_index: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE modules SET order_index = ?, updated_at = ? WHERE id = ?")
        .bind(order_index)
        .bind(Utc::now())
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete(db: impl SqliteExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM modules WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_by_course(
    db: impl SqliteExecutor<'_>,
    course_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM modules WHERE course_id = ?")
        .bind(course_id)
        .execute(db)
        .await?;

    Ok(result.rows_affected())
}

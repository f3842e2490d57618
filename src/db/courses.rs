use chrono::Utc;
use sqlx::sqlite::SqliteExecutor;

use crate::models::{Course, CourseStatus, NewCourse};

pub async fn find_by_id(
    db: impl SqliteExecutor<'_>,
    id: i64,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, code, description, instructor_id, credits, max_students, is_public, \
         status, start_date, end_date, created_at, updated_at \
         FROM courses WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn find_by_code(
    db: impl SqliteExecutor<'_>,
    code: &str,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, code, description, instructor_id, credits, max_students, is_public, \
         status, start_date, end_date, created_at, updated_at \
         FROM courses WHERE code = ?",
    )
    .bind(code)
    .fetch_optional(db)
    .await
}

pub async fn find_all(db: impl SqliteExecutor<'_>) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, code, description, instructor_id, credits, max_students, is_public, \
         status, start_date, end_date, created_at, updated_at \
         FROM courses ORDER BY created_at DESC",
    )
    .fetch_all(db)
    .await
}

pub async fn find_by_instructor(
    db: impl SqliteExecutor<'_>,
    instructor_id: i64,
) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, code, description, instructor_id, credits, max_students, is_public, \
         status, start_date, end_date, created_at, updated_at \
         FROM courses WHERE instructor_id = ? ORDER BY created_at DESC",
    )
    .bind(instructor_id)
    .fetch_all(db)
    .await
}

pub async fn find_public(db: impl SqliteExecutor<'_>) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, code, description, instructor_id, credits, max_students, is_public, \
         status, start_date, end_date, created_at, updated_at \
         FROM courses WHERE is_public = 1 AND status = ? ORDER BY created_at DESC",
    )
    .bind(CourseStatus::Published)
    .fetch_all(db)
    .await
}

/// Substring search over title, code and description. Case sensitivity is
/// whatever the storage collation gives us.
pub async fn search(
    db: impl SqliteExecutor<'_>,
    keyword: &str,
) -> Result<Vec<Course>, sqlx::Error> {
    let pattern = format!("%{keyword}%");
    sqlx::query_as::<_, Course>(
        "SELECT id, title, code, description, instructor_id, credits, max_students, is_public, \
         status, start_date, end_date, created_at, updated_at \
         FROM courses WHERE title LIKE ? OR code LIKE ? OR description LIKE ? \
         ORDER BY created_at DESC",
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(db)
    .await
}

pub async fn insert(db: impl SqliteExecutor<'_>, new: &NewCourse) -> Result<i64, sqlx::Error> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO courses \
         (title, code, description, instructor_id, credits, max_students, is_public, status, \
         start_date, end_date, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&new.title)
    .bind(&new.code)
    .bind(&new.description)
    .bind(new.instructor_id)
    .bind(new.credits)
    .bind(new.max_students)
    .bind(new.is_public)
    .bind(new.status)
    .bind(new.start_date)
    .bind(new.end_date)
    .bind(now)
    .bind(now)
    .execute(db)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Whole-row overwrite; `created_at` is never touched.
pub async fn update(
    db: impl SqliteExecutor<'_>,
    id: i64,
    new: &NewCourse,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE courses SET title = ?, code = ?, description = ?, instructor_id = ?, \
         credits = ?, max_students = ?, is_public = ?, status = ?, start_date = ?, \
         end_date = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&new.title)
    .bind(&new.code)
    .bind(&new.description)
    .bind(new.instructor_id)
    .bind(new.credits)
    .bind(new.max_students)
    .bind(new.is_public)
    .bind(new.status)
    .bind(new.start_date)
    .bind(new.end_date)
    .bind(Utc::now())
    .bind(id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn set_status(
    db: impl SqliteExecutor<'_>,
    id: i64,
    status: CourseStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE courses SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete(db: impl SqliteExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM courses WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteExecutor;

use crate::models::{Enrollment, EnrollmentRole, EnrollmentStatus};

pub async fn find_by_id(
    db: impl SqliteExecutor<'_>,
    id: i64,
) -> Result<Option<Enrollment>, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(
        "SELECT id, user_id, course_id, role, enrollment_status, enrolled_at, completed_at \
         FROM enrollments WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn find_by_user(
    db: impl SqliteExecutor<'_>,
    user_id: i64,
) -> Result<Vec<Enrollment>, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(
        "SELECT id, user_id, course_id, role, enrollment_status, enrolled_at, completed_at \
         FROM enrollments WHERE user_id = ? ORDER BY enrolled_at DESC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn find_by_course(
    db: impl SqliteExecutor<'_>,
    course_id: i64,
) -> Result<Vec<Enrollment>, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(
        "SELECT id, user_id, course_id, role, enrollment_status, enrolled_at, completed_at \
         FROM enrollments WHERE course_id = ? ORDER BY enrolled_at DESC",
    )
    .bind(course_id)
    .fetch_all(db)
    .await
}

pub async fn insert(
    db: impl SqliteExecutor<'_>,
    user_id: i64,
    course_id: i64,
    role: EnrollmentRole,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO enrollments (user_id, course_id, role, enrollment_status, enrolled_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(course_id)
    .bind(role)
    .bind(EnrollmentStatus::Active)
    .bind(Utc::now())
    .execute(db)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn set_status(
    db: impl SqliteExecutor<'_>,
    id: i64,
    status: EnrollmentStatus,
    completed_at: Option<DateTime<Utc>>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE enrollments SET enrollment_status = ?, completed_at = ? WHERE id = ?",
    )
    .bind(status)
    .bind(completed_at)
    .bind(id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete(db: impl SqliteExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM enrollments WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn has_active(
    db: impl SqliteExecutor<'_>,
    user_id: i64,
    course_id: i64,
) -> Result<bool, sqlx::Error> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM enrollments \
         WHERE user_id = ? AND course_id = ? AND enrollment_status = ?",
    )
    .bind(user_id)
    .bind(course_id)
    .bind(EnrollmentStatus::Active)
    .fetch_one(db)
    .await?;

    Ok(count > 0)
}

pub async fn count_active_by_course(
    db: impl SqliteExecutor<'_>,
    course_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM enrollments WHERE course_id = ? AND enrollment_status = ?",
    )
    .bind(course_id)
    .bind(EnrollmentStatus::Active)
    .fetch_one(db)
    .await
}

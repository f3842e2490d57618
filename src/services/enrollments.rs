//! Enrollment lifecycle: active → dropped/completed, with at most one active
//! enrollment per (user, course).

use chrono::Utc;
use sqlx::SqlitePool;

use crate::db;
use crate::error::{AppError, is_unique_violation};
use crate::models::{Enrollment, EnrollmentRole, EnrollmentStatus};

pub async fn enroll_course(
    pool: &SqlitePool,
    user_id: i64,
    course_id: i64,
) -> Result<Enrollment, AppError> {
    let mut tx = pool.begin().await?;

    // Advisory pre-check; the partial UNIQUE index over active rows decides
    // under concurrency.
    if db::enrollments::has_active(&mut *tx, user_id, course_id).await? {
        return Err(AppError::BusinessRule(
            "user is already enrolled in this course".into(),
        ));
    }

    if db::courses::find_by_id(&mut *tx, course_id).await?.is_none() {
        return Err(AppError::NotFound(format!("course not found: {course_id}")));
    }

    let id = match db::enrollments::insert(&mut *tx, user_id, course_id, EnrollmentRole::Student)
        .await
    {
        Ok(id) => id,
        Err(err) if is_unique_violation(&err) => {
            return Err(AppError::BusinessRule(
                "user is already enrolled in this course".into(),
            ));
        }
        Err(err) => return Err(err.into()),
    };

    let enrollment = db::enrollments::find_by_id(&mut *tx, id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    tx.commit().await?;
    Ok(enrollment)
}

pub async fn drop_course(pool: &SqlitePool, user_id: i64, course_id: i64) -> Result<(), AppError> {
    transition_active_enrollment(pool, user_id, course_id, EnrollmentStatus::Dropped).await
}

pub async fn complete_course(
    pool: &SqlitePool,
    user_id: i64,
    course_id: i64,
) -> Result<(), AppError> {
    transition_active_enrollment(pool, user_id, course_id, EnrollmentStatus::Completed).await
}

/// Finds the active enrollment for the pair by scanning the user's
/// enrollments, then applies the target status. Completion stamps the time.
async fn transition_active_enrollment(
    pool: &SqlitePool,
    user_id: i64,
    course_id: i64,
    status: EnrollmentStatus,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let enrollment = db::enrollments::find_by_user(&mut *tx, user_id)
        .await?
        .into_iter()
        .find(|e| {
            e.course_id == course_id && e.enrollment_status == EnrollmentStatus::Active
        })
        .ok_or_else(|| AppError::NotFound("no active enrollment found".into()))?;

    let completed_at = match status {
        EnrollmentStatus::Completed => Some(Utc::now()),
        _ => enrollment.completed_at,
    };
    db::enrollments::set_status(&mut *tx, enrollment.id, status, completed_at).await?;

    tx.commit().await?;
    Ok(())
}

pub async fn get_enrollment(pool: &SqlitePool, id: i64) -> Result<Enrollment, AppError> {
    db::enrollments::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("enrollment not found: {id}")))
}

pub async fn list_user_enrollments(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<Enrollment>, AppError> {
    Ok(db::enrollments::find_by_user(pool, user_id).await?)
}

pub async fn list_course_enrollments(
    pool: &SqlitePool,
    course_id: i64,
) -> Result<Vec<Enrollment>, AppError> {
    Ok(db::enrollments::find_by_course(pool, course_id).await?)
}

pub async fn is_user_enrolled(
    pool: &SqlitePool,
    user_id: i64,
    course_id: i64,
) -> Result<bool, AppError> {
    Ok(db::enrollments::has_active(pool, user_id, course_id).await?)
}

pub async fn course_enrollment_count(
    pool: &SqlitePool,
    course_id: i64,
) -> Result<i64, AppError> {
    Ok(db::enrollments::count_active_by_course(pool, course_id).await?)
}

pub async fn delete_enrollment(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let deleted = db::enrollments::delete(&mut *tx, id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("enrollment not found: {id}")));
    }

    tx.commit().await?;
    Ok(())
}

//! Course lifecycle: creation with code uniqueness, whole-row updates,
//! unconditional status transitions, hard delete without cascade.

use sqlx::SqlitePool;

use crate::db;
use crate::error::{AppError, is_unique_violation};
use crate::models::{Course, CourseStatus, NewCourse};

pub async fn create_course(pool: &SqlitePool, new: NewCourse) -> Result<Course, AppError> {
    let mut tx = pool.begin().await?;

    // Advisory pre-check; the UNIQUE index on code is the authority if a
    // concurrent insert slips past it.
    if db::courses::find_by_code(&mut *tx, &new.code).await?.is_some() {
        return Err(AppError::BusinessRule(format!(
            "course code already exists: {}",
            new.code
        )));
    }

    let id = match db::courses::insert(&mut *tx, &new).await {
        Ok(id) => id,
        Err(err) if is_unique_violation(&err) => {
            return Err(AppError::BusinessRule(format!(
                "course code already exists: {}",
                new.code
            )));
        }
        Err(err) => return Err(err.into()),
    };

    let course = db::courses::find_by_id(&mut *tx, id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    tx.commit().await?;
    Ok(course)
}

pub async fn get_course(pool: &SqlitePool, id: i64) -> Result<Course, AppError> {
    db::courses::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("course not found: {id}")))
}

pub async fn list_courses(pool: &SqlitePool) -> Result<Vec<Course>, AppError> {
    Ok(db::courses::find_all(pool).await?)
}

pub async fn list_courses_by_instructor(
    pool: &SqlitePool,
    instructor_id: i64,
) -> Result<Vec<Course>, AppError> {
    Ok(db::courses::find_by_instructor(pool, instructor_id).await?)
}

pub async fn list_public_courses(pool: &SqlitePool) -> Result<Vec<Course>, AppError> {
    Ok(db::courses::find_public(pool).await?)
}

/// Blank keyword falls back to the full listing.
pub async fn search_courses(
    pool: &SqlitePool,
    keyword: Option<&str>,
) -> Result<Vec<Course>, AppError> {
    match keyword.map(str::trim) {
        None | Some("") => list_courses(pool).await,
        Some(keyword) => Ok(db::courses::search(pool, keyword).await?),
    }
}

pub async fn update_course(
    pool: &SqlitePool,
    id: i64,
    new: NewCourse,
) -> Result<Course, AppError> {
    let mut tx = pool.begin().await?;

    let existing = db::courses::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("course not found: {id}")))?;

    if existing.code != new.code {
        if let Some(holder) = db::courses::find_by_code(&mut *tx, &new.code).await? {
            if holder.id != id {
                return Err(AppError::BusinessRule(format!(
                    "course code already exists: {}",
                    new.code
                )));
            }
        }
    }

    if let Err(err) = db::courses::update(&mut *tx, id, &new).await {
        if is_unique_violation(&err) {
            return Err(AppError::BusinessRule(format!(
                "course code already exists: {}",
                new.code
            )));
        }
        return Err(err.into());
    }

    let course = db::courses::find_by_id(&mut *tx, id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    tx.commit().await?;
    Ok(course)
}

pub async fn delete_course(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    // Hard delete; modules and enrollments stay behind on purpose.
    let deleted = db::courses::delete(&mut *tx, id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("course not found: {id}")));
    }

    tx.commit().await?;
    Ok(())
}

pub async fn publish_course(pool: &SqlitePool, id: i64) -> Result<Course, AppError> {
    set_course_status(pool, id, CourseStatus::Published).await
}

pub async fn archive_course(pool: &SqlitePool, id: i64) -> Result<Course, AppError> {
    set_course_status(pool, id, CourseStatus::Archived).await
}

/// No transition graph: the target status is applied regardless of the
/// current one, so repeated calls are idempotent.
async fn set_course_status(
    pool: &SqlitePool,
    id: i64,
    status: CourseStatus,
) -> Result<Course, AppError> {
    let mut tx = pool.begin().await?;

    let updated = db::courses::set_status(&mut *tx, id, status).await?;
    if !updated {
        return Err(AppError::NotFound(format!("course not found: {id}")));
    }

    let course = db::courses::find_by_id(&mut *tx, id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    tx.commit().await?;
    Ok(course)
}

/// True when nobody holds the code, or the holder is the excluded course.
pub async fn is_course_code_available(
    pool: &SqlitePool,
    code: &str,
    exclude_id: Option<i64>,
) -> Result<bool, AppError> {
    match db::courses::find_by_code(pool, code).await? {
        None => Ok(true),
        Some(holder) => Ok(exclude_id == Some(holder.id)),
    }
}

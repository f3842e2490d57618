//! Module lifecycle: dense 1-based ordering per course, publish flag with
//! timestamp, bulk reordering.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::models::{Module, NewModule};

pub async fn create_module(pool: &SqlitePool, new: NewModule) -> Result<Module, AppError> {
    let mut tx = pool.begin().await?;

    if db::courses::find_by_id(&mut *tx, new.course_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "course not found: {}",
            new.course_id
        )));
    }

    let order_index = match new.order_index {
        Some(index) if index > 0 => index,
        _ => db::modules::next_order_index(&mut *tx, new.course_id).await?,
    };

    let id = db::modules::insert(&mut *tx, &new, order_index).await?;
    let module = db::modules::find_by_id(&mut *tx, id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    tx.commit().await?;
    Ok(module)
}

pub async fn get_module(pool: &SqlitePool, id: i64) -> Result<Module, AppError> {
    db::modules::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("module not found: {id}")))
}

pub async fn list_modules_by_course(
    pool: &SqlitePool,
    course_id: i64,
) -> Result<Vec<Module>, AppError> {
    Ok(db::modules::find_by_course(pool, course_id).await?)
}

pub async fn list_published_modules_by_course(
    pool: &SqlitePool,
    course_id: i64,
) -> Result<Vec<Module>, AppError> {
    Ok(db::modules::find_published_by_course(pool, course_id).await?)
}

/// Overwrites the editable fields. The owning course is pinned to the stored
/// value; a module cannot move between courses.
pub async fn update_module(pool: &SqlitePool, id: i64, new: NewModule) -> Result<Module, AppError> {
    let mut tx = pool.begin().await?;

    let existing = db::modules::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("module not found: {id}")))?;

    let order_index = match new.order_index {
        Some(index) if index > 0 => index,
        _ => existing.order_index,
    };

    db::modules::update(&mut *tx, id, &new, order_index).await?;
    let module = db::modules::find_by_id(&mut *tx, id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    tx.commit().await?;
    Ok(module)
}

pub async fn delete_module(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let deleted = db::modules::delete(&mut *tx, id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("module not found: {id}")));
    }

    tx.commit().await?;
    Ok(())
}

/// Bulk cleanup for a course's modules. Nothing invokes this on course
/// deletion; it is an explicit caller decision.
pub async fn delete_modules_by_course(pool: &SqlitePool, course_id: i64) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    db::modules::delete_by_course(&mut *tx, course_id).await?;
    tx.commit().await?;
    Ok(())
}

pub async fn publish_module(pool: &SqlitePool, id: i64) -> Result<Module, AppError> {
    set_module_published(pool, id, true).await
}

pub async fn unpublish_module(pool: &SqlitePool, id: i64) -> Result<Module, AppError> {
    set_module_published(pool, id, false).await
}

async fn set_module_published(
    pool: &SqlitePool,
    id: i64,
    is_published: bool,
) -> Result<Module, AppError> {
    let mut tx = pool.begin().await?;

    let published_at = is_published.then(Utc::now);
    let updated = db::modules::set_published(&mut *tx, id, is_published, published_at).await?;
    if !updated {
        return Err(AppError::NotFound(format!("module not found: {id}")));
    }

    let module = db::modules::find_by_id(&mut *tx, id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    tx.commit().await?;
    Ok(module)
}

/// Assigns order_index = position + 1 to each id, in list order. The list is
/// taken at face value: no check that the ids share a course or that every
/// module of the course is present.
pub async fn reorder_modules(pool: &SqlitePool, ordered_ids: &[i64]) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    for (position, id) in ordered_ids.iter().enumerate() {
        db::modules::set_order_index(&mut *tx, *id, position as i64 + 1).await?;
    }

    tx.commit().await?;
    Ok(())
}

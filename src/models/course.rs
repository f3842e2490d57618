use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

/// Course lifecycle status, stored as its lowercase string value. Unknown
/// values in storage fail row decoding instead of mapping to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum CourseStatus {
    Draft,
    Published,
    Archived,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub code: String,
    pub description: Option<String>,
    pub instructor_id: i64,
    pub credits: i64,
    pub max_students: i64,
    pub is_public: bool,
    pub status: CourseStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values for an insert or a whole-row update, after request
/// validation and defaulting.
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub code: String,
    pub description: Option<String>,
    pub instructor_id: i64,
    pub credits: i64,
    pub max_students: i64,
    pub is_public: bool,
    pub status: CourseStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Create/update payload. Every field is optional so the same shape serves
/// PATCH; `validate` enforces the required fields for POST and PUT.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    pub title: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub instructor_id: Option<i64>,
    pub credits: Option<i64>,
    pub max_students: Option<i64>,
    pub is_public: Option<bool>,
    pub status: Option<CourseStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl CourseRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        match &self.title {
            None => return Err(AppError::Validation("course title must not be blank".into())),
            Some(title) => {
                if title.trim().is_empty() {
                    return Err(AppError::Validation("course title must not be blank".into()));
                }
                if title.chars().count() > 200 {
                    return Err(AppError::Validation(
                        "course title must be at most 200 characters".into(),
                    ));
                }
            }
        }
        match &self.code {
            None => return Err(AppError::Validation("course code must not be blank".into())),
            Some(code) => {
                if code.trim().is_empty() {
                    return Err(AppError::Validation("course code must not be blank".into()));
                }
                if code.chars().count() > 50 {
                    return Err(AppError::Validation(
                        "course code must be at most 50 characters".into(),
                    ));
                }
            }
        }
        match self.instructor_id {
            Some(id) if id > 0 => Ok(()),
            _ => Err(AppError::Validation(
                "instructor id must be a positive integer".into(),
            )),
        }
    }

    /// Consumes a validated request, filling in entity defaults for anything
    /// the caller left out.
    pub fn into_new(self) -> NewCourse {
        NewCourse {
            title: self.title.unwrap_or_default(),
            code: self.code.unwrap_or_default(),
            description: self.description,
            instructor_id: self.instructor_id.unwrap_or_default(),
            credits: self.credits.unwrap_or(0),
            max_students: self.max_students.unwrap_or(0),
            is_public: self.is_public.unwrap_or(false),
            status: self.status.unwrap_or(CourseStatus::Draft),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    /// Partial-update merge: fields present in the request replace the stored
    /// values, everything else carries over unchanged.
    pub fn merged_with(self, existing: &Course) -> NewCourse {
        NewCourse {
            title: self.title.unwrap_or_else(|| existing.title.clone()),
            code: self.code.unwrap_or_else(|| existing.code.clone()),
            description: self.description.or_else(|| existing.description.clone()),
            instructor_id: self.instructor_id.unwrap_or(existing.instructor_id),
            credits: self.credits.unwrap_or(existing.credits),
            max_students: self.max_students.unwrap_or(existing.max_students),
            is_public: self.is_public.unwrap_or(existing.is_public),
            status: self.status.unwrap_or(existing.status),
            start_date: self.start_date.or(existing.start_date),
            end_date: self.end_date.or(existing.end_date),
        }
    }
}

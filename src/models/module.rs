use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    /// 1-based position within the owning course's display ordering.
    pub order_index: i64,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewModule {
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    /// None or non-positive means "append at the end of the course".
    pub order_index: Option<i64>,
    pub is_published: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRequest {
    pub course_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub order_index: Option<i64>,
    pub is_published: Option<bool>,
}

impl ModuleRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        match self.course_id {
            Some(id) if id > 0 => {}
            _ => {
                return Err(AppError::Validation(
                    "course id must be a positive integer".into(),
                ));
            }
        }
        match &self.title {
            None => Err(AppError::Validation("module title must not be blank".into())),
            Some(title) => {
                if title.trim().is_empty() {
                    return Err(AppError::Validation("module title must not be blank".into()));
                }
                if title.chars().count() > 200 {
                    return Err(AppError::Validation(
                        "module title must be at most 200 characters".into(),
                    ));
                }
                Ok(())
            }
        }
    }

    pub fn into_new(self) -> NewModule {
        NewModule {
            course_id: self.course_id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            description: self.description,
            order_index: self.order_index,
            is_published: self.is_published.unwrap_or(false),
        }
    }
}

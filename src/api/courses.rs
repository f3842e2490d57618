use axum::Json;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{Course, CourseRequest};
use crate::response::ApiResponse;
use crate::services::courses;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_course).get(list_courses))
        .route("/public", get(list_public_courses))
        .route("/search", get(search_courses))
        .route("/check-code", get(check_code))
        .route("/instructor/{instructor_id}", get(list_by_instructor))
        .route(
            "/{id}",
            get(get_course)
                .put(update_course)
                .patch(patch_course)
                .delete(delete_course),
        )
        .route("/{id}/publish", post(publish_course))
        .route("/{id}/archive", post(archive_course))
}

#[derive(Deserialize)]
struct SearchParams {
    keyword: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckCodeParams {
    code: String,
    exclude_id: Option<i64>,
}

async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<CourseRequest>,
) -> Result<ApiResponse<Course>, AppError> {
    req.validate()?;
    let course = courses::create_course(&state.db, req.into_new()).await?;
    Ok(ApiResponse::success_with("course created", course))
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Course>, AppError> {
    let course = courses::get_course(&state.db, id).await?;
    Ok(ApiResponse::success(course))
}

async fn list_courses(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Course>>, AppError> {
    let courses = courses::list_courses(&state.db).await?;
    Ok(ApiResponse::success(courses))
}

async fn list_by_instructor(
    State(state): State<AppState>,
    Path(instructor_id): Path<i64>,
) -> Result<ApiResponse<Vec<Course>>, AppError> {
    let courses = courses::list_courses_by_instructor(&state.db, instructor_id).await?;
    Ok(ApiResponse::success(courses))
}

async fn list_public_courses(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Course>>, AppError> {
    let courses = courses::list_public_courses(&state.db).await?;
    Ok(ApiResponse::success(courses))
}

async fn search_courses(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<ApiResponse<Vec<Course>>, AppError> {
    let courses = courses::search_courses(&state.db, params.keyword.as_deref()).await?;
    Ok(ApiResponse::success(courses))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CourseRequest>,
) -> Result<ApiResponse<Course>, AppError> {
    req.validate()?;
    let course = courses::update_course(&state.db, id, req.into_new()).await?;
    Ok(ApiResponse::success_with("course updated", course))
}

/// Partial update: only the fields present in the body are applied.
async fn patch_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CourseRequest>,
) -> Result<ApiResponse<Course>, AppError> {
    let existing = courses::get_course(&state.db, id).await?;
    let merged = req.merged_with(&existing);
    let course = courses::update_course(&state.db, id, merged).await?;
    Ok(ApiResponse::success_with("course updated", course))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    courses::delete_course(&state.db, id).await?;
    Ok(ApiResponse::ok("course deleted"))
}

async fn publish_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Course>, AppError> {
    let course = courses::publish_course(&state.db, id).await?;
    Ok(ApiResponse::success_with("course published", course))
}

async fn archive_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Course>, AppError> {
    let course = courses::archive_course(&state.db, id).await?;
    Ok(ApiResponse::success_with("course archived", course))
}

async fn check_code(
    State(state): State<AppState>,
    Query(params): Query<CheckCodeParams>,
) -> Result<ApiResponse<bool>, AppError> {
    let available =
        courses::is_course_code_available(&state.db, &params.code, params.exclude_id).await?;
    Ok(ApiResponse::success(available))
}

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::Enrollment;
use crate::response::ApiResponse;
use crate::services::enrollments;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(enroll_course))
        .route("/drop", post(drop_course))
        .route("/complete", post(complete_course))
        .route("/check", get(check_enrollment))
        .route("/user/{user_id}", get(list_user_enrollments))
        .route("/course/{course_id}", get(list_course_enrollments))
        .route("/course/{course_id}/count", get(course_enrollment_count))
        .route("/{id}", get(get_enrollment).delete(delete_enrollment))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnrollmentParams {
    user_id: i64,
    course_id: i64,
}

async fn enroll_course(
    State(state): State<AppState>,
    Query(params): Query<EnrollmentParams>,
) -> Result<ApiResponse<Enrollment>, AppError> {
    let enrollment =
        enrollments::enroll_course(&state.db, params.user_id, params.course_id).await?;
    Ok(ApiResponse::success_with("enrolled", enrollment))
}

async fn drop_course(
    State(state): State<AppState>,
    Query(params): Query<EnrollmentParams>,
) -> Result<ApiResponse<()>, AppError> {
    enrollments::drop_course(&state.db, params.user_id, params.course_id).await?;
    Ok(ApiResponse::ok("course dropped"))
}

async fn complete_course(
    State(state): State<AppState>,
    Query(params): Query<EnrollmentParams>,
) -> Result<ApiResponse<()>, AppError> {
    enrollments::complete_course(&state.db, params.user_id, params.course_id).await?;
    Ok(ApiResponse::ok("course completed"))
}

async fn get_enrollment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Enrollment>, AppError> {
    let enrollment = enrollments::get_enrollment(&state.db, id).await?;
    Ok(ApiResponse::success(enrollment))
}

async fn delete_enrollment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    enrollments::delete_enrollment(&state.db, id).await?;
    Ok(ApiResponse::ok("enrollment deleted"))
}

async fn list_user_enrollments(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<ApiResponse<Vec<Enrollment>>, AppError> {
    let enrollments = enrollments::list_user_enrollments(&state.db, user_id).await?;
    Ok(ApiResponse::success(enrollments))
}

async fn list_course_enrollments(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<ApiResponse<Vec<Enrollment>>, AppError> {
    let enrollments = enrollments::list_course_enrollments(&state.db, course_id).await?;
    Ok(ApiResponse::success(enrollments))
}

async fn check_enrollment(
    State(state): State<AppState>,
    Query(params): Query<EnrollmentParams>,
) -> Result<ApiResponse<bool>, AppError> {
    let enrolled =
        enrollments::is_user_enrolled(&state.db, params.user_id, params.course_id).await?;
    Ok(ApiResponse::success(enrolled))
}

async fn course_enrollment_count(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<ApiResponse<i64>, AppError> {
    let count = enrollments::course_enrollment_count(&state.db, course_id).await?;
    Ok(ApiResponse::success(count))
}

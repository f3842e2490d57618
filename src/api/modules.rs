use axum::Json;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Router;

use crate::error::AppError;
use crate::models::{Module, ModuleRequest};
use crate::response::ApiResponse;
use crate::services::modules;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_module))
        .route("/reorder", post(reorder_modules))
        .route(
            "/{id}",
            get(get_module).put(update_module).delete(delete_module),
        )
        .route("/{id}/publish", post(publish_module))
        .route("/{id}/unpublish", post(unpublish_module))
        .route(
            "/course/{course_id}",
            get(list_by_course).delete(delete_by_course),
        )
        .route("/course/{course_id}/published", get(list_published_by_course))
}

async fn create_module(
    State(state): State<AppState>,
    Json(req): Json<ModuleRequest>,
) -> Result<ApiResponse<Module>, AppError> {
    req.validate()?;
    let module = modules::create_module(&state.db, req.into_new()).await?;
    Ok(ApiResponse::success_with("module created", module))
}

async fn get_module(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Module>, AppError> {
    let module = modules::get_module(&state.db, id).await?;
    Ok(ApiResponse::success(module))
}

async fn list_by_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<ApiResponse<Vec<Module>>, AppError> {
    let modules = modules::list_modules_by_course(&state.db, course_id).await?;
    Ok(ApiResponse::success(modules))
}

async fn list_published_by_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<ApiResponse<Vec<Module>>, AppError> {
    let modules = modules::list_published_modules_by_course(&state.db, course_id).await?;
    Ok(ApiResponse::success(modules))
}

async fn update_module(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ModuleRequest>,
) -> Result<ApiResponse<Module>, AppError> {
    req.validate()?;
    let module = modules::update_module(&state.db, id, req.into_new()).await?;
    Ok(ApiResponse::success_with("module updated", module))
}

async fn delete_module(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    modules::delete_module(&state.db, id).await?;
    Ok(ApiResponse::ok("module deleted"))
}

async fn delete_by_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    modules::delete_modules_by_course(&state.db, course_id).await?;
    Ok(ApiResponse::ok("course modules deleted"))
}

async fn publish_module(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Module>, AppError> {
    let module = modules::publish_module(&state.db, id).await?;
    Ok(ApiResponse::success_with("module published", module))
}

async fn unpublish_module(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Module>, AppError> {
    let module = modules::unpublish_module(&state.db, id).await?;
    Ok(ApiResponse::success_with("module unpublished", module))
}

async fn reorder_modules(
    State(state): State<AppState>,
    Json(ordered_ids): Json<Vec<i64>>,
) -> Result<ApiResponse<()>, AppError> {
    modules::reorder_modules(&state.db, &ordered_ids).await?;
    Ok(ApiResponse::ok("modules reordered"))
}

pub mod courses;
pub mod enrollments;
pub mod modules;

use axum::{Router, extract::State, http::StatusCode, routing::get};
use tracing::error;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/courses", courses::routes())
        .nest("/api/modules", modules::routes())
        .nest("/api/enrollments", enrollments::routes())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("select 1").execute(&state.db).await {
        Ok(_) => StatusCode::OK,
        Err(err) => {
            error!("health check failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

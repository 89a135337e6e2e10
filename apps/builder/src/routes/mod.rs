pub mod form;
pub mod health;
pub mod resume;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Entry form
        .route("/", get(form::handle_form))
        .route("/api/draft", put(form::handle_save_draft))
        .route("/api/draft/sample", post(form::handle_load_sample))
        .route("/submit", post(form::handle_submit))
        // Rendered résumé
        .route("/resume", get(resume::handle_resume))
        .with_state(state)
}

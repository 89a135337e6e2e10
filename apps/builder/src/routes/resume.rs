use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::{info, warn};

use crate::config::ResultRetention;
use crate::errors::AppError;
use crate::render::page::{resume_page, Alert};
use crate::render::render;
use crate::state::AppState;
use crate::storage::ResultLoad;

/// GET /resume
/// Renders the stored result, or sends the user back to the form.
pub async fn handle_resume(State(state): State<AppState>) -> Result<Response, AppError> {
    let document = match state.results.load().await? {
        ResultLoad::Ready(document) => document,
        ResultLoad::Missing => {
            info!("Resume view opened without a stored result");
            return Ok(Redirect::to(&Alert::MissingResult.redirect_target()).into_response());
        }
        ResultLoad::Corrupt => {
            return Ok(Redirect::to(&Alert::CorruptResult.redirect_target()).into_response());
        }
    };

    let view = render(&document);

    if state.result_retention == ResultRetention::ConsumeOnce {
        if let Err(e) = state.results.discard().await {
            warn!("Could not discard consumed result: {e}");
        }
    }

    Ok(Html(resume_page(&view)).into_response())
}

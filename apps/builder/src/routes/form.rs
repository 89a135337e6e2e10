use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use tracing::error;

use crate::errors::AppError;
use crate::models::draft::FormDraft;
use crate::render::page::{form_page, Alert, Notice, RESUME_PATH};
use crate::state::AppState;
use crate::submission::SubmitError;

#[derive(Debug, Deserialize)]
pub struct FormQuery {
    pub alert: Option<String>,
}

/// GET /
/// The entry form, pre-filled from the saved draft.
pub async fn handle_form(
    State(state): State<AppState>,
    Query(query): Query<FormQuery>,
) -> Html<String> {
    let mut draft = FormDraft::default();
    state.drafts.restore_into(&mut draft).await;

    let notice = query
        .alert
        .as_deref()
        .and_then(Alert::from_code)
        .map(Notice::Alert);

    Html(form_page(&draft, notice.as_ref()))
}

/// PUT /api/draft
/// Autosave hook, called on every field change.
pub async fn handle_save_draft(
    State(state): State<AppState>,
    Json(draft): Json<FormDraft>,
) -> Result<StatusCode, AppError> {
    state.drafts.save(&draft).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/draft/sample
/// Replaces the draft with the built-in sample profile and returns it.
pub async fn handle_load_sample(State(state): State<AppState>) -> Result<Json<FormDraft>, AppError> {
    let sample = FormDraft::sample();
    state.drafts.save(&sample).await?;
    Ok(Json(sample))
}

/// POST /submit
///
/// Runs one submission attempt. The attempt runs on its own task so a client
/// disconnect cannot cancel it once the request to the service is out.
pub async fn handle_submit(State(state): State<AppState>, Form(draft): Form<FormDraft>) -> Response {
    let controller = state.controller.clone();
    let payload = draft.clone();
    let attempt = tokio::spawn(async move { controller.submit(&payload).await });

    let outcome = match attempt.await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Submission task failed: {e}");
            let notice = Notice::Error("An internal error occurred. Please try again.".to_string());
            return (StatusCode::INTERNAL_SERVER_ERROR, Html(form_page(&draft, Some(&notice))))
                .into_response();
        }
    };

    match outcome {
        Ok(_) => Redirect::to(RESUME_PATH).into_response(),
        Err(e) => {
            let status = match &e {
                SubmitError::InFlight | SubmitError::NotSubmitting => StatusCode::CONFLICT,
                SubmitError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                SubmitError::Service { .. } => StatusCode::OK,
                SubmitError::Transport { .. } => StatusCode::BAD_GATEWAY,
                SubmitError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
            };
            let notice = Notice::Error(e.user_message());
            (status, Html(form_page(&draft, Some(&notice)))).into_response()
        }
    }
}

use std::sync::Arc;

use crate::config::ResultRetention;
use crate::storage::{DraftStore, ResultStore};
use crate::submission::SubmissionController;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub drafts: DraftStore,
    pub results: ResultStore,
    pub controller: Arc<SubmissionController>,
    pub result_retention: ResultRetention,
}

//! Submission controller: drives one submit attempt from the form to the
//! result slot.
//!
//! ```text
//! Idle --begin--> Submitting --on_service_result--> Succeeded | Failed
//!  ^                  |
//!  +-- validation ----+
//! ```
//!
//! `Failed` and `Succeeded` are resting states: like `Idle`, they accept the
//! next `begin`. Only `Submitting` refuses, which is what keeps a second click
//! from starting a duplicate request. Nothing is retried automatically.

use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;
use tracing::{info, warn};

use crate::fields::Field;
use crate::generation_client::{GenerationError, GenerationService, SubmissionResult};
use crate::models::draft::FormDraft;
use crate::models::resume::ResumeDocument;
use crate::storage::{DraftStore, ResultStore, StorageError};
use crate::validation::{missing_fields_message, validate};

pub const SUCCESS_MESSAGE: &str = "Resume generated successfully! Redirecting...";
pub const IN_FLIGHT_MESSAGE: &str = "A submission is already in progress.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed { message: String },
}

impl SubmissionState {
    pub fn accepts_submit(&self) -> bool {
        !matches!(self, SubmissionState::Submitting)
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("missing required fields: {missing:?}")]
    Validation { missing: Vec<Field> },

    #[error("a submission is already in flight")]
    InFlight,

    #[error("no submission is in flight")]
    NotSubmitting,

    #[error("generation service unreachable at {origin}: {source}")]
    Transport {
        origin: String,
        #[source]
        source: GenerationError,
    },

    #[error("generation service failed: {message}")]
    Service { message: String },

    #[error("could not store the generated resume: {0}")]
    Storage(#[from] StorageError),
}

impl SubmitError {
    /// Text shown to the user next to the re-enabled submit button.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Validation { missing } => missing_fields_message(missing),
            SubmitError::InFlight => IN_FLIGHT_MESSAGE.to_string(),
            SubmitError::NotSubmitting => {
                "No submission is in progress. Please submit the form again.".to_string()
            }
            SubmitError::Transport { origin, .. } => format!(
                "Unable to connect to the server. Please make sure the backend is running on {origin}"
            ),
            SubmitError::Service { message } => message.clone(),
            SubmitError::Storage(_) => {
                "The resume was generated but could not be saved. Please try again.".to_string()
            }
        }
    }
}

pub struct SubmissionController {
    state: Mutex<SubmissionState>,
    drafts: DraftStore,
    results: ResultStore,
    service: Arc<dyn GenerationService>,
}

impl SubmissionController {
    pub fn new(drafts: DraftStore, results: ResultStore, service: Arc<dyn GenerationService>) -> Self {
        Self {
            state: Mutex::new(SubmissionState::Idle),
            drafts,
            results,
            service,
        }
    }

    // The guard is never held across an await.
    fn lock(&self) -> MutexGuard<'_, SubmissionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().clone()
    }

    /// Leaves the resting state, trims the draft and validates it.
    /// Returns the trimmed payload, with the controller now `Submitting`.
    /// A validation failure drops straight back to `Idle`.
    pub fn begin(&self, draft: &FormDraft) -> Result<FormDraft, SubmitError> {
        let mut state = self.lock();
        if !state.accepts_submit() {
            return Err(SubmitError::InFlight);
        }
        *state = SubmissionState::Submitting;

        let trimmed = draft.trimmed();
        let missing = validate(&trimmed);
        if !missing.is_empty() {
            *state = SubmissionState::Idle;
            return Err(SubmitError::Validation { missing });
        }
        Ok(trimmed)
    }

    /// Settles a `Submitting` attempt with whatever the service produced.
    ///
    /// On success the result is stored, then the draft slot is cleared, in
    /// that order. On any failure the draft is left alone. Outside
    /// `Submitting` the reply is dropped without touching either slot.
    pub async fn on_service_result(
        &self,
        result: Result<SubmissionResult, GenerationError>,
    ) -> Result<ResumeDocument, SubmitError> {
        if *self.lock() != SubmissionState::Submitting {
            warn!("Ignoring service reply with no submission in flight");
            return Err(SubmitError::NotSubmitting);
        }

        let outcome = match result {
            Ok(SubmissionResult::Success { data }) => self.store_success(data).await,
            Ok(SubmissionResult::Failure { message }) => Err(SubmitError::Service { message }),
            Err(source) => Err(SubmitError::Transport {
                origin: self.service.service_origin(),
                source,
            }),
        };

        let mut state = self.lock();
        match &outcome {
            Ok(_) => {
                *state = SubmissionState::Succeeded;
                info!("{SUCCESS_MESSAGE}");
            }
            Err(e) => {
                warn!("Submission failed: {e}");
                *state = SubmissionState::Failed {
                    message: e.user_message(),
                };
            }
        }
        outcome
    }

    async fn store_success(&self, data: ResumeDocument) -> Result<ResumeDocument, SubmitError> {
        self.results.save(&data).await?;
        if let Err(e) = self.drafts.clear().await {
            warn!("Result stored but draft slot could not be cleared: {e}");
        }
        Ok(data)
    }

    /// One full attempt: validate, call the service once, settle.
    pub async fn submit(&self, draft: &FormDraft) -> Result<ResumeDocument, SubmitError> {
        let payload = self.begin(draft)?;
        info!("Submitting draft for {}", payload.full_name);
        let reply = self.service.generate(&payload).await;
        self.on_service_result(reply).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::draft_store::DRAFT_SLOT;
    use crate::storage::result_store::RESULT_SLOT;
    use crate::storage::{InMemoryStore, KeyValueStore};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Replays a canned reply and counts calls.
    struct FakeService {
        reply: Box<dyn Fn() -> Result<SubmissionResult, GenerationError> + Send + Sync>,
        calls: AtomicUsize,
        last_payload: Mutex<Option<FormDraft>>,
        gate: Option<Arc<Notify>>,
    }

    impl FakeService {
        fn new(
            reply: impl Fn() -> Result<SubmissionResult, GenerationError> + Send + Sync + 'static,
        ) -> Self {
            Self {
                reply: Box::new(reply),
                calls: AtomicUsize::new(0),
                last_payload: Mutex::new(None),
                gate: None,
            }
        }
    }

    #[async_trait]
    impl GenerationService for FakeService {
        async fn generate(&self, draft: &FormDraft) -> Result<SubmissionResult, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_payload.lock().unwrap() = Some(draft.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            (self.reply)()
        }

        fn service_origin(&self) -> String {
            "http://localhost:5000".to_string()
        }
    }

    fn returned_data() -> Value {
        json!({
            "fullName": "Ann",
            "jobTitle": "Engineer",
            "skills": ["Rust", "SQL"],
            "experience": "• Built pipeline",
            "score": 64
        })
    }

    fn success() -> Result<SubmissionResult, GenerationError> {
        Ok(SubmissionResult::Success {
            data: serde_json::from_value(returned_data()).unwrap(),
        })
    }

    fn valid_draft() -> FormDraft {
        let mut d = FormDraft::default();
        d.set(Field::FullName, "  Ann ");
        d.set(Field::JobTitle, "Engineer");
        d.set(Field::Skills, "Rust, SQL");
        d.set(Field::Experience, "Built pipeline\n");
        d.set(Field::JobDescription, "Rust role");
        d
    }

    async fn setup(
        service: FakeService,
    ) -> (Arc<InMemoryStore>, Arc<FakeService>, SubmissionController) {
        let kv = Arc::new(InMemoryStore::new());
        let service = Arc::new(service);
        let drafts = DraftStore::new(kv.clone());
        drafts.save(&valid_draft()).await.unwrap();
        let controller =
            SubmissionController::new(drafts, ResultStore::new(kv.clone()), service.clone());
        (kv, service, controller)
    }

    #[tokio::test]
    async fn test_success_stores_result_and_clears_draft() {
        let (kv, service, controller) = setup(FakeService::new(success)).await;

        let doc = controller.submit(&valid_draft()).await.unwrap();

        assert_eq!(doc.full_name, "Ann");
        assert_eq!(controller.state(), SubmissionState::Succeeded);
        assert_eq!(kv.get(DRAFT_SLOT).await.unwrap(), None);
        let stored: Value =
            serde_json::from_str(&kv.get(RESULT_SLOT).await.unwrap().unwrap()).unwrap();
        assert_eq!(stored, returned_data());
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_payload_is_trimmed() {
        let (_, service, controller) = setup(FakeService::new(success)).await;
        controller.submit(&valid_draft()).await.unwrap();

        let payload = service.last_payload.lock().unwrap().clone().unwrap();
        assert_eq!(payload.full_name, "Ann");
        assert_eq!(payload.experience, "Built pipeline");
    }

    #[tokio::test]
    async fn test_validation_failure_makes_no_call() {
        let (kv, service, controller) = setup(FakeService::new(success)).await;
        let mut draft = FormDraft::default();
        draft.set(Field::FullName, "Ann");

        let err = controller.submit(&draft).await.unwrap_err();

        assert!(matches!(&err, SubmitError::Validation { missing } if missing.len() == 4));
        assert_eq!(
            err.user_message(),
            "Please fill in all required fields: jobTitle, skills, experience, jobDescription"
        );
        assert_eq!(controller.state(), SubmissionState::Idle);
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        assert!(kv.get(DRAFT_SLOT).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_optional_fields_do_not_block() {
        let (_, _, controller) = setup(FakeService::new(success)).await;
        let mut draft = valid_draft();
        draft.set(Field::Email, "   ");
        draft.set(Field::Portfolio, "<script>");
        assert!(controller.submit(&draft).await.is_ok());
    }

    #[tokio::test]
    async fn test_service_error_keeps_draft() {
        let (kv, _, controller) = setup(FakeService::new(|| {
            Ok(SubmissionResult::Failure {
                message: "quota exceeded".to_string(),
            })
        }))
        .await;

        let err = controller.submit(&valid_draft()).await.unwrap_err();

        assert_eq!(err.user_message(), "quota exceeded");
        assert_eq!(
            controller.state(),
            SubmissionState::Failed {
                message: "quota exceeded".to_string()
            }
        );
        assert!(kv.get(DRAFT_SLOT).await.unwrap().is_some());
        assert_eq!(kv.get(RESULT_SLOT).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_transport_error_message_names_service() {
        let (kv, _, controller) = setup(FakeService::new(|| {
            Err(GenerationError::Malformed("expected value".to_string()))
        }))
        .await;

        let err = controller.submit(&valid_draft()).await.unwrap_err();

        assert!(matches!(err, SubmitError::Transport { .. }));
        assert_eq!(
            err.user_message(),
            "Unable to connect to the server. Please make sure the backend is running on http://localhost:5000"
        );
        assert!(kv.get(DRAFT_SLOT).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failed_state_accepts_retry() {
        let (_, service, controller) = setup(FakeService::new(|| {
            Ok(SubmissionResult::Failure {
                message: "busy".to_string(),
            })
        }))
        .await;

        assert!(controller.submit(&valid_draft()).await.is_err());
        assert!(controller.submit(&valid_draft()).await.is_err());
        assert_eq!(service.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_refused() {
        let gate = Arc::new(Notify::new());
        let mut fake = FakeService::new(success);
        fake.gate = Some(gate.clone());
        let (_, service, controller) = setup(fake).await;
        let controller = Arc::new(controller);

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit(&valid_draft()).await })
        };
        while service.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        assert_eq!(controller.state(), SubmissionState::Submitting);
        let second = controller.submit(&valid_draft()).await;
        assert!(matches!(second, Err(SubmitError::InFlight)));

        gate.notify_one();
        assert!(first.await.unwrap().is_ok());
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_begin_and_on_service_result_drive_state_directly() {
        let (_, _, controller) = setup(FakeService::new(success)).await;

        let payload = controller.begin(&valid_draft()).unwrap();
        assert_eq!(payload.full_name, "Ann");
        assert_eq!(controller.state(), SubmissionState::Submitting);

        let doc = controller.on_service_result(success()).await.unwrap();
        assert_eq!(doc.score, Some(64));
        assert_eq!(controller.state(), SubmissionState::Succeeded);
    }

    /// In-memory slots that refuse writes or deletes on one chosen key.
    #[derive(Default)]
    struct FailingStore {
        inner: InMemoryStore,
        fail_set: Option<&'static str>,
        fail_delete: Option<&'static str>,
    }

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
            if self.fail_set == Some(key) {
                return Err(StorageError::Unavailable(format!("set {key} refused")));
            }
            self.inner.set(key, value).await
        }

        async fn delete(&self, key: &str) -> Result<(), StorageError> {
            if self.fail_delete == Some(key) {
                return Err(StorageError::Unavailable(format!("delete {key} refused")));
            }
            self.inner.delete(key).await
        }
    }

    async fn setup_with_store(kv: Arc<FailingStore>) -> SubmissionController {
        let drafts = DraftStore::new(kv.clone());
        drafts.save(&valid_draft()).await.unwrap();
        SubmissionController::new(
            drafts,
            ResultStore::new(kv),
            Arc::new(FakeService::new(success)),
        )
    }

    #[tokio::test]
    async fn test_result_save_failure_keeps_draft() {
        let kv = Arc::new(FailingStore {
            fail_set: Some(RESULT_SLOT),
            ..Default::default()
        });
        let controller = setup_with_store(kv.clone()).await;

        let err = controller.submit(&valid_draft()).await.unwrap_err();

        assert!(matches!(err, SubmitError::Storage(_)));
        let message = "The resume was generated but could not be saved. Please try again.";
        assert_eq!(err.user_message(), message);
        assert_eq!(
            controller.state(),
            SubmissionState::Failed {
                message: message.to_string()
            }
        );
        assert!(kv.get(DRAFT_SLOT).await.unwrap().is_some());
        assert_eq!(kv.get(RESULT_SLOT).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_draft_clear_failure_still_succeeds() {
        let kv = Arc::new(FailingStore {
            fail_delete: Some(DRAFT_SLOT),
            ..Default::default()
        });
        let controller = setup_with_store(kv.clone()).await;

        let doc = controller.submit(&valid_draft()).await.unwrap();

        assert_eq!(doc.full_name, "Ann");
        assert_eq!(controller.state(), SubmissionState::Succeeded);
        assert!(kv.get(DRAFT_SLOT).await.unwrap().is_some());
        let stored: Value =
            serde_json::from_str(&kv.get(RESULT_SLOT).await.unwrap().unwrap()).unwrap();
        assert_eq!(stored, returned_data());
    }

    #[tokio::test]
    async fn test_reply_without_submission_touches_nothing() {
        let (kv, _, controller) = setup(FakeService::new(success)).await;

        let err = controller.on_service_result(success()).await.unwrap_err();

        assert!(matches!(err, SubmitError::NotSubmitting));
        assert_eq!(controller.state(), SubmissionState::Idle);
        assert!(kv.get(DRAFT_SLOT).await.unwrap().is_some());
        assert_eq!(kv.get(RESULT_SLOT).await.unwrap(), None);
    }
}

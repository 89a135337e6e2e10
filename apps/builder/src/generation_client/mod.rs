//! Generation client: the only place the builder talks to the résumé
//! generation service.
//!
//! One request type: POST the trimmed draft as JSON, read back a
//! `{status, data | message}` envelope. Anything that does not fit that
//! envelope is a transport failure. No retries and no request timeout; a hung
//! service keeps the submission in flight.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::draft::FormDraft;
use crate::models::resume::{ResumeDocument, MAX_SCORE};

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5000/generate-resume";
pub const GENERIC_SERVICE_ERROR: &str = "An error occurred while generating the resume.";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed service response: {0}")]
    Malformed(String),
}

/// What the service said, once the envelope has been validated.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Success { data: ResumeDocument },
    Failure { message: String },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum ServiceEnvelope {
    Success {
        data: ResumeDocument,
    },
    Error {
        #[serde(default)]
        message: Option<String>,
    },
}

impl ServiceEnvelope {
    fn into_result(self) -> Result<SubmissionResult, GenerationError> {
        match self {
            ServiceEnvelope::Success { data } => {
                if let Some(score) = data.score.filter(|s| *s > MAX_SCORE) {
                    return Err(GenerationError::Malformed(format!(
                        "score {score} is outside 0-{MAX_SCORE}"
                    )));
                }
                Ok(SubmissionResult::Success { data })
            }
            ServiceEnvelope::Error { message } => Ok(SubmissionResult::Failure {
                message: message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_SERVICE_ERROR.to_string()),
            }),
        }
    }
}

/// Parses a raw response body into a `SubmissionResult`.
pub fn parse_response(body: &str) -> Result<SubmissionResult, GenerationError> {
    let envelope: ServiceEnvelope =
        serde_json::from_str(body).map_err(|e| GenerationError::Malformed(e.to_string()))?;
    envelope.into_result()
}

#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, draft: &FormDraft) -> Result<SubmissionResult, GenerationError>;

    /// Where the service lives, for the "cannot reach service" message.
    fn service_origin(&self) -> String;
}

#[derive(Clone)]
pub struct HttpGenerationClient {
    client: Client,
    endpoint: Url,
}

impl HttpGenerationClient {
    pub fn new(endpoint: &str) -> Result<Self, GenerationError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| GenerationError::Malformed(format!("invalid service URL '{endpoint}': {e}")))?;
        Ok(Self {
            client: Client::builder().build()?,
            endpoint,
        })
    }
}

#[async_trait]
impl GenerationService for HttpGenerationClient {
    async fn generate(&self, draft: &FormDraft) -> Result<SubmissionResult, GenerationError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(draft)
            .send()
            .await?;

        // Error envelopes arrive with 4xx/5xx codes, so the body decides.
        let status = response.status();
        let body = response.text().await?;
        debug!("Generation service answered {status} ({} bytes)", body.len());

        parse_response(&body).map_err(|e| {
            warn!("Generation service returned an unexpected body (status {status}): {e}");
            e
        })
    }

    fn service_origin(&self) -> String {
        self.endpoint.origin().ascii_serialization()
    }
}

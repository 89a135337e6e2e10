use std::sync::Arc;

use tracing::{debug, warn};

use super::{KeyValueStore, StorageError};
use crate::models::resume::ResumeDocument;

pub const RESULT_SLOT: &str = "resumeData";

/// Outcome of reading the result slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultLoad {
    Ready(ResumeDocument),
    Missing,
    Corrupt,
}

/// Hands the generated résumé across the navigation to the résumé view.
#[derive(Clone)]
pub struct ResultStore {
    store: Arc<dyn KeyValueStore>,
}

impl ResultStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn save(&self, document: &ResumeDocument) -> Result<(), StorageError> {
        let json = serde_json::to_string(document)?;
        self.store.set(RESULT_SLOT, json).await?;
        debug!("Result saved");
        Ok(())
    }

    pub async fn load(&self) -> Result<ResultLoad, StorageError> {
        let Some(raw) = self.store.get(RESULT_SLOT).await? else {
            return Ok(ResultLoad::Missing);
        };

        match serde_json::from_str(&raw) {
            Ok(document) => Ok(ResultLoad::Ready(document)),
            Err(e) => {
                warn!("Stored result is unparseable: {e}");
                Ok(ResultLoad::Corrupt)
            }
        }
    }

    /// Drops the stored result. Only used under the consume-once retention policy.
    pub async fn discard(&self) -> Result<(), StorageError> {
        self.store.delete(RESULT_SLOT).await
    }
}

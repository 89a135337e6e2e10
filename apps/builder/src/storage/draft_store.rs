use std::sync::Arc;

use tracing::{debug, warn};

use super::{KeyValueStore, StorageError};
use crate::models::draft::FormDraft;

pub const DRAFT_SLOT: &str = "resumeFormDraft";

/// Autosave slot for the in-progress form.
#[derive(Clone)]
pub struct DraftStore {
    store: Arc<dyn KeyValueStore>,
}

impl DraftStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Writes the whole draft. Called on every field change, no coalescing.
    pub async fn save(&self, draft: &FormDraft) -> Result<(), StorageError> {
        let json = serde_json::to_string(draft)?;
        self.store.set(DRAFT_SLOT, json).await?;
        debug!("Draft saved");
        Ok(())
    }

    /// Reads the saved draft. Absent, unreadable and unparseable slots all
    /// come back as `None`; a broken draft must never block the form.
    pub async fn restore(&self) -> Option<FormDraft> {
        let raw = match self.store.get(DRAFT_SLOT).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not read draft slot: {e}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(draft) => Some(draft),
            Err(e) => {
                warn!("Ignoring unparseable draft: {e}");
                None
            }
        }
    }

    /// Restores onto `form`, only overwriting fields whose saved value is non-empty.
    pub async fn restore_into(&self, form: &mut FormDraft) {
        if let Some(saved) = self.restore().await {
            form.apply_saved(&saved);
        }
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        self.store.delete(DRAFT_SLOT).await?;
        debug!("Draft cleared");
        Ok(())
    }
}

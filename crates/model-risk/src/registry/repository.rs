use serde::{Deserialize, Serialize};

use super::domain::ModelId;
use super::export::NarrativeBundle;
use super::scoring::ScoredRecord;

/// Inventory entry: the latest assessment for a model plus any narrative
/// text captured so far in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub assessment: ScoredRecord,
    #[serde(default)]
    pub narratives: NarrativeBundle,
}

impl InventoryEntry {
    pub fn new(assessment: ScoredRecord) -> Self {
        Self {
            assessment,
            narratives: NarrativeBundle::default(),
        }
    }

    pub fn model_id(&self) -> &ModelId {
        &self.assessment.record.model_id
    }
}

/// Session-scoped storage abstraction so the registration service can be
/// exercised in isolation. Implementations are in-memory; the export
/// artifact is the only durable output.
pub trait ModelInventory: Send + Sync {
    fn upsert(&self, entry: InventoryEntry) -> Result<InventoryEntry, InventoryError>;
    fn fetch(&self, id: &ModelId) -> Result<Option<InventoryEntry>, InventoryError>;
    fn list(&self) -> Result<Vec<InventoryEntry>, InventoryError>;
}

/// Error enumeration for inventory failures.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("model not found")]
    NotFound,
    #[error("inventory unavailable: {0}")]
    Unavailable(String),
}

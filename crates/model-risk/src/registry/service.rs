use std::sync::Arc;

use super::domain::{ModelId, RawRegistration};
use super::export::{ExportEnvelope, ImportError, NarrativeBundle};
use super::normalizer::{normalize, ValidationError};
use super::repository::{InventoryEntry, InventoryError, ModelInventory};
use super::scoring::{ScoredRecord, ScoringEngine, ScoringError};

/// Service composing the normalizer, scoring engine, and inventory. Each
/// call is an explicit value-in/value-out pipeline; no state is threaded
/// through ambient session storage.
pub struct RegistrationService<R> {
    inventory: Arc<R>,
    engine: Arc<ScoringEngine>,
}

impl<R> RegistrationService<R>
where
    R: ModelInventory + 'static,
{
    pub fn new(inventory: Arc<R>, engine: ScoringEngine) -> Self {
        Self {
            inventory,
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Register (or re-register) a model: normalize the raw input, score it
    /// under the current configuration, and upsert the assessment.
    ///
    /// On re-submission of a known id the stored registration timestamp is
    /// carried forward unless the caller supplied one, so identity fields
    /// survive edits.
    pub fn register(
        &self,
        mut raw: RawRegistration,
    ) -> Result<ScoredRecord, RegistrationError> {
        if raw.registered_at.is_none() {
            if let Some(id) = raw.model_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
                let existing = self.inventory.fetch(&ModelId(id.to_string()))?;
                if let Some(entry) = existing {
                    raw.registered_at = Some(entry.assessment.record.registered_at.clone());
                }
            }
        }

        let record = normalize(raw)?;
        let assessment = self.engine.score(&record)?;

        let stored = self.upsert_preserving_narratives(InventoryEntry::new(assessment))?;
        Ok(stored.assessment)
    }

    /// Fetch the stored assessment for a model.
    pub fn fetch(&self, id: &ModelId) -> Result<InventoryEntry, RegistrationError> {
        let entry = self.inventory.fetch(id)?.ok_or(InventoryError::NotFound)?;
        Ok(entry)
    }

    /// All assessments currently held in the session inventory.
    pub fn list(&self) -> Result<Vec<InventoryEntry>, RegistrationError> {
        Ok(self.inventory.list()?)
    }

    /// Produce the export artifact for a model, attaching the narratives and
    /// recording them on the inventory entry for later edits.
    pub fn export(
        &self,
        id: &ModelId,
        narratives: NarrativeBundle,
    ) -> Result<ExportEnvelope, RegistrationError> {
        let mut entry = self.fetch(id)?;
        entry.narratives = narratives.clone();
        let entry = self.inventory.upsert(entry)?;
        Ok(ExportEnvelope::new(entry.assessment, narratives))
    }

    /// Re-import a previously exported artifact. The embedded assessment is
    /// stored verbatim, including its original scoring version, so an
    /// artifact issued under an older table is never silently re-scored.
    pub fn import(&self, bytes: &[u8]) -> Result<InventoryEntry, RegistrationError> {
        let envelope = ExportEnvelope::from_slice(bytes)?;
        let narratives = envelope.narratives();
        let entry = self.inventory.upsert(InventoryEntry {
            assessment: envelope.assessment,
            narratives,
        })?;
        Ok(entry)
    }

    fn upsert_preserving_narratives(
        &self,
        mut entry: InventoryEntry,
    ) -> Result<InventoryEntry, RegistrationError> {
        if let Some(existing) = self.inventory.fetch(entry.model_id())? {
            entry.narratives = existing.narratives;
        }
        Ok(self.inventory.upsert(entry)?)
    }
}

/// Error raised by the registration service.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;
use model_risk::config::AppConfig;
use model_risk::error::AppError;
use model_risk::registry::{
    InventoryEntry, InventoryError, ModelId, ModelInventory, ScoringEngine,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Session-scoped inventory: assessments live only as long as the process,
/// matching the single-export lifecycle of the tool.
#[derive(Default, Clone)]
pub(crate) struct InMemoryInventory {
    entries: Arc<Mutex<HashMap<ModelId, InventoryEntry>>>,
}

impl ModelInventory for InMemoryInventory {
    fn upsert(&self, entry: InventoryEntry) -> Result<InventoryEntry, InventoryError> {
        let mut guard = self.entries.lock().expect("inventory mutex poisoned");
        guard.insert(entry.model_id().clone(), entry.clone());
        Ok(entry)
    }

    fn fetch(&self, id: &ModelId) -> Result<Option<InventoryEntry>, InventoryError> {
        let guard = self.entries.lock().expect("inventory mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<InventoryEntry>, InventoryError> {
        let guard = self.entries.lock().expect("inventory mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

/// Build the scoring engine from the resolved application configuration.
/// File-backed configurations are validated before the engine is handed out,
/// so a malformed table refuses to start instead of mis-tiering silently.
pub(crate) fn scoring_engine(config: &AppConfig) -> Result<ScoringEngine, AppError> {
    let scoring = config.scoring_config()?;
    Ok(ScoringEngine::new(scoring))
}

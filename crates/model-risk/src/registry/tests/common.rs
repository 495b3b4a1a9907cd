use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::registry::domain::{ModelId, ModelRecord, RawRegistration};
use crate::registry::repository::{InventoryEntry, InventoryError, ModelInventory};
use crate::registry::scoring::config::ScoringConfig;
use crate::registry::scoring::ScoringEngine;
use crate::registry::service::RegistrationService;

pub(super) fn raw_registration() -> RawRegistration {
    RawRegistration {
        model_id: None,
        registered_at: None,
        model_name: "Predictive Maintenance Model v2.1".to_string(),
        business_use: "Predicts equipment failures to schedule proactive servicing.".to_string(),
        domain: "Operations Efficiency".to_string(),
        model_type: "ML classifier (time-series)".to_string(),
        deployment_mode: "Real-time".to_string(),
        decision_criticality: "Medium".to_string(),
        data_sensitivity: "Confidential".to_string(),
        automation_level: "Semi-Automated".to_string(),
        regulatory_materiality: "Medium".to_string(),
        owner_team: Some("Reliability Engineering".to_string()),
        model_stage: Some("Production".to_string()),
        deployment_region: Some("North America".to_string()),
    }
}

pub(super) fn max_risk_registration() -> RawRegistration {
    RawRegistration {
        decision_criticality: "High".to_string(),
        data_sensitivity: "Restricted".to_string(),
        automation_level: "Fully Automated".to_string(),
        regulatory_materiality: "High".to_string(),
        ..raw_registration()
    }
}

pub(super) fn record() -> ModelRecord {
    crate::registry::normalizer::normalize(raw_registration()).expect("valid registration")
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(ScoringConfig::builtin())
}

#[derive(Default, Clone)]
pub(super) struct MemoryInventory {
    entries: Arc<Mutex<HashMap<ModelId, InventoryEntry>>>,
}

impl ModelInventory for MemoryInventory {
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

pub(super) struct UnavailableInventory;

impl ModelInventory for UnavailableInventory {
    fn upsert(&self, _entry: InventoryEntry) -> Result<InventoryEntry, InventoryError> {
        Err(InventoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &ModelId) -> Result<Option<InventoryEntry>, InventoryError> {
        Err(InventoryError::Unavailable("store offline".to_string()))
    }

    fn list(&self) -> Result<Vec<InventoryEntry>, InventoryError> {
        Err(InventoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn memory_service() -> (Arc<RegistrationService<MemoryInventory>>, MemoryInventory) {
    let inventory = MemoryInventory::default();
    let service = Arc::new(RegistrationService::new(
        Arc::new(inventory.clone()),
        engine(),
    ));
    (service, inventory)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}

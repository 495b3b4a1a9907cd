//! Model registration intake, inherent-risk scoring, and assessment export.
//!
//! Raw form input flows through [`normalizer::normalize`] into a canonical
//! [`ModelRecord`], the [`scoring::ScoringEngine`] turns that record into a
//! [`scoring::ScoredRecord`] under a versioned configuration, and
//! [`export::ExportEnvelope`] carries the finished assessment (plus owner
//! narratives) out of the system as a re-importable JSON artifact.

pub mod domain;
pub mod export;
pub mod normalizer;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ModelId, ModelRecord, RawRegistration, RiskFactor, DEPLOYMENT_MODE_OPTIONS, DOMAIN_OPTIONS,
    MODEL_STAGE_OPTIONS, MODEL_TYPE_OPTIONS,
};
pub use export::{
    narrative_meets_minimum, ExportEnvelope, ImportError, NarrativeBundle, EXPORT_FORMAT_VERSION,
    NARRATIVE_MIN_CHARS,
};
pub use normalizer::{normalize, ValidationError, REQUIRED_FIELDS};
pub use repository::{InventoryEntry, InventoryError, ModelInventory};
pub use router::registry_router;
pub use scoring::config::{
    FactorTable, LevelScore, ScoringConfig, ScoringConfigError, ScoringTable, TierThreshold,
    TierThresholds,
};
pub use scoring::{FactorScore, ScoreBreakdown, ScoredRecord, ScoringEngine, ScoringError};
pub use service::{RegistrationError, RegistrationService};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier wrapper for registered models.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelId(pub String);

impl ModelId {
    /// Mint a fresh inventory identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed set of inherent risk factors every registration must select a
/// level for. Declaration order is the canonical display and breakdown order;
/// the derived `Ord` relies on it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    DecisionCriticality,
    DataSensitivity,
    AutomationLevel,
    RegulatoryMateriality,
}

impl RiskFactor {
    pub const ALL: [RiskFactor; 4] = [
        RiskFactor::DecisionCriticality,
        RiskFactor::DataSensitivity,
        RiskFactor::AutomationLevel,
        RiskFactor::RegulatoryMateriality,
    ];

    /// Snake-case key used in serialized records and configuration files.
    pub fn key(&self) -> &'static str {
        match self {
            RiskFactor::DecisionCriticality => "decision_criticality",
            RiskFactor::DataSensitivity => "data_sensitivity",
            RiskFactor::AutomationLevel => "automation_level",
            RiskFactor::RegulatoryMateriality => "regulatory_materiality",
        }
    }

    /// Human-readable label for reports and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            RiskFactor::DecisionCriticality => "Decision Criticality",
            RiskFactor::DataSensitivity => "Data Sensitivity",
            RiskFactor::AutomationLevel => "Automation Level",
            RiskFactor::RegulatoryMateriality => "Regulatory Materiality",
        }
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Controlled vocabulary for the business domain select.
pub const DOMAIN_OPTIONS: &[&str] = &[
    "Credit Risk",
    "Market Risk",
    "Fraud Detection",
    "Operations Efficiency",
    "Customer Analytics",
    "Compliance & AML",
];

/// Controlled vocabulary for the model type select.
pub const MODEL_TYPE_OPTIONS: &[&str] = &[
    "ML classifier (tabular)",
    "ML classifier (time-series)",
    "Regression model",
    "LLM / Generative AI",
    "Rules-based engine",
    "Optimization model",
];

/// Controlled vocabulary for the deployment mode select.
pub const DEPLOYMENT_MODE_OPTIONS: &[&str] = &["Real-time", "Batch", "Hybrid"];

/// Controlled vocabulary for the optional lifecycle stage select.
pub const MODEL_STAGE_OPTIONS: &[&str] = &[
    "Proof of Concept",
    "Development",
    "Pre-Production",
    "Production",
    "Retired",
];

/// Untyped registration input as collected by a form or uploaded document.
/// Field-level validation happens in the normalizer, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRegistration {
    /// Present on re-submission/edit; preserved verbatim when set.
    #[serde(default)]
    pub model_id: Option<String>,
    /// Present on re-submission/edit; preserved verbatim when set.
    #[serde(default)]
    pub registered_at: Option<String>,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub business_use: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub model_type: String,
    #[serde(default)]
    pub deployment_mode: String,
    #[serde(default)]
    pub decision_criticality: String,
    #[serde(default)]
    pub data_sensitivity: String,
    #[serde(default)]
    pub automation_level: String,
    #[serde(default)]
    pub regulatory_materiality: String,
    #[serde(default)]
    pub owner_team: Option<String>,
    #[serde(default)]
    pub model_stage: Option<String>,
    #[serde(default)]
    pub deployment_region: Option<String>,
}

/// Canonical registration record produced by the normalizer. Identity fields
/// (`model_id`, `registered_at`) are assigned once and survive re-assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub model_id: ModelId,
    /// UTC RFC 3339 at whole-second precision so exports sort lexically.
    pub registered_at: String,
    pub model_name: String,
    pub business_use: String,
    pub domain: String,
    pub model_type: String,
    pub deployment_mode: String,
    pub decision_criticality: String,
    pub data_sensitivity: String,
    pub automation_level: String,
    pub regulatory_materiality: String,
    pub owner_team: Option<String>,
    pub model_stage: Option<String>,
    pub deployment_region: Option<String>,
}

impl ModelRecord {
    /// Selected level for a risk factor. The record carries one field per
    /// factor, so every factor structurally has a selection.
    pub fn selection(&self, factor: RiskFactor) -> &str {
        match factor {
            RiskFactor::DecisionCriticality => &self.decision_criticality,
            RiskFactor::DataSensitivity => &self.data_sensitivity,
            RiskFactor::AutomationLevel => &self.automation_level,
            RiskFactor::RegulatoryMateriality => &self.regulatory_materiality,
        }
    }

    /// Turn the record back into raw input, e.g. to prefill an edit form.
    pub fn to_raw(&self) -> RawRegistration {
        RawRegistration {
            model_id: Some(self.model_id.0.clone()),
            registered_at: Some(self.registered_at.clone()),
            model_name: self.model_name.clone(),
            business_use: self.business_use.clone(),
            domain: self.domain.clone(),
            model_type: self.model_type.clone(),
            deployment_mode: self.deployment_mode.clone(),
            decision_criticality: self.decision_criticality.clone(),
            data_sensitivity: self.data_sensitivity.clone(),
            automation_level: self.automation_level.clone(),
            regulatory_materiality: self.regulatory_materiality.clone(),
            owner_team: self.owner_team.clone(),
            model_stage: self.model_stage.clone(),
            deployment_region: self.deployment_region.clone(),
        }
    }
}

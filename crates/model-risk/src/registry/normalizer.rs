use chrono::{SecondsFormat, Utc};

use super::domain::{ModelId, ModelRecord, RawRegistration};

/// Required registration fields, in form order. Surfaced alongside
/// validation failures so callers can re-prompt precisely.
pub const REQUIRED_FIELDS: &[&str] = &[
    "model_name",
    "business_use",
    "domain",
    "model_type",
    "deployment_mode",
    "decision_criticality",
    "data_sensitivity",
    "automation_level",
    "regulatory_materiality",
];

/// Raised when required registration fields are absent or blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

/// Produce the canonical registration record from raw form input.
///
/// Identity fields are idempotent: an incoming `model_id` or `registered_at`
/// is preserved verbatim, and fresh values are assigned only when absent.
/// Optional metadata normalizes blank input to `None` so downstream
/// consumers can tell "not provided" from "provided but empty".
pub fn normalize(raw: RawRegistration) -> Result<ModelRecord, ValidationError> {
    let required = [
        ("model_name", raw.model_name.trim()),
        ("business_use", raw.business_use.trim()),
        ("domain", raw.domain.trim()),
        ("model_type", raw.model_type.trim()),
        ("deployment_mode", raw.deployment_mode.trim()),
        ("decision_criticality", raw.decision_criticality.trim()),
        ("data_sensitivity", raw.data_sensitivity.trim()),
        ("automation_level", raw.automation_level.trim()),
        ("regulatory_materiality", raw.regulatory_materiality.trim()),
    ];

    let missing: Vec<&'static str> = required
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| *field)
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError { missing });
    }

    let model_id = raw
        .model_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| ModelId(id.to_string()))
        .unwrap_or_else(ModelId::generate);

    let registered_at = raw
        .registered_at
        .as_deref()
        .map(str::trim)
        .filter(|stamp| !stamp.is_empty())
        .map(str::to_string)
        .unwrap_or_else(registration_timestamp);

    Ok(ModelRecord {
        model_id,
        registered_at,
        model_name: raw.model_name.trim().to_string(),
        business_use: raw.business_use.trim().to_string(),
        domain: raw.domain.trim().to_string(),
        model_type: raw.model_type.trim().to_string(),
        deployment_mode: raw.deployment_mode.trim().to_string(),
        decision_criticality: raw.decision_criticality.trim().to_string(),
        data_sensitivity: raw.data_sensitivity.trim().to_string(),
        automation_level: raw.automation_level.trim().to_string(),
        regulatory_materiality: raw.regulatory_materiality.trim().to_string(),
        owner_team: normalize_optional(raw.owner_team),
        model_stage: normalize_optional(raw.model_stage),
        deployment_region: normalize_optional(raw.deployment_region),
    })
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// UTC registration timestamp at whole-second precision, `Z`-suffixed.
fn registration_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

use serde::{Deserialize, Serialize};

use super::scoring::ScoredRecord;

/// Schema marker stamped into every export envelope.
pub const EXPORT_FORMAT_VERSION: &str = "lab1_export_v1";

/// Minimum owner narrative length. Enforced by the interface layer before an
/// export is issued; the core only publishes the constant.
pub const NARRATIVE_MIN_CHARS: usize = 50;

/// Owner-authored narrative text attached to an export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeBundle {
    pub owner_risk_narrative: String,
    #[serde(default)]
    pub mitigations_proposed: Option<String>,
    #[serde(default)]
    pub open_questions: Option<String>,
}

/// The complete export artifact: the flattened assessment plus narratives
/// and the envelope schema marker. This is the only durable output of the
/// system and is designed to re-import losslessly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEnvelope {
    #[serde(flatten)]
    pub assessment: ScoredRecord,
    pub owner_risk_narrative: String,
    pub mitigations_proposed: Option<String>,
    pub open_questions: Option<String>,
    pub export_format_version: String,
}

/// Import failures. All indicate an artifact that was not produced by this
/// system (or was tampered with) and are surfaced to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("export_format_version mismatch: expected '{EXPORT_FORMAT_VERSION}', found {found:?}")]
    FormatMismatch { found: Option<String> },
    #[error("artifact is missing model_id/model_name identity fields")]
    MissingIdentity,
}

impl ExportEnvelope {
    pub fn new(assessment: ScoredRecord, narratives: NarrativeBundle) -> Self {
        Self {
            assessment,
            owner_risk_narrative: narratives.owner_risk_narrative,
            mitigations_proposed: narratives.mitigations_proposed,
            open_questions: narratives.open_questions,
            export_format_version: EXPORT_FORMAT_VERSION.to_string(),
        }
    }

    pub fn narratives(&self) -> NarrativeBundle {
        NarrativeBundle {
            owner_risk_narrative: self.owner_risk_narrative.clone(),
            mitigations_proposed: self.mitigations_proposed.clone(),
            open_questions: self.open_questions.clone(),
        }
    }

    /// Parse and verify a previously exported artifact. The format marker
    /// and identity fields are checked strictly so junk uploads are rejected
    /// before they reach the inventory.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ImportError> {
        let raw: serde_json::Value = serde_json::from_slice(bytes)?;

        let found = raw
            .get("export_format_version")
            .and_then(|value| value.as_str())
            .map(str::to_string);
        if found.as_deref() != Some(EXPORT_FORMAT_VERSION) {
            return Err(ImportError::FormatMismatch { found });
        }

        let has_identity = ["model_id", "model_name"].iter().all(|field| {
            raw.get(*field)
                .and_then(|value| value.as_str())
                .is_some_and(|value| !value.trim().is_empty())
        });
        if !has_identity {
            return Err(ImportError::MissingIdentity);
        }

        Ok(serde_json::from_value(raw)?)
    }

    /// Suggested download filename derived from the model name.
    pub fn suggested_filename(&self) -> String {
        let slug = self
            .assessment
            .record
            .model_name
            .to_lowercase()
            .replace(char::is_whitespace, "_");
        format!("lab1_{slug}.json")
    }
}

/// Whether an owner narrative satisfies the export minimum.
pub fn narrative_meets_minimum(narrative: &str) -> bool {
    narrative.chars().count() >= NARRATIVE_MIN_CHARS
}

use super::common::*;
use crate::registry::export::{
    narrative_meets_minimum, ExportEnvelope, ImportError, NarrativeBundle, EXPORT_FORMAT_VERSION,
};

fn narratives() -> NarrativeBundle {
    NarrativeBundle {
        owner_risk_narrative:
            "The model automates maintenance scheduling for critical pumps across two plants."
                .to_string(),
        mitigations_proposed: Some("Quarterly back-testing against failure logs.".to_string()),
        open_questions: None,
    }
}

#[test]
fn envelope_carries_the_format_marker() {
    let assessment = engine().score(&record()).expect("scorable");
    let envelope = ExportEnvelope::new(assessment, narratives());

    assert_eq!(envelope.export_format_version, EXPORT_FORMAT_VERSION);

    let json = serde_json::to_value(&envelope).expect("serializes");
    assert_eq!(
        json.get("export_format_version").and_then(|v| v.as_str()),
        Some(EXPORT_FORMAT_VERSION)
    );
}

#[test]
fn envelope_serializes_flat_assessment_fields() {
    let assessment = engine().score(&record()).expect("scorable");
    let envelope = ExportEnvelope::new(assessment.clone(), narratives());

    let json = serde_json::to_value(&envelope).expect("serializes");
    assert_eq!(
        json.get("model_id").and_then(|v| v.as_str()),
        Some(assessment.record.model_id.0.as_str())
    );
    assert_eq!(
        json.get("inherent_risk_score").and_then(|v| v.as_u64()),
        Some(u64::from(assessment.inherent_risk_score))
    );
    assert_eq!(
        json.get("proposed_risk_tier").and_then(|v| v.as_str()),
        Some(assessment.proposed_risk_tier.as_str())
    );
    let breakdown = json.get("score_breakdown").expect("breakdown present");
    assert!(breakdown.get("decision_criticality").is_some());
}

#[test]
fn export_then_import_round_trips_byte_for_byte_identity() {
    let assessment = engine().score(&record()).expect("scorable");
    let envelope = ExportEnvelope::new(assessment.clone(), narratives());
    let bytes = serde_json::to_vec(&envelope).expect("serializes");

    let imported = ExportEnvelope::from_slice(&bytes).expect("round trip");

    assert_eq!(imported.assessment.record, assessment.record);
    assert_eq!(imported.assessment, assessment);
    assert_eq!(imported.narratives(), narratives());
}

#[test]
fn import_rejects_a_wrong_format_marker() {
    let assessment = engine().score(&record()).expect("scorable");
    let mut json = serde_json::to_value(ExportEnvelope::new(assessment, narratives()))
        .expect("serializes");
    json["export_format_version"] = serde_json::json!("lab2_export_v9");
    let bytes = serde_json::to_vec(&json).expect("serializes");

    let error = ExportEnvelope::from_slice(&bytes).expect_err("marker mismatch");
    match error {
        ImportError::FormatMismatch { found } => {
            assert_eq!(found.as_deref(), Some("lab2_export_v9"));
        }
        other => panic!("expected format mismatch, got {other:?}"),
    }
}

#[test]
fn import_rejects_missing_identity() {
    let assessment = engine().score(&record()).expect("scorable");
    let mut json = serde_json::to_value(ExportEnvelope::new(assessment, narratives()))
        .expect("serializes");
    json["model_id"] = serde_json::json!("");
    let bytes = serde_json::to_vec(&json).expect("serializes");

    let error = ExportEnvelope::from_slice(&bytes).expect_err("blank model_id");
    assert!(matches!(error, ImportError::MissingIdentity));
}

#[test]
fn import_rejects_junk_bytes() {
    let error = ExportEnvelope::from_slice(b"not json at all").expect_err("junk");
    assert!(matches!(error, ImportError::Parse(_)));
}

#[test]
fn narrative_minimum_counts_characters() {
    assert!(!narrative_meets_minimum("too short"));
    assert!(narrative_meets_minimum(&"x".repeat(50)));
    // Multi-byte characters count as characters, not bytes.
    assert!(narrative_meets_minimum(&"é".repeat(50)));
}

#[test]
fn suggested_filename_slugs_the_model_name() {
    let assessment = engine().score(&record()).expect("scorable");
    let envelope = ExportEnvelope::new(assessment, narratives());

    assert_eq!(
        envelope.suggested_filename(),
        "lab1_predictive_maintenance_model_v2.1.json"
    );
}

use std::sync::Arc;

use super::common::*;
use crate::registry::domain::ModelId;
use crate::registry::export::{ExportEnvelope, NarrativeBundle};
use crate::registry::normalizer::ValidationError;
use crate::registry::repository::{InventoryError, ModelInventory};
use crate::registry::service::{RegistrationError, RegistrationService};

fn bundle() -> NarrativeBundle {
    NarrativeBundle {
        owner_risk_narrative:
            "Scores are driven by full automation of restricted data in a regulated process."
                .to_string(),
        mitigations_proposed: None,
        open_questions: Some("Confirm fallback procedure ownership.".to_string()),
    }
}

#[test]
fn register_scores_and_stores_the_assessment() {
    let (service, inventory) = memory_service();

    let assessment = service.register(raw_registration()).expect("registers");

    assert_eq!(assessment.inherent_risk_score, 8);
    assert_eq!(assessment.proposed_risk_tier, "Medium");

    let stored = inventory
        .fetch(&assessment.record.model_id)
        .expect("inventory reachable")
        .expect("entry stored");
    assert_eq!(stored.assessment, assessment);
}

#[test]
fn resubmission_with_known_id_preserves_the_original_timestamp() {
    let (service, _) = memory_service();

    let first = service.register(raw_registration()).expect("registers");

    // Edit in the same session: same id, no timestamp supplied.
    let mut edited = raw_registration();
    edited.model_id = Some(first.record.model_id.0.clone());
    edited.decision_criticality = "High".to_string();

    let second = service.register(edited).expect("re-registers");

    assert_eq!(second.record.model_id, first.record.model_id);
    assert_eq!(second.record.registered_at, first.record.registered_at);
    assert_eq!(second.inherent_risk_score, 9);
}

#[test]
fn validation_failure_stores_nothing() {
    let (service, inventory) = memory_service();

    let mut raw = raw_registration();
    raw.business_use = String::new();

    let error = service.register(raw).expect_err("invalid input");
    match error {
        RegistrationError::Validation(ValidationError { missing }) => {
            assert_eq!(missing, vec!["business_use"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(inventory.list().expect("reachable").is_empty());
}

#[test]
fn export_attaches_narratives_and_remembers_them() {
    let (service, _) = memory_service();
    let assessment = service.register(raw_registration()).expect("registers");

    let envelope = service
        .export(&assessment.record.model_id, bundle())
        .expect("exports");

    assert_eq!(envelope.assessment, assessment);
    assert_eq!(envelope.narratives(), bundle());

    let entry = service.fetch(&assessment.record.model_id).expect("stored");
    assert_eq!(entry.narratives, bundle());
}

#[test]
fn export_of_unknown_model_is_not_found() {
    let (service, _) = memory_service();

    let error = service
        .export(&ModelId("missing".to_string()), bundle())
        .expect_err("nothing registered");

    assert!(matches!(
        error,
        RegistrationError::Inventory(InventoryError::NotFound)
    ));
}

#[test]
fn import_restores_an_exported_assessment_verbatim() {
    let (service, _) = memory_service();
    let assessment = service.register(raw_registration()).expect("registers");
    let envelope = service
        .export(&assessment.record.model_id, bundle())
        .expect("exports");
    let bytes = serde_json::to_vec(&envelope).expect("serializes");

    // A second session starts empty and resumes from the artifact.
    let (resumed, _) = memory_service();
    let entry = resumed.import(&bytes).expect("imports");

    assert_eq!(entry.assessment, assessment);
    assert_eq!(entry.narratives, bundle());
    assert_eq!(
        resumed
            .fetch(&assessment.record.model_id)
            .expect("stored")
            .assessment,
        assessment
    );
}

#[test]
fn import_keeps_the_original_scoring_version() {
    let (service, _) = memory_service();
    let assessment = service.register(raw_registration()).expect("registers");
    let mut envelope = ExportEnvelope::new(assessment, bundle());
    envelope.assessment.scoring_version = "0.9".to_string();
    let bytes = serde_json::to_vec(&envelope).expect("serializes");

    let entry = service.import(&bytes).expect("imports");

    assert_eq!(entry.assessment.scoring_version, "0.9");
}

#[test]
fn inventory_outage_surfaces_as_inventory_error() {
    let service = RegistrationService::new(Arc::new(UnavailableInventory), engine());

    let error = service.register(raw_registration()).expect_err("store down");

    assert!(matches!(
        error,
        RegistrationError::Inventory(InventoryError::Unavailable(_))
    ));
}

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use model_risk::config::AppConfig;
use model_risk::error::AppError;
use model_risk::registry::{
    NarrativeBundle, RawRegistration, RegistrationService, RiskFactor, ScoredRecord,
};

use crate::infra::{scoring_engine, InMemoryInventory};

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Path to a raw registration JSON document
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Write the assessment JSON here instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the raw export JSON in addition to the rendered report
    #[arg(long)]
    pub(crate) show_json: bool,
}

/// One-shot assessment: normalize and score a registration file without
/// starting the HTTP service.
pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = scoring_engine(&config)?;
    let service = RegistrationService::new(Arc::new(InMemoryInventory::default()), engine);

    let raw_bytes = std::fs::read(&args.input)?;
    let raw: RawRegistration = serde_json::from_slice(&raw_bytes)
        .map_err(|err| AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))?;

    let assessment = service.register(raw)?;
    let rendered = serde_json::to_string_pretty(&assessment)
        .map_err(|err| AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))?;

    match args.output {
        Some(path) => std::fs::write(path, rendered)?,
        None => println!("{rendered}"),
    }

    Ok(())
}

/// End-to-end walkthrough: register a sample model, show the assessment, and
/// produce the export artifact.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = scoring_engine(&config)?;
    let service = RegistrationService::new(Arc::new(InMemoryInventory::default()), engine);

    println!("Model registration & inherent-risk assessment demo");

    let assessment = service.register(sample_registration())?;
    render_assessment(&assessment);

    let narratives = NarrativeBundle {
        owner_risk_narrative:
            "The model schedules maintenance for safety-relevant equipment with limited human \
             review; telemetry inputs are confidential plant data."
                .to_string(),
        mitigations_proposed: Some(
            "Weekly drift report reviewed by the reliability engineering lead.".to_string(),
        ),
        open_questions: Some("Who owns the manual override runbook?".to_string()),
    };

    let envelope = service.export(&assessment.record.model_id, narratives)?;
    println!("\nExport artifact: {}", envelope.suggested_filename());
    println!("Export format:   {}", envelope.export_format_version);

    if args.show_json {
        let rendered = serde_json::to_string_pretty(&envelope).map_err(|err| {
            AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
        })?;
        println!("\n{rendered}");
    }

    Ok(())
}

fn render_assessment(assessment: &ScoredRecord) {
    let record = &assessment.record;
    println!("\n{}", record.model_name);
    println!("  Model ID:      {}", record.model_id);
    println!("  Registered at: {}", record.registered_at);
    println!("  Domain:        {}", record.domain);
    println!("  Type:          {}", record.model_type);
    println!("  Deployment:    {}", record.deployment_mode);

    println!("\nScore breakdown (version {}):", assessment.scoring_version);
    for factor in RiskFactor::ALL {
        if let Some(entry) = assessment.score_breakdown.get(&factor) {
            println!(
                "  {:<24} {:<16} {} pts",
                factor.label(),
                entry.value,
                entry.points
            );
        }
    }

    println!(
        "\nInherent risk score: {} -> {} ({})",
        assessment.inherent_risk_score,
        assessment.proposed_risk_tier,
        assessment.proposed_tier_description
    );
}

fn sample_registration() -> RawRegistration {
    RawRegistration {
        model_name: "Predictive Maintenance Model v2.1".to_string(),
        business_use:
            "Predicts imminent equipment failures from sensor telemetry so maintenance can be \
             scheduled before unplanned downtime."
                .to_string(),
        domain: "Operations Efficiency".to_string(),
        model_type: "ML classifier (time-series)".to_string(),
        deployment_mode: "Real-time".to_string(),
        decision_criticality: "High".to_string(),
        data_sensitivity: "Confidential".to_string(),
        automation_level: "Semi-Automated".to_string(),
        regulatory_materiality: "Medium".to_string(),
        owner_team: Some("Reliability Engineering".to_string()),
        model_stage: Some("Production".to_string()),
        deployment_region: Some("North America".to_string()),
        ..Default::default()
    }
}

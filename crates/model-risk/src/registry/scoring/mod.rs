//! Inherent-risk scoring: a pure function from a canonical registration
//! record and a versioned configuration to a total score, a per-factor
//! breakdown, and a tier assignment.

pub mod config;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{ModelRecord, RiskFactor};
use config::ScoringConfig;

/// Selected level and awarded points for one factor of an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorScore {
    pub value: String,
    pub points: u32,
}

/// Per-factor breakdown in canonical factor order. `BTreeMap` keyed by
/// `RiskFactor` serializes in enum declaration order, keeping the display
/// stable across runs regardless of input order.
pub type ScoreBreakdown = BTreeMap<RiskFactor, FactorScore>;

/// A registration record together with its inherent-risk assessment. Owns a
/// copy of the record so later configuration changes never retroactively
/// alter an issued assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: ModelRecord,
    pub inherent_risk_score: u32,
    pub proposed_risk_tier: String,
    pub proposed_tier_description: String,
    pub score_breakdown: ScoreBreakdown,
    pub scoring_version: String,
}

/// Scoring failures. Both variants indicate an input/configuration mismatch
/// and reproduce deterministically, so they are surfaced and never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("level '{level}' is not in the scoring table for factor '{factor}'")]
    UnknownCategory { factor: RiskFactor, level: String },
    #[error("total score {score} falls outside every configured tier range")]
    UnscoredRange { score: u32 },
}

/// Stateless engine applying one validated scoring configuration. Immutable
/// after construction; hot reload means building a new engine and swapping
/// the `Arc` wholesale.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    /// Build an engine over a configuration. Structural validation happens
    /// at load time ([`ScoringConfig::validate`]); the engine itself only
    /// surfaces lookup failures, so a mismatched table still fails loudly
    /// per record instead of being silently papered over.
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn scoring_version(&self) -> &str {
        &self.config.scoring_version
    }

    /// Score a registration record under this engine's configuration.
    pub fn score(&self, record: &ModelRecord) -> Result<ScoredRecord, ScoringError> {
        let mut breakdown = ScoreBreakdown::new();
        let mut total: u32 = 0;

        for factor in RiskFactor::ALL {
            let level = record.selection(factor);
            let points = self
                .config
                .risk_scoring_table
                .points(factor, level)
                .ok_or_else(|| ScoringError::UnknownCategory {
                    factor,
                    level: level.to_string(),
                })?;
            total += points;
            breakdown.insert(
                factor,
                FactorScore {
                    value: level.to_string(),
                    points,
                },
            );
        }

        let tier = self
            .config
            .tier_thresholds
            .assign(total)
            .ok_or(ScoringError::UnscoredRange { score: total })?;

        Ok(ScoredRecord {
            record: record.clone(),
            inherent_risk_score: total,
            proposed_risk_tier: tier.tier.clone(),
            proposed_tier_description: tier.description.clone(),
            score_breakdown: breakdown,
            scoring_version: self.config.scoring_version.clone(),
        })
    }
}

use serde::{Deserialize, Serialize};

use crate::registry::domain::RiskFactor;

/// One selectable level for a factor and the points it contributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelScore {
    pub level: String,
    pub points: u32,
}

/// Level vocabulary and points for a single risk factor. The row order is
/// authoritative: it drives both form option lists and breakdown display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorTable {
    pub factor: RiskFactor,
    pub levels: Vec<LevelScore>,
}

/// The full factor → level → points mapping for one scoring version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringTable {
    pub factors: Vec<FactorTable>,
}

impl ScoringTable {
    /// Points awarded for a (factor, level) pair, `None` when the level is
    /// not part of this version's vocabulary.
    pub fn points(&self, factor: RiskFactor, level: &str) -> Option<u32> {
        self.levels(factor)?
            .iter()
            .find(|entry| entry.level == level)
            .map(|entry| entry.points)
    }

    /// Ordered level vocabulary for a factor.
    pub fn levels(&self, factor: RiskFactor) -> Option<&[LevelScore]> {
        self.factors
            .iter()
            .find(|table| table.factor == factor)
            .map(|table| table.levels.as_slice())
    }

    /// Smallest achievable total under this table.
    pub fn min_total(&self) -> u32 {
        self.factors
            .iter()
            .filter_map(|table| table.levels.iter().map(|entry| entry.points).min())
            .sum()
    }

    /// Largest achievable total under this table.
    pub fn max_total(&self) -> u32 {
        self.factors
            .iter()
            .filter_map(|table| table.levels.iter().map(|entry| entry.points).max())
            .sum()
    }
}

/// One risk tier and the inclusive score interval it covers. `max_score` is
/// `None` only for an open-ended top tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThreshold {
    pub tier: String,
    pub min_score: u32,
    #[serde(default)]
    pub max_score: Option<u32>,
    pub description: String,
}

impl TierThreshold {
    pub fn contains(&self, score: u32) -> bool {
        score >= self.min_score && self.max_score.map_or(true, |max| score <= max)
    }
}

/// Ordered tier definitions partitioning the achievable score range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierThresholds {
    pub tiers: Vec<TierThreshold>,
}

impl TierThresholds {
    /// First tier whose interval contains the score. With a validated
    /// configuration this matches at most once.
    pub fn assign(&self, score: u32) -> Option<&TierThreshold> {
        self.tiers.iter().find(|tier| tier.contains(score))
    }
}

/// Versioned scoring configuration: the table, the tier thresholds, and the
/// version string stamped into every assessment produced under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub scoring_version: String,
    pub risk_scoring_table: ScoringTable,
    pub tier_thresholds: TierThresholds,
}

/// Structural defects detected when validating a scoring configuration.
/// All of these are refuse-to-start conditions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("scoring table has no entry for factor '{factor}'")]
    MissingFactor { factor: RiskFactor },
    #[error("factor '{factor}' has an empty level list")]
    EmptyLevels { factor: RiskFactor },
    #[error("factor '{factor}' lists level '{level}' more than once")]
    DuplicateLevel { factor: RiskFactor, level: String },
    #[error("tier thresholds are empty")]
    NoTiers,
    #[error("tier '{tier}' has min_score {min} above max_score {max}")]
    InvertedTier { tier: String, min: u32, max: u32 },
    #[error("tier '{tier}' is open-ended but not the last tier")]
    OpenEndedNotLast { tier: String },
    #[error("tier '{tier}' starts at {found}, expected {expected} to keep the range contiguous")]
    TierGap {
        tier: String,
        expected: u32,
        found: u32,
    },
    #[error("achievable totals {min_total}..={max_total} are not fully covered by the tiers")]
    UncoveredRange { min_total: u32, max_total: u32 },
}

impl ScoringConfig {
    /// Check the invariants the scoring engine relies on: every factor
    /// present with a non-empty, duplicate-free vocabulary, and tiers that
    /// partition the achievable total range contiguously without overlap.
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        for factor in RiskFactor::ALL {
            let levels = self
                .risk_scoring_table
                .levels(factor)
                .ok_or(ScoringConfigError::MissingFactor { factor })?;
            if levels.is_empty() {
                return Err(ScoringConfigError::EmptyLevels { factor });
            }
            for (index, entry) in levels.iter().enumerate() {
                if levels[..index].iter().any(|prior| prior.level == entry.level) {
                    return Err(ScoringConfigError::DuplicateLevel {
                        factor,
                        level: entry.level.clone(),
                    });
                }
            }
        }

        let tiers = &self.tier_thresholds.tiers;
        if tiers.is_empty() {
            return Err(ScoringConfigError::NoTiers);
        }

        let mut expected_min: Option<u32> = None;
        for (index, tier) in tiers.iter().enumerate() {
            if let Some(max) = tier.max_score {
                if max < tier.min_score {
                    return Err(ScoringConfigError::InvertedTier {
                        tier: tier.tier.clone(),
                        min: tier.min_score,
                        max,
                    });
                }
            } else if index + 1 != tiers.len() {
                return Err(ScoringConfigError::OpenEndedNotLast {
                    tier: tier.tier.clone(),
                });
            }

            if let Some(expected) = expected_min {
                if tier.min_score != expected {
                    return Err(ScoringConfigError::TierGap {
                        tier: tier.tier.clone(),
                        expected,
                        found: tier.min_score,
                    });
                }
            }
            expected_min = tier.max_score.map(|max| max + 1);
        }

        let min_total = self.risk_scoring_table.min_total();
        let max_total = self.risk_scoring_table.max_total();
        let covered = tiers.first().map_or(false, |first| first.min_score <= min_total)
            && tiers
                .last()
                .map_or(false, |last| last.max_score.map_or(true, |max| max >= max_total));
        if !covered {
            return Err(ScoringConfigError::UncoveredRange {
                min_total,
                max_total,
            });
        }

        Ok(())
    }

    /// The v1.0 configuration shipped with the service.
    pub fn builtin() -> Self {
        fn table(factor: RiskFactor, levels: &[(&str, u32)]) -> FactorTable {
            FactorTable {
                factor,
                levels: levels
                    .iter()
                    .map(|(level, points)| LevelScore {
                        level: (*level).to_string(),
                        points: *points,
                    })
                    .collect(),
            }
        }

        fn tier(tier: &str, min: u32, max: Option<u32>, description: &str) -> TierThreshold {
            TierThreshold {
                tier: tier.to_string(),
                min_score: min,
                max_score: max,
                description: description.to_string(),
            }
        }

        Self {
            scoring_version: "1.0".to_string(),
            risk_scoring_table: ScoringTable {
                factors: vec![
                    table(
                        RiskFactor::DecisionCriticality,
                        &[("Low", 1), ("Medium", 2), ("High", 3)],
                    ),
                    table(
                        RiskFactor::DataSensitivity,
                        &[("Public", 1), ("Confidential", 2), ("Restricted", 3)],
                    ),
                    table(
                        RiskFactor::AutomationLevel,
                        &[("Manual", 1), ("Semi-Automated", 2), ("Fully Automated", 3)],
                    ),
                    table(
                        RiskFactor::RegulatoryMateriality,
                        &[("Low", 1), ("Medium", 2), ("High", 3)],
                    ),
                ],
            },
            tier_thresholds: TierThresholds {
                tiers: vec![
                    tier("Low", 4, Some(7), "Minimal oversight needed"),
                    tier("Medium", 8, Some(10), "Standard oversight needed"),
                    tier("High", 11, Some(12), "Intensive oversight needed"),
                ],
            },
        }
    }
}

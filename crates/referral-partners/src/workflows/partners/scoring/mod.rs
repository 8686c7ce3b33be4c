mod config;
mod rules;

pub use config::{ScoringConfig, DEFAULT_ACCEPTED_NETWORKS};
pub use rules::{round_tenths, score_bh_gap, score_networks, score_providers, score_volume};

use super::domain::{Practice, TierLabel};
use super::tiering;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Stateless scorer that applies the rubric configuration to a practice.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Total score (one decimal) and the per-criterion points behind it.
    pub fn score(&self, practice: &Practice) -> (f64, ScoreBreakdown) {
        let breakdown = ScoreBreakdown {
            providers: score_providers(practice.provider_count),
            bh_gap: score_bh_gap(&practice.bh_referral_gap),
            networks: score_networks(
                &practice.insurance_networks,
                &self.config.accepted_networks,
            ),
            volume: score_volume(practice.monthly_patient_volume),
        };

        (breakdown.total(), breakdown)
    }

    pub fn evaluate(&self, practice: &Practice) -> ScoredPractice {
        let (score, breakdown) = self.score(practice);
        let tier = tiering::classify(score);
        debug!(practice = %practice.name, score, tier = tier.label(), "scored practice");

        ScoredPractice {
            practice: practice.clone(),
            score,
            breakdown,
            tier,
        }
    }

    pub fn evaluate_all(&self, practices: &[Practice]) -> Vec<ScoredPractice> {
        let scored: Vec<_> = practices.iter().map(|p| self.evaluate(p)).collect();
        info!(practices = scored.len(), "scored referral partner list");
        scored
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Providers,
    BhGap,
    Networks,
    Volume,
}

impl Criterion {
    pub const fn ordered() -> [Self; 4] {
        [Self::Providers, Self::BhGap, Self::Networks, Self::Volume]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Providers => "Providers",
            Self::BhGap => "BH Gap",
            Self::Networks => "Networks",
            Self::Volume => "Volume",
        }
    }

    pub const fn max_points(self) -> f64 {
        match self {
            Self::Providers => rules::PROVIDERS_MAX,
            Self::BhGap => rules::BH_GAP_MAX,
            Self::Networks => rules::NETWORKS_MAX,
            Self::Volume => rules::VOLUME_MAX,
        }
    }
}

/// Points awarded per criterion.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub providers: f64,
    pub bh_gap: f64,
    pub networks: f64,
    pub volume: f64,
}

impl ScoreBreakdown {
    pub fn points(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Providers => self.providers,
            Criterion::BhGap => self.bh_gap,
            Criterion::Networks => self.networks,
            Criterion::Volume => self.volume,
        }
    }

    pub fn total(&self) -> f64 {
        round_tenths(self.providers + self.bh_gap + self.networks + self.volume)
    }
}

/// A practice together with everything derived from scoring it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPractice {
    pub practice: Practice,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub tier: TierLabel,
}

impl ScoredPractice {
    pub fn name(&self) -> &str {
        &self.practice.name
    }
}

/// Tier 1 first, then Tier 2, then Tier 3; highest score first within a tier.
pub fn sort_by_tier(scored: &mut [ScoredPractice]) {
    scored.sort_by(|a, b| {
        a.tier
            .priority()
            .cmp(&b.tier.priority())
            .then_with(|| b.score.total_cmp(&a.score))
    });
}

/// Highest score first regardless of tier.
pub fn sort_by_score(scored: &mut [ScoredPractice]) {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
}

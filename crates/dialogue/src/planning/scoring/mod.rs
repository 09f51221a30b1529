mod config;
mod explain;
mod rules;

#[cfg(test)]
mod tests;

pub use config::{
    CapabilityGate, CapabilityPoints, CompletenessBonus, ExplanationSettings, ProofBonus,
    ScoringConfig, SignalOverlapBonus, TagWeights,
};

use super::catalog::{CatalogError, ServicePackCatalog};
use super::domain::{CapabilityLevel, DealContext, PackTag, ServicePack};
use explain::explanation_bullets;
use rules::{score_pack, PackEvaluation};
use serde::Serialize;
use std::cmp::Reverse;
use tracing::debug;

/// Stateless recommender applying a scoring configuration to a fixed catalog.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
    catalog: ServicePackCatalog,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig, catalog: ServicePackCatalog) -> Self {
        Self { config, catalog }
    }

    pub fn standard() -> Result<Self, CatalogError> {
        Ok(Self::new(
            ScoringConfig::standard(),
            ServicePackCatalog::standard()?,
        ))
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ServicePackCatalog {
        &self.catalog
    }

    /// Ranked, capability-gated shortlist for the given deal context.
    pub fn score(&self, context: &DealContext) -> Vec<ScoredPack<'_>> {
        let mut candidates = Vec::new();

        for pack in self.catalog.packs() {
            match score_pack(pack, context, &self.config) {
                PackEvaluation::Excluded(shortfall) => {
                    debug!(
                        pack = pack.id,
                        capability = %shortfall.capability,
                        level = %shortfall.level,
                        "service pack excluded by capability gate"
                    );
                }
                PackEvaluation::Scored { components, total } => {
                    if total >= self.config.min_score_to_show {
                        candidates.push((pack, total, components));
                    }
                }
            }
        }

        // stable: equal scores keep catalog order
        candidates.sort_by_key(|(_, total, _)| Reverse(*total));
        candidates.truncate(self.config.max_packs_to_recommend);

        let max_bullets = self.config.explanations.max_bullets;
        let recommendations: Vec<ScoredPack<'_>> = candidates
            .into_iter()
            .enumerate()
            .map(|(index, (pack, score, components))| ScoredPack {
                rank: index + 1,
                pack,
                score,
                explanations: explanation_bullets(&components, max_bullets),
                components,
            })
            .collect();

        debug!(
            config_version = self.config.version,
            recommended = recommendations.len(),
            "service pack scoring complete"
        );

        recommendations
    }

    /// Full audit trail for one pack, whether or not it would surface.
    pub fn explain(&self, pack_id: &str, context: &DealContext) -> Option<PackBreakdown<'_>> {
        let pack = self.catalog.pack(pack_id)?;

        let breakdown = match score_pack(pack, context, &self.config) {
            PackEvaluation::Excluded(shortfall) => PackBreakdown {
                pack,
                score: None,
                meets_threshold: false,
                excluded_by: Some(shortfall),
                components: Vec::new(),
            },
            PackEvaluation::Scored { components, total } => PackBreakdown {
                pack,
                score: Some(total),
                meets_threshold: total >= self.config.min_score_to_show,
                excluded_by: None,
                components,
            },
        };

        Some(breakdown)
    }
}

/// Kind of contribution a score component records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreFactor {
    ModeFocus { tag: PackTag },
    TriggerBoost { tag: PackTag },
    PostureBoost { tag: PackTag },
    Capability { domain: String, level: CapabilityLevel },
    ProofAssets,
    PricingBand,
    DurationBand,
    SignalOverlap { shared_tags: Vec<PackTag> },
}

/// Discrete contribution to a pack's score, kept for audits and explanations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: i32,
    pub note: String,
}

/// Required capability the partner does not hold at the gating level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityShortfall {
    pub capability: String,
    pub level: CapabilityLevel,
    pub required: CapabilityLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPack<'a> {
    pub rank: usize,
    pub pack: &'a ServicePack,
    pub score: i32,
    pub explanations: Vec<String>,
    pub components: Vec<ScoreComponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackBreakdown<'a> {
    pub pack: &'a ServicePack,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    pub meets_threshold: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_by: Option<CapabilityShortfall>,
    pub components: Vec<ScoreComponent>,
}

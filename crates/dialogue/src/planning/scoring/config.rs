use super::super::domain::{CapabilityLevel, DealTrigger, EngagementMode, PackTag, VendorPosture};
use serde::Serialize;
use std::collections::BTreeMap;

pub type TagWeights = BTreeMap<PackTag, i32>;

/// Weight tables and thresholds driving service-pack recommendations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringConfig {
    pub version: &'static str,
    pub mode_weights: BTreeMap<EngagementMode, TagWeights>,
    pub trigger_boosts: BTreeMap<DealTrigger, TagWeights>,
    pub posture_boosts: BTreeMap<VendorPosture, TagWeights>,
    pub capability_points: CapabilityPoints,
    pub capability_gate: CapabilityGate,
    pub proof_bonus: ProofBonus,
    pub completeness_bonus: CompletenessBonus,
    pub signal_overlap: SignalOverlapBonus,
    pub min_score_to_show: i32,
    pub max_packs_to_recommend: usize,
    pub explanations: ExplanationSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityPoints {
    pub none: i32,
    pub some: i32,
    pub recognized: i32,
    pub strong: i32,
}

impl CapabilityPoints {
    pub const fn for_level(&self, level: CapabilityLevel) -> i32 {
        match level {
            CapabilityLevel::None => self.none,
            CapabilityLevel::Some => self.some,
            CapabilityLevel::Recognized => self.recognized,
            CapabilityLevel::Strong => self.strong,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityGate {
    pub min_required_level: CapabilityLevel,
    pub hard_exclude_if_capability_missing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProofBonus {
    pub one_asset: i32,
    pub two_or_more_assets: i32,
}

impl ProofBonus {
    pub const fn for_count(&self, count: usize) -> i32 {
        match count {
            0 => 0,
            1 => self.one_asset,
            _ => self.two_or_more_assets,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletenessBonus {
    pub pricing: i32,
    pub duration: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignalOverlapBonus {
    pub per_tag: i32,
    pub cap: i32,
}

impl SignalOverlapBonus {
    pub fn for_overlap(&self, shared_tags: usize) -> i32 {
        let raw = self.per_tag.saturating_mul(shared_tags as i32);
        raw.min(self.cap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExplanationSettings {
    pub max_bullets: usize,
}

impl ScoringConfig {
    pub fn mode_weight(&self, mode: EngagementMode, tag: PackTag) -> i32 {
        lookup(&self.mode_weights, mode, tag)
    }

    pub fn trigger_boost(&self, trigger: DealTrigger, tag: PackTag) -> i32 {
        lookup(&self.trigger_boosts, trigger, tag)
    }

    pub fn posture_boost(&self, posture: VendorPosture, tag: PackTag) -> i32 {
        lookup(&self.posture_boosts, posture, tag)
    }

    pub fn standard() -> Self {
        use PackTag::*;

        let mode_weights = BTreeMap::from([
            (
                EngagementMode::Discovery,
                weights(&[
                    (AiReadiness, 3),
                    (AdoptionChange, 2),
                    (M365Copilot, 2),
                    (DataPlatform, 1),
                ]),
            ),
            (
                EngagementMode::ArchitectureValidation,
                weights(&[
                    (RagAgents, 3),
                    (DataPlatform, 3),
                    (CloudOps, 2),
                    (AppModernization, 2),
                    (SecurityIdentity, 1),
                ]),
            ),
            (
                EngagementMode::SecurityGovernanceReview,
                weights(&[
                    (AiGovernance, 3),
                    (SecurityIdentity, 3),
                    (DataPlatform, 1),
                ]),
            ),
            (
                EngagementMode::CommercialProcurement,
                weights(&[(Finops, 3), (M365Copilot, 1), (AdoptionChange, 1)]),
            ),
            (
                EngagementMode::DeliveryAdoption,
                weights(&[(AdoptionChange, 3), (M365Copilot, 2), (CloudOps, 2)]),
            ),
            (
                EngagementMode::CompetitiveTakeout,
                weights(&[
                    (AppModernization, 2),
                    (M365Copilot, 2),
                    (RagAgents, 2),
                    (Finops, 1),
                ]),
            ),
        ]);

        let trigger_boosts = BTreeMap::from([
            (DealTrigger::CustomerRequest, weights(&[(AiReadiness, 1)])),
            (
                DealTrigger::RfpTender,
                weights(&[(SecurityIdentity, 2), (AiGovernance, 2), (Finops, 1)]),
            ),
            (
                DealTrigger::CompetitivePressure,
                weights(&[(AppModernization, 2), (RagAgents, 1)]),
            ),
            (
                DealTrigger::VendorPush,
                weights(&[(M365Copilot, 2), (AiReadiness, 1)]),
            ),
            (
                DealTrigger::RenewalExpansion,
                weights(&[(AdoptionChange, 2), (Finops, 1)]),
            ),
            (
                DealTrigger::IncidentRisk,
                weights(&[(SecurityIdentity, 3), (AiGovernance, 2)]),
            ),
            (
                DealTrigger::InternalGrowthTarget,
                weights(&[(DataPlatform, 1), (RagAgents, 1)]),
            ),
        ]);

        let posture_boosts = BTreeMap::from([
            (
                VendorPosture::MicrosoftFirst,
                weights(&[(M365Copilot, 2), (SecurityIdentity, 1), (AiGovernance, 1)]),
            ),
            (
                VendorPosture::VendorNeutral,
                weights(&[(DataPlatform, 1), (AppModernization, 1), (CloudOps, 1)]),
            ),
            (
                VendorPosture::Mixed,
                weights(&[(AiReadiness, 1), (Finops, 1)]),
            ),
        ]);

        Self {
            version: "pack-scoring-2026.02",
            mode_weights,
            trigger_boosts,
            posture_boosts,
            capability_points: CapabilityPoints {
                none: -10,
                some: 0,
                recognized: 2,
                strong: 4,
            },
            capability_gate: CapabilityGate {
                min_required_level: CapabilityLevel::Some,
                hard_exclude_if_capability_missing: true,
            },
            proof_bonus: ProofBonus {
                one_asset: 1,
                two_or_more_assets: 2,
            },
            completeness_bonus: CompletenessBonus {
                pricing: 1,
                duration: 1,
            },
            signal_overlap: SignalOverlapBonus { per_tag: 1, cap: 2 },
            min_score_to_show: 3,
            max_packs_to_recommend: 3,
            explanations: ExplanationSettings { max_bullets: 3 },
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn weights(entries: &[(PackTag, i32)]) -> TagWeights {
    entries.iter().copied().collect()
}

fn lookup<K: Ord>(table: &BTreeMap<K, TagWeights>, key: K, tag: PackTag) -> i32 {
    table
        .get(&key)
        .and_then(|weights| weights.get(&tag))
        .copied()
        .unwrap_or(0)
}

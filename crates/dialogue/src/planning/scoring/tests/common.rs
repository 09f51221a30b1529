use std::collections::BTreeMap;

use crate::planning::catalog::ServicePackCatalog;
use crate::planning::domain::{
    CapabilityLevel, DealContext, DealTrigger, EngagementMode, PackTag, ServicePack,
    VendorPosture,
};
use crate::planning::scoring::{ScoringConfig, ScoringEngine};

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::standard().expect("seed catalog is valid")
}

pub(super) fn engine_with_config(config: ScoringConfig) -> ScoringEngine {
    ScoringEngine::new(
        config,
        ServicePackCatalog::standard().expect("seed catalog is valid"),
    )
}

pub(super) fn capabilities(entries: &[(&str, CapabilityLevel)]) -> BTreeMap<String, CapabilityLevel> {
    entries
        .iter()
        .map(|(domain, level)| (domain.to_string(), *level))
        .collect()
}

pub(super) fn governance_review(
    partner_capabilities: BTreeMap<String, CapabilityLevel>,
) -> DealContext {
    DealContext {
        mode: Some(EngagementMode::SecurityGovernanceReview),
        trigger: Some(DealTrigger::RfpTender),
        vendor_posture: Some(VendorPosture::MicrosoftFirst),
        partner_capabilities,
        signal_tags: Vec::new(),
    }
}

pub(super) fn strong_security_partner() -> DealContext {
    governance_review(capabilities(&[
        ("Security & Identity", CapabilityLevel::Strong),
        ("Governance & Risk", CapabilityLevel::Strong),
    ]))
}

pub(super) fn fully_capable_discovery() -> DealContext {
    let catalog = ServicePackCatalog::standard().expect("seed catalog is valid");
    let partner_capabilities = catalog
        .capability_domains()
        .into_iter()
        .map(|domain| (domain.to_string(), CapabilityLevel::Strong))
        .collect();

    DealContext {
        mode: Some(EngagementMode::Discovery),
        trigger: Some(DealTrigger::CustomerRequest),
        vendor_posture: Some(VendorPosture::Mixed),
        partner_capabilities,
        signal_tags: Vec::new(),
    }
}

pub(super) fn bare_pack(id: &'static str, tags: Vec<PackTag>) -> ServicePack {
    ServicePack {
        id,
        name: "Test Pack",
        description: "",
        tags,
        delivery_model: "Remote",
        duration_band: Some("2 weeks"),
        pricing_band: Some("Fixed fee"),
        proof_assets: vec![],
        required_capabilities: vec![],
    }
}

use super::common::*;
use crate::planning::domain::{CapabilityLevel, DealContext};
use crate::planning::scoring::ScoringConfig;
use std::collections::BTreeMap;

#[test]
fn missing_capabilities_hard_exclude_governance_pack() {
    let engine = engine();
    let recommendations = engine.score(&governance_review(BTreeMap::new()));

    assert!(recommendations
        .iter()
        .all(|scored| scored.pack.id != "ai-governance-quickstart"));
    assert!(recommendations
        .iter()
        .all(|scored| scored.pack.required_capabilities.is_empty()));

    let ids: Vec<&str> = recommendations.iter().map(|scored| scored.pack.id).collect();
    assert_eq!(ids, vec!["ai-readiness-assessment", "finops-health-check"]);
}

#[test]
fn one_missing_capability_is_enough_to_exclude() {
    let engine = engine();
    let context = governance_review(capabilities(&[(
        "Security & Identity",
        CapabilityLevel::Strong,
    )]));

    let breakdown = engine
        .explain("ai-governance-quickstart", &context)
        .expect("pack exists");
    let shortfall = breakdown.excluded_by.expect("excluded");
    assert_eq!(shortfall.capability, "Governance & Risk");
    assert_eq!(shortfall.level, CapabilityLevel::None);
    assert_eq!(shortfall.required, CapabilityLevel::Some);
    assert!(breakdown.score.is_none());

    assert!(engine
        .score(&context)
        .iter()
        .any(|scored| scored.pack.id == "zero-trust-identity-hardening"));
}

#[test]
fn explicit_none_level_is_gated_like_a_missing_entry() {
    let engine = engine();
    let context = governance_review(capabilities(&[
        ("Security & Identity", CapabilityLevel::None),
        ("Governance & Risk", CapabilityLevel::Strong),
    ]));

    assert!(engine
        .score(&context)
        .iter()
        .all(|scored| !scored
            .pack
            .required_capabilities
            .contains(&"Security & Identity")));
}

#[test]
fn soft_gate_applies_penalty_instead_of_excluding() {
    let mut config = ScoringConfig::standard();
    config.capability_gate.hard_exclude_if_capability_missing = false;
    let engine = engine_with_config(config);

    let breakdown = engine
        .explain("ai-governance-quickstart", &governance_review(BTreeMap::new()))
        .expect("pack exists");
    assert!(breakdown.excluded_by.is_none());
    assert_eq!(breakdown.score, Some(-4));
    assert!(!breakdown.meets_threshold);
    assert_eq!(
        breakdown
            .components
            .iter()
            .filter(|component| component.points == -10)
            .count(),
        2
    );
}

#[test]
fn packs_without_requirements_are_never_gated() {
    let engine = engine();
    let context = DealContext::default();

    for pack in engine.catalog().packs() {
        if pack.required_capabilities.is_empty() {
            let breakdown = engine.explain(pack.id, &context).expect("pack exists");
            assert!(breakdown.excluded_by.is_none(), "{} was gated", pack.id);
        }
    }
}

use super::super::domain::{CapabilityLevel, DealContext, PackTag, ServicePack};
use super::config::ScoringConfig;
use super::{CapabilityShortfall, ScoreComponent, ScoreFactor};

pub(crate) enum PackEvaluation {
    Excluded(CapabilityShortfall),
    Scored {
        components: Vec<ScoreComponent>,
        total: i32,
    },
}

pub(crate) fn score_pack(
    pack: &ServicePack,
    context: &DealContext,
    config: &ScoringConfig,
) -> PackEvaluation {
    let mut components = Vec::new();

    if let Some(mode) = context.mode {
        for &tag in &pack.tags {
            let weight = config.mode_weight(mode, tag);
            push(
                &mut components,
                ScoreFactor::ModeFocus { tag },
                weight,
                || format!("Matches {} focus on {}", mode.label(), tag.label()),
            );
        }
    }

    if let Some(trigger) = context.trigger {
        for &tag in &pack.tags {
            let boost = config.trigger_boost(trigger, tag);
            push(
                &mut components,
                ScoreFactor::TriggerBoost { tag },
                boost,
                || format!("{} trigger favors {}", trigger.label(), tag.label()),
            );
        }
    }

    if let Some(posture) = context.vendor_posture {
        for &tag in &pack.tags {
            let boost = config.posture_boost(posture, tag);
            push(
                &mut components,
                ScoreFactor::PostureBoost { tag },
                boost,
                || format!("Fits a {} posture on {}", posture.label(), tag.label()),
            );
        }
    }

    let gate = config.capability_gate;
    for &capability in &pack.required_capabilities {
        let level = context.capability(capability);
        if !level.meets(gate.min_required_level) && gate.hard_exclude_if_capability_missing {
            return PackEvaluation::Excluded(CapabilityShortfall {
                capability: capability.to_string(),
                level,
                required: gate.min_required_level,
            });
        }

        let points = config.capability_points.for_level(level);
        push(
            &mut components,
            ScoreFactor::Capability {
                domain: capability.to_string(),
                level,
            },
            points,
            || capability_note(capability, level),
        );
    }

    let proof_count = pack.proof_assets.len();
    push(
        &mut components,
        ScoreFactor::ProofAssets,
        config.proof_bonus.for_count(proof_count),
        || {
            if proof_count == 1 {
                "1 proof asset available".to_string()
            } else {
                format!("{proof_count} proof assets available")
            }
        },
    );

    if let Some(band) = pack.pricing_band {
        push(
            &mut components,
            ScoreFactor::PricingBand,
            config.completeness_bonus.pricing,
            || format!("Priced and ready to quote ({band})"),
        );
    }

    if let Some(band) = pack.duration_band {
        push(
            &mut components,
            ScoreFactor::DurationBand,
            config.completeness_bonus.duration,
            || format!("Defined delivery window ({band})"),
        );
    }

    let shared: Vec<PackTag> = pack
        .tags
        .iter()
        .copied()
        .filter(|tag| context.has_signal_tag(*tag))
        .collect();
    push(
        &mut components,
        ScoreFactor::SignalOverlap {
            shared_tags: shared.clone(),
        },
        config.signal_overlap.for_overlap(shared.len()),
        || {
            let labels: Vec<&str> = shared.iter().map(|tag| tag.label()).collect();
            format!("Active deal signals mention {}", labels.join(" and "))
        },
    );

    let total = components.iter().map(|component| component.points).sum();
    PackEvaluation::Scored { components, total }
}

fn push<F>(components: &mut Vec<ScoreComponent>, factor: ScoreFactor, points: i32, note: F)
where
    F: FnOnce() -> String,
{
    if points == 0 {
        return;
    }

    components.push(ScoreComponent {
        factor,
        points,
        note: note(),
    });
}

fn capability_note(capability: &str, level: CapabilityLevel) -> String {
    match level {
        CapabilityLevel::None => format!("No {capability} capability on record"),
        other => format!("{} {capability} capability", other.label()),
    }
}

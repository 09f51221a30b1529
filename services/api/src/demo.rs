use crate::infra::{load_signal_store, parse_capability, parse_date, DealRequest, ParsedDeal};
use chrono::NaiveDate;
use clap::Args;
use dialogue::config::{AppConfig, SignalSourceConfig};
use dialogue::error::AppError;
use dialogue::planning::{PackTag, ScoredPack, ScoringEngine, ServicePack};
use dialogue::signals::{InMemorySignalStore, PooledSignal, StorePoolBuilder};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

const DEMO_FOCUS: &str = "schindler";

#[derive(Args, Debug, Default)]
pub(crate) struct PackListArgs {
    /// Only list packs carrying this tag (e.g. security_identity)
    #[arg(long)]
    pub(crate) tag: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RecommendArgs {
    /// Engagement mode label, e.g. "Security / Governance Review"
    #[arg(long)]
    pub(crate) mode: Option<String>,
    /// Deal trigger label, e.g. "RFP / Tender"
    #[arg(long)]
    pub(crate) trigger: Option<String>,
    /// Vendor posture label, e.g. "Microsoft-first"
    #[arg(long)]
    pub(crate) posture: Option<String>,
    /// Partner capability as Name=level (repeatable)
    #[arg(long, value_parser = parse_capability)]
    pub(crate) capability: Vec<(String, String)>,
    /// Active deal signal tag (repeatable)
    #[arg(long)]
    pub(crate) signal_tag: Vec<String>,
    /// Print the full JSON payload instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SignalPoolArgs {
    /// Account or focus id to pool signals for
    #[arg(long)]
    pub(crate) focus: String,
    /// Week being reviewed (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) week_of: NaiveDate,
    /// Directory holding extracted.csv, briefs.csv, and history.csv (defaults to APP_SIGNALS_DIR or the seed)
    #[arg(long)]
    pub(crate) signals_dir: Option<PathBuf>,
    /// Print the pooled signals as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Week to pool signals for (defaults to the seeded week, 2026-02-10)
    #[arg(long, value_parser = parse_date)]
    pub(crate) week_of: Option<NaiveDate>,
    /// Skip the signal pool portion of the demo
    #[arg(long)]
    pub(crate) skip_signals: bool,
}

pub(crate) fn run_pack_list(args: PackListArgs) -> Result<(), AppError> {
    let engine = ScoringEngine::standard()?;
    let catalog = engine.catalog();

    let packs = match args.tag.as_deref() {
        Some(raw) => {
            let tag = PackTag::from_key(raw)
                .ok_or_else(|| AppError::InvalidInput(format!("unknown pack tag '{raw}'")))?;
            println!("Service packs tagged {}", tag.label());
            catalog.packs_with_tag(tag)
        }
        None => {
            println!("Service pack catalog ({} packs)", catalog.len());
            catalog.packs().iter().collect()
        }
    };

    for pack in packs {
        render_pack_line(pack);
    }

    Ok(())
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        mode,
        trigger,
        posture,
        capability,
        signal_tag,
        json,
    } = args;

    let request = DealRequest {
        mode,
        trigger,
        vendor_posture: posture,
        partner_capabilities: capability.into_iter().collect::<BTreeMap<_, _>>(),
        signal_tags: signal_tag,
    };
    let ParsedDeal { context, ignored } = request.into_context();

    let engine = ScoringEngine::standard()?;
    let recommendations = engine.score(&context);

    if json {
        let payload = serde_json::json!({
            "config_version": engine.config().version,
            "recommendations": recommendations,
            "ignored": ignored,
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(text) => println!("{text}"),
            Err(err) => println!("Recommendation payload unavailable: {err}"),
        }
        return Ok(());
    }

    render_ignored(&ignored);
    render_recommendations(engine.config().version, &recommendations);
    Ok(())
}

pub(crate) fn run_signal_pool(args: SignalPoolArgs) -> Result<(), AppError> {
    let SignalPoolArgs {
        focus,
        week_of,
        signals_dir,
        json,
    } = args;

    let source = match signals_dir {
        Some(dir) => SignalSourceConfig {
            signals_dir: Some(dir),
        },
        None => AppConfig::load()?.signals,
    };
    let store = load_signal_store(&source)?;
    let signals = StorePoolBuilder::from_store(Arc::new(store)).build(&focus, week_of);

    if json {
        match serde_json::to_string_pretty(&signals) {
            Ok(text) => println!("{text}"),
            Err(err) => println!("Signal pool payload unavailable: {err}"),
        }
        return Ok(());
    }

    render_signal_pool(&focus, week_of, &signals);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        week_of,
        skip_signals,
    } = args;

    println!("Dialogue deal planning demo");
    let request = DealRequest {
        mode: Some("Security / Governance Review".to_string()),
        trigger: Some("RFP / Tender".to_string()),
        vendor_posture: Some("Microsoft-first".to_string()),
        partner_capabilities: BTreeMap::from([
            ("Governance & Risk".to_string(), "Strong".to_string()),
            ("Security & Identity".to_string(), "Strong".to_string()),
        ]),
        signal_tags: vec!["ai_governance".to_string()],
    };
    println!(
        "- Deal: {} | {} | {}",
        request.mode.as_deref().unwrap_or("any mode"),
        request.trigger.as_deref().unwrap_or("any trigger"),
        request.vendor_posture.as_deref().unwrap_or("any posture")
    );
    for (name, level) in &request.partner_capabilities {
        println!("  Capability: {name} = {level}");
    }

    let ParsedDeal { context, ignored } = request.into_context();
    let engine = ScoringEngine::standard()?;
    render_ignored(&ignored);
    render_recommendations(engine.config().version, &engine.score(&context));

    if let Some(breakdown) = engine.explain("copilot-adoption-accelerator", &context) {
        println!("\nWhy not {}?", breakdown.pack.name);
        match breakdown.excluded_by {
            Some(shortfall) => println!(
                "  Excluded: {} capability is {} (requires {})",
                shortfall.capability, shortfall.level, shortfall.required
            ),
            None => println!(
                "  Scored {} against a floor of {}",
                breakdown.score.unwrap_or_default(),
                engine.config().min_score_to_show
            ),
        }
    }

    if skip_signals {
        return Ok(());
    }

    let week_of = match week_of {
        Some(week) => week,
        None => NaiveDate::from_ymd_opt(2026, 2, 10)
            .ok_or_else(|| AppError::InvalidInput("seed week is not a valid date".to_string()))?,
    };
    let builder = StorePoolBuilder::from_store(Arc::new(InMemorySignalStore::seeded()));
    let signals = builder.build(DEMO_FOCUS, week_of);
    println!();
    render_signal_pool(DEMO_FOCUS, week_of, &signals);

    Ok(())
}

fn render_pack_line(pack: &ServicePack) {
    let tags: Vec<&str> = pack.tags.iter().map(|tag| tag.key()).collect();
    println!("- {} [{}] ({})", pack.name, pack.id, tags.join(", "));
    println!(
        "  {} | duration: {} | pricing: {}",
        pack.delivery_model,
        pack.duration_band.unwrap_or("not set"),
        pack.pricing_band.unwrap_or("not set")
    );
    if !pack.required_capabilities.is_empty() {
        println!("  Requires: {}", pack.required_capabilities.join(", "));
    }
}

fn render_ignored(ignored: &[String]) {
    if ignored.is_empty() {
        return;
    }
    println!("Ignored unrecognized inputs:");
    for entry in ignored {
        println!("  - {entry}");
    }
}

fn render_recommendations(config_version: &str, recommendations: &[ScoredPack<'_>]) {
    println!("\nRecommended service packs (config {config_version})");
    if recommendations.is_empty() {
        println!("- No packs cleared the capability gate and score floor");
        return;
    }

    for scored in recommendations {
        println!(
            "{}. {} [{}] score {}",
            scored.rank, scored.pack.name, scored.pack.id, scored.score
        );
        for bullet in &scored.explanations {
            println!("   - {bullet}");
        }
    }
}

fn render_signal_pool(focus_id: &str, week_of: NaiveDate, signals: &[PooledSignal]) {
    println!("Signal pool for {focus_id} (week of {week_of})");
    if signals.is_empty() {
        println!("- No signals from any source");
        return;
    }

    for signal in signals {
        let origins: Vec<&str> = signal.origins.iter().map(|origin| origin.label()).collect();
        let week = signal
            .week_of
            .map(|week| week.to_string())
            .unwrap_or_else(|| "undated".to_string());
        println!(
            "- {} [{}] confidence {} | {} | {}",
            signal.title,
            signal.id,
            signal.confidence,
            week,
            origins.join(" + ")
        );
    }
}

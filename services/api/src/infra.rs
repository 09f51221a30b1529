use chrono::NaiveDate;
use dialogue::config::SignalSourceConfig;
use dialogue::error::AppError;
use dialogue::planning::{
    CapabilityLevel, DealContext, DealTrigger, EngagementMode, ScoringEngine, VendorPosture,
};
use dialogue::signals::{InMemorySignalStore, SignalStoreImporter, StorePoolBuilder};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Engines shared by the planning and signal routes.
#[derive(Clone)]
pub(crate) struct PlanningState {
    pub(crate) engine: Arc<ScoringEngine>,
    pub(crate) signals: Arc<StorePoolBuilder>,
}

impl PlanningState {
    pub(crate) fn new(engine: ScoringEngine, store: InMemorySignalStore) -> Self {
        Self {
            engine: Arc::new(engine),
            signals: Arc::new(StorePoolBuilder::from_store(Arc::new(store))),
        }
    }

    pub(crate) fn standard() -> Result<Self, AppError> {
        Ok(Self::new(
            ScoringEngine::standard()?,
            InMemorySignalStore::seeded(),
        ))
    }
}

pub(crate) fn load_signal_store(config: &SignalSourceConfig) -> Result<InMemorySignalStore, AppError> {
    let Some(dir) = config.signals_dir.as_ref() else {
        return Ok(InMemorySignalStore::seeded());
    };

    let store = SignalStoreImporter::from_dir(dir)?;
    info!(
        dir = %dir.display(),
        extracted = store.extracted().len(),
        briefs = store.briefs().len(),
        history = store.history().len(),
        "signal store hydrated from CSV exports"
    );
    Ok(store)
}

/// Deal context as submitted by callers, with labels still in display form.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DealRequest {
    #[serde(default)]
    pub(crate) mode: Option<String>,
    #[serde(default)]
    pub(crate) trigger: Option<String>,
    #[serde(default)]
    pub(crate) vendor_posture: Option<String>,
    #[serde(default)]
    pub(crate) partner_capabilities: BTreeMap<String, String>,
    #[serde(default)]
    pub(crate) signal_tags: Vec<String>,
}

pub(crate) struct ParsedDeal {
    pub(crate) context: DealContext,
    pub(crate) ignored: Vec<String>,
}

impl DealRequest {
    /// Unrecognized labels are dropped and reported back rather than rejected.
    pub(crate) fn into_context(self) -> ParsedDeal {
        let mut ignored = Vec::new();

        let mode = lenient_label(self.mode, "mode", EngagementMode::from_label, &mut ignored);
        let trigger = lenient_label(self.trigger, "trigger", DealTrigger::from_label, &mut ignored);
        let vendor_posture = lenient_label(
            self.vendor_posture,
            "vendor_posture",
            VendorPosture::from_label,
            &mut ignored,
        );

        let mut partner_capabilities = BTreeMap::new();
        for (name, level) in self.partner_capabilities {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            match CapabilityLevel::from_label(&level) {
                Some(parsed) => {
                    partner_capabilities.insert(name.to_string(), parsed);
                }
                None => {
                    debug!(capability = name, level = %level, "ignoring unrecognized capability level");
                    ignored.push(format!("capability {name}: {level}"));
                }
            }
        }

        ParsedDeal {
            context: DealContext {
                mode,
                trigger,
                vendor_posture,
                partner_capabilities,
                signal_tags: self.signal_tags,
            },
            ignored,
        }
    }
}

fn lenient_label<T>(
    raw: Option<String>,
    field: &str,
    parse: fn(&str) -> Option<T>,
    ignored: &mut Vec<String>,
) -> Option<T> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }

    let parsed = parse(&raw);
    if parsed.is_none() {
        debug!(field, value = %raw, "ignoring unrecognized deal label");
        ignored.push(format!("{field}: {raw}"));
    }
    parsed
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Splits a `Name=level` pair; the level itself is validated later.
pub(crate) fn parse_capability(raw: &str) -> Result<(String, String), String> {
    let (name, level) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected Name=level, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("capability name missing in '{raw}'"));
    }
    Ok((name.to_string(), level.trim().to_string()))
}

use super::domain::{ConfidenceLabel, ExtractedSignal, HistoricalSignal, QuickBrief};
use chrono::NaiveDate;

/// Read access to extractor-derived signals.
pub trait ExtractedSignalSource: Send + Sync {
    fn signals_for(&self, focus_id: &str) -> Vec<ExtractedSignal>;
    /// Lookup across every account, used to backfill brief references.
    fn signal(&self, id: &str) -> Option<ExtractedSignal>;
}

/// Read access to curated weekly briefs.
pub trait QuickBriefSource: Send + Sync {
    fn brief(&self, focus_id: &str, week_of: NaiveDate) -> Option<QuickBrief>;
}

/// Read access to the legacy account history store.
pub trait SignalHistorySource: Send + Sync {
    fn history_for(&self, account_id: &str) -> Vec<HistoricalSignal>;
}

/// Immutable in-process store backing all three signal sources.
#[derive(Debug, Clone, Default)]
pub struct InMemorySignalStore {
    extracted: Vec<ExtractedSignal>,
    briefs: Vec<QuickBrief>,
    history: Vec<HistoricalSignal>,
}

impl InMemorySignalStore {
    pub fn new(
        extracted: Vec<ExtractedSignal>,
        briefs: Vec<QuickBrief>,
        history: Vec<HistoricalSignal>,
    ) -> Self {
        Self {
            extracted,
            briefs,
            history,
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_extracted(), seed_briefs(), seed_history())
    }

    pub fn extracted(&self) -> &[ExtractedSignal] {
        &self.extracted
    }

    pub fn briefs(&self) -> &[QuickBrief] {
        &self.briefs
    }

    pub fn history(&self) -> &[HistoricalSignal] {
        &self.history
    }
}

impl ExtractedSignalSource for InMemorySignalStore {
    fn signals_for(&self, focus_id: &str) -> Vec<ExtractedSignal> {
        self.extracted
            .iter()
            .filter(|signal| signal.focus_id == focus_id)
            .cloned()
            .collect()
    }

    fn signal(&self, id: &str) -> Option<ExtractedSignal> {
        self.extracted.iter().find(|signal| signal.id == id).cloned()
    }
}

impl QuickBriefSource for InMemorySignalStore {
    fn brief(&self, focus_id: &str, week_of: NaiveDate) -> Option<QuickBrief> {
        self.briefs
            .iter()
            .find(|brief| brief.focus_id == focus_id && brief.week_of == week_of)
            .cloned()
    }
}

impl SignalHistorySource for InMemorySignalStore {
    fn history_for(&self, account_id: &str) -> Vec<HistoricalSignal> {
        self.history
            .iter()
            .filter(|record| record.account_id == account_id)
            .cloned()
            .collect()
    }
}

/// Seed-only helper; `seed_dates_are_all_valid` guards against the epoch fallback.
fn week(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn extracted(
    id: &str,
    focus_id: &str,
    week_of: NaiveDate,
    title: &str,
    summary: &str,
    confidence: u8,
    tags: &[&str],
    created_at: &str,
) -> ExtractedSignal {
    ExtractedSignal {
        id: id.to_string(),
        focus_id: focus_id.to_string(),
        week_of,
        title: title.to_string(),
        summary: summary.to_string(),
        confidence,
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        created_at: created_at.to_string(),
        source_url: None,
    }
}

fn seed_extracted() -> Vec<ExtractedSignal> {
    vec![
        extracted(
            "sig-sch-001",
            "schindler",
            week(2026, 2, 10),
            "Schindler expands elevator IoT analytics program",
            "Connected-elevator telemetry is moving to a central analytics platform across EMEA.",
            85,
            &["data_platform", "rag_agents"],
            "2026-02-09T08:00:00Z",
        ),
        extracted(
            "sig-sch-002",
            "schindler",
            week(2026, 2, 10),
            "Procurement opens RFP for AI governance tooling",
            "Group IT published a tender covering model inventory, policy enforcement, and audit trails.",
            78,
            &["ai_governance", "security_identity"],
            "2026-02-10T07:30:00Z",
        ),
        extracted(
            "sig-sch-003",
            "schindler",
            week(2026, 2, 3),
            "New group CIO appointed",
            "Incoming CIO previously led a cloud-first consolidation at a logistics peer.",
            70,
            &["cloud_ops"],
            "2026-02-02T10:00:00Z",
        ),
        extracted(
            "sig-ind-004",
            "industrials",
            week(2026, 2, 10),
            "Industrial OEMs accelerate Copilot pilots",
            "Sector survey shows field-service teams piloting Copilot for maintenance knowledge.",
            64,
            &["m365_copilot"],
            "2026-02-08T12:00:00Z",
        ),
        extracted(
            "sig-kone-001",
            "kone",
            week(2026, 2, 10),
            "KONE renews data platform contract",
            "Three-year renewal includes a managed analytics tier.",
            72,
            &["data_platform"],
            "2026-02-09T15:45:00Z",
        ),
    ]
}

fn seed_briefs() -> Vec<QuickBrief> {
    vec![QuickBrief {
        focus_id: "schindler".to_string(),
        week_of: week(2026, 2, 10),
        headline: "Governance tender is the opening this week".to_string(),
        signal_ids: vec![
            "sig-sch-002".to_string(),
            "sig-ind-004".to_string(),
            "sig-retired-999".to_string(),
        ],
    }]
}

fn seed_history() -> Vec<HistoricalSignal> {
    vec![
        HistoricalSignal {
            id: "sig-sch-001".to_string(),
            account_id: "schindler".to_string(),
            headline: "IoT analytics program discussed at QBR".to_string(),
            detail: "Account team logged interest in a central telemetry platform.".to_string(),
            confidence: ConfidenceLabel::High,
            recorded_at: "2026-02-09".to_string(),
            week_of: Some(week(2026, 2, 10)),
        },
        HistoricalSignal {
            id: "hist-sch-2025-11".to_string(),
            account_id: "schindler".to_string(),
            headline: "Data center consolidation stalled".to_string(),
            detail: "Budget for the second wave moved to FY27.".to_string(),
            confidence: ConfidenceLabel::Medium,
            recorded_at: "2025-11-18".to_string(),
            week_of: None,
        },
        HistoricalSignal {
            id: "hist-sch-2026-01".to_string(),
            account_id: "schindler".to_string(),
            headline: "Security team evaluating identity vendors".to_string(),
            detail: "Shortlist not shared yet.".to_string(),
            confidence: ConfidenceLabel::Low,
            recorded_at: "2026-01-20".to_string(),
            week_of: Some(week(2026, 1, 19)),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_lookups_are_scoped_by_account() {
        let store = InMemorySignalStore::seeded();

        let schindler = store.signals_for("schindler");
        assert_eq!(schindler.len(), 3);
        assert!(schindler.iter().all(|signal| signal.focus_id == "schindler"));
        assert!(store.signals_for("unknown").is_empty());

        let sector = store.signal("sig-ind-004").expect("cross-account lookup");
        assert_eq!(sector.focus_id, "industrials");
        assert!(store.signal("sig-retired-999").is_none());
    }

    #[test]
    fn seed_dates_are_all_valid() {
        let unset = NaiveDate::default();
        assert!(seed_extracted().iter().all(|signal| signal.week_of != unset));
        assert!(seed_briefs().iter().all(|brief| brief.week_of != unset));
        assert!(seed_history()
            .iter()
            .all(|record| record.week_of != Some(unset)));
    }

    #[test]
    fn briefs_match_on_account_and_week() {
        let store = InMemorySignalStore::seeded();

        assert!(store.brief("schindler", week(2026, 2, 10)).is_some());
        assert!(store.brief("schindler", week(2026, 2, 3)).is_none());
        assert!(store.brief("kone", week(2026, 2, 10)).is_none());
        assert_eq!(store.history_for("schindler").len(), 3);
    }
}

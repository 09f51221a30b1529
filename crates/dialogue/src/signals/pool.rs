use super::domain::{PooledSignal, SignalOrigin};
use super::store::{
    ExtractedSignalSource, InMemorySignalStore, QuickBriefSource, SignalHistorySource,
};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Merges extractor, quick-brief, and history signals into one ranked pool.
pub struct SignalPoolBuilder<E, Q, H> {
    extracted: Arc<E>,
    briefs: Arc<Q>,
    history: Arc<H>,
}

/// Pool builder reading all three sources from one in-memory store.
pub type StorePoolBuilder =
    SignalPoolBuilder<InMemorySignalStore, InMemorySignalStore, InMemorySignalStore>;

impl StorePoolBuilder {
    pub fn from_store(store: Arc<InMemorySignalStore>) -> Self {
        Self::new(store.clone(), store.clone(), store)
    }
}

impl<E, Q, H> SignalPoolBuilder<E, Q, H>
where
    E: ExtractedSignalSource,
    Q: QuickBriefSource,
    H: SignalHistorySource,
{
    pub fn new(extracted: Arc<E>, briefs: Arc<Q>, history: Arc<H>) -> Self {
        Self {
            extracted,
            briefs,
            history,
        }
    }

    pub fn build(&self, focus_id: &str, week_of: NaiveDate) -> Vec<PooledSignal> {
        let mut pool = OriginPool::default();

        let (current, earlier): (Vec<_>, Vec<_>) = self
            .extracted
            .signals_for(focus_id)
            .into_iter()
            .partition(|signal| signal.week_of == week_of);
        for signal in current.iter().chain(earlier.iter()) {
            pool.insert_or_tag(&signal.id, SignalOrigin::Extractor, || {
                Some(PooledSignal::from_extracted(signal, SignalOrigin::Extractor))
            });
        }

        if let Some(brief) = self.briefs.brief(focus_id, week_of) {
            for id in &brief.signal_ids {
                let added = pool.insert_or_tag(id, SignalOrigin::QuickBrief, || {
                    self.extracted
                        .signal(id)
                        .map(|signal| PooledSignal::from_extracted(&signal, SignalOrigin::QuickBrief))
                });
                if !added {
                    debug!(focus_id, signal_id = %id, "quick brief references unknown signal");
                }
            }
        }

        for record in self.history.history_for(focus_id) {
            pool.insert_or_tag(&record.id, SignalOrigin::History, || {
                Some(PooledSignal::from_history(&record))
            });
        }

        let mut signals = pool.into_signals();
        signals.sort_by(|left, right| pool_order(left, right, week_of));

        debug!(
            focus_id,
            %week_of,
            pooled = signals.len(),
            "signal pool assembled"
        );

        signals
    }
}

/// Insertion-ordered map from signal id to its pooled entry.
#[derive(Default)]
struct OriginPool {
    index: HashMap<String, usize>,
    signals: Vec<PooledSignal>,
}

impl OriginPool {
    /// Tags an existing entry, or inserts a fresh one; returns whether the id is pooled.
    fn insert_or_tag<F>(&mut self, id: &str, origin: SignalOrigin, create: F) -> bool
    where
        F: FnOnce() -> Option<PooledSignal>,
    {
        if let Some(&position) = self.index.get(id) {
            self.signals[position].add_origin(origin);
            return true;
        }

        match create() {
            Some(signal) => {
                self.index.insert(id.to_string(), self.signals.len());
                self.signals.push(signal);
                true
            }
            None => false,
        }
    }

    fn into_signals(self) -> Vec<PooledSignal> {
        self.signals
    }
}

fn pool_order(left: &PooledSignal, right: &PooledSignal, week_of: NaiveDate) -> Ordering {
    let from_extractor = |signal: &PooledSignal| signal.has_origin(SignalOrigin::Extractor);
    let in_week = |signal: &PooledSignal| signal.week_of == Some(week_of);

    from_extractor(right)
        .cmp(&from_extractor(left))
        .then_with(|| in_week(right).cmp(&in_week(left)))
        .then_with(|| right.created_at.cmp(&left.created_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::domain::{ConfidenceLabel, ExtractedSignal, HistoricalSignal, QuickBrief};

    fn week_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 10).expect("valid week")
    }

    fn seeded_builder() -> StorePoolBuilder {
        SignalPoolBuilder::from_store(Arc::new(InMemorySignalStore::seeded()))
    }

    fn signal(id: &str, week_of: NaiveDate, created_at: &str) -> ExtractedSignal {
        ExtractedSignal {
            id: id.to_string(),
            focus_id: "acme".to_string(),
            week_of,
            title: format!("Signal {id}"),
            summary: String::new(),
            confidence: 60,
            tags: Vec::new(),
            created_at: created_at.to_string(),
            source_url: None,
        }
    }

    #[test]
    fn brief_reference_appends_origin_after_extractor() {
        let pool = seeded_builder().build("schindler", week_of());

        let tender = pool
            .iter()
            .find(|signal| signal.id == "sig-sch-002")
            .expect("tender signal pooled");
        assert_eq!(
            tender.origins,
            vec![SignalOrigin::Extractor, SignalOrigin::QuickBrief]
        );
    }

    #[test]
    fn seeded_pool_orders_by_origin_week_and_recency() {
        let pool = seeded_builder().build("schindler", week_of());

        let ids: Vec<&str> = pool.iter().map(|signal| signal.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "sig-sch-002",
                "sig-sch-001",
                "sig-sch-003",
                "sig-ind-004",
                "hist-sch-2026-01",
                "hist-sch-2025-11",
            ]
        );
    }

    #[test]
    fn history_tags_existing_ids_without_overwriting_payload() {
        let pool = seeded_builder().build("schindler", week_of());

        let iot = pool
            .iter()
            .find(|signal| signal.id == "sig-sch-001")
            .expect("iot signal pooled");
        assert_eq!(iot.origins, vec![SignalOrigin::Extractor, SignalOrigin::History]);
        assert_eq!(iot.title, "Schindler expands elevator IoT analytics program");
        assert_eq!(iot.confidence, 85);
    }

    #[test]
    fn brief_backfills_from_other_accounts_and_skips_unknown_ids() {
        let pool = seeded_builder().build("schindler", week_of());

        let sector = pool
            .iter()
            .find(|signal| signal.id == "sig-ind-004")
            .expect("sector signal backfilled");
        assert_eq!(sector.origins, vec![SignalOrigin::QuickBrief]);
        assert_eq!(sector.confidence, 64);
        assert!(pool.iter().all(|signal| signal.id != "sig-retired-999"));
    }

    #[test]
    fn history_only_entries_map_confidence_labels() {
        let pool = seeded_builder().build("schindler", week_of());

        let stalled = pool
            .iter()
            .find(|signal| signal.id == "hist-sch-2025-11")
            .expect("history signal pooled");
        assert_eq!(stalled.origins, vec![SignalOrigin::History]);
        assert_eq!(stalled.confidence, ConfidenceLabel::Medium.score());
        assert!(stalled.week_of.is_none());
    }

    #[test]
    fn unknown_account_yields_empty_pool() {
        assert!(seeded_builder().build("nobody", week_of()).is_empty());
    }

    #[test]
    fn missing_brief_for_week_still_pools_other_sources() {
        let other_week = NaiveDate::from_ymd_opt(2026, 2, 3).expect("valid week");
        let pool = seeded_builder().build("schindler", other_week);

        assert!(pool
            .iter()
            .all(|signal| !signal.has_origin(SignalOrigin::QuickBrief)));
        assert_eq!(pool[0].id, "sig-sch-003");
    }

    #[test]
    fn duplicate_brief_references_do_not_duplicate_entries() {
        let week = week_of();
        let store = InMemorySignalStore::new(
            vec![signal("a", week, "2026-02-10T09:00:00Z")],
            vec![QuickBrief {
                focus_id: "acme".to_string(),
                week_of: week,
                headline: "Repeat".to_string(),
                signal_ids: vec!["a".to_string(), "a".to_string()],
            }],
            vec![HistoricalSignal {
                id: "a".to_string(),
                account_id: "acme".to_string(),
                headline: "Repeat".to_string(),
                detail: String::new(),
                confidence: ConfidenceLabel::High,
                recorded_at: "2026-02-10".to_string(),
                week_of: Some(week),
            }],
        );

        let pool = SignalPoolBuilder::from_store(Arc::new(store)).build("acme", week);
        assert_eq!(pool.len(), 1);
        assert_eq!(
            pool[0].origins,
            vec![
                SignalOrigin::Extractor,
                SignalOrigin::QuickBrief,
                SignalOrigin::History
            ]
        );
    }

    #[test]
    fn building_twice_is_idempotent() {
        let builder = seeded_builder();
        assert_eq!(
            builder.build("schindler", week_of()),
            builder.build("schindler", week_of())
        );
    }
}

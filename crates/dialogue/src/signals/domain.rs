use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Signal produced by the account extractor, the richest payload available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSignal {
    pub id: String,
    pub focus_id: String,
    pub week_of: NaiveDate,
    pub title: String,
    pub summary: String,
    pub confidence: u8,
    pub tags: Vec<String>,
    pub created_at: String,
    pub source_url: Option<String>,
}

/// Weekly curated brief referencing extractor signals by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickBrief {
    pub focus_id: String,
    pub week_of: NaiveDate,
    pub headline: String,
    pub signal_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLabel {
    High,
    Medium,
    Low,
}

impl ConfidenceLabel {
    pub const fn score(self) -> u8 {
        match self {
            Self::High => 80,
            Self::Medium => 50,
            Self::Low => 30,
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Account note from the legacy history store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalSignal {
    pub id: String,
    pub account_id: String,
    pub headline: String,
    pub detail: String,
    pub confidence: ConfidenceLabel,
    pub recorded_at: String,
    pub week_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalOrigin {
    #[serde(rename = "Extractor")]
    Extractor,
    #[serde(rename = "Quick Brief")]
    QuickBrief,
    #[serde(rename = "History")]
    History,
}

impl SignalOrigin {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Extractor => "Extractor",
            Self::QuickBrief => "Quick Brief",
            Self::History => "History",
        }
    }
}

/// Deduplicated signal annotated with every source that referenced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PooledSignal {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub week_of: Option<NaiveDate>,
    pub confidence: u8,
    pub tags: Vec<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub origins: Vec<SignalOrigin>,
}

impl PooledSignal {
    pub(crate) fn from_extracted(signal: &ExtractedSignal, origin: SignalOrigin) -> Self {
        Self {
            id: signal.id.clone(),
            title: signal.title.clone(),
            summary: signal.summary.clone(),
            week_of: Some(signal.week_of),
            confidence: signal.confidence,
            tags: signal.tags.clone(),
            created_at: signal.created_at.clone(),
            source_url: signal.source_url.clone(),
            origins: vec![origin],
        }
    }

    pub(crate) fn from_history(record: &HistoricalSignal) -> Self {
        Self {
            id: record.id.clone(),
            title: record.headline.clone(),
            summary: record.detail.clone(),
            week_of: record.week_of,
            confidence: record.confidence.score(),
            tags: Vec::new(),
            created_at: record.recorded_at.clone(),
            source_url: None,
            origins: vec![SignalOrigin::History],
        }
    }

    pub(crate) fn add_origin(&mut self, origin: SignalOrigin) {
        if !self.origins.contains(&origin) {
            self.origins.push(origin);
        }
    }

    pub fn has_origin(&self, origin: SignalOrigin) -> bool {
        self.origins.contains(&origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_labels_map_to_fixed_scores() {
        assert_eq!(ConfidenceLabel::High.score(), 80);
        assert_eq!(ConfidenceLabel::Medium.score(), 50);
        assert_eq!(ConfidenceLabel::Low.score(), 30);
        assert_eq!(ConfidenceLabel::from_label(" MEDIUM "), Some(ConfidenceLabel::Medium));
        assert_eq!(ConfidenceLabel::from_label("certain"), None);
    }

    #[test]
    fn origins_are_not_duplicated() {
        let record = HistoricalSignal {
            id: "hist-1".to_string(),
            account_id: "acme".to_string(),
            headline: "Budget freeze".to_string(),
            detail: "Spending paused until Q3".to_string(),
            confidence: ConfidenceLabel::Low,
            recorded_at: "2025-12-01".to_string(),
            week_of: None,
        };
        let mut pooled = PooledSignal::from_history(&record);
        pooled.add_origin(SignalOrigin::History);
        pooled.add_origin(SignalOrigin::QuickBrief);

        assert_eq!(
            pooled.origins,
            vec![SignalOrigin::History, SignalOrigin::QuickBrief]
        );
        assert_eq!(pooled.confidence, 30);
    }

    #[test]
    fn origin_serializes_with_display_label() {
        let encoded = serde_json::to_string(&SignalOrigin::QuickBrief).expect("serialize");
        assert_eq!(encoded, format!("\"{}\"", SignalOrigin::QuickBrief.label()));
    }
}

use super::SignalImportError;
use crate::signals::domain::{ConfidenceLabel, ExtractedSignal, HistoricalSignal, QuickBrief};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

const LIST_SEPARATOR: char = ';';

#[derive(Debug, Deserialize)]
struct ExtractedRow {
    id: String,
    focus_id: String,
    week_of: String,
    title: String,
    #[serde(default)]
    summary: String,
    confidence: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    tags: Option<String>,
    created_at: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    source_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HistoryRow {
    id: String,
    account_id: String,
    headline: String,
    #[serde(default)]
    detail: String,
    confidence: String,
    recorded_at: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    week_of: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BriefRow {
    focus_id: String,
    week_of: String,
    #[serde(default)]
    headline: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    signal_ids: Option<String>,
}

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source)
}

pub(crate) fn parse_extracted<R: Read>(
    source: R,
) -> Result<Vec<ExtractedSignal>, SignalImportError> {
    let mut signals = Vec::new();

    for row in reader(source).deserialize::<ExtractedRow>() {
        let row = row?;
        let confidence = parse_confidence_score(&row.id, &row.confidence)?;
        signals.push(ExtractedSignal {
            week_of: parse_week("week_of", &row.week_of)?,
            confidence,
            tags: split_list(row.tags.as_deref()),
            id: row.id,
            focus_id: row.focus_id,
            title: row.title,
            summary: row.summary,
            created_at: row.created_at,
            source_url: row.source_url,
        });
    }

    Ok(signals)
}

pub(crate) fn parse_history<R: Read>(
    source: R,
) -> Result<Vec<HistoricalSignal>, SignalImportError> {
    let mut records = Vec::new();

    for row in reader(source).deserialize::<HistoryRow>() {
        let row = row?;
        let confidence = ConfidenceLabel::from_label(&row.confidence).ok_or_else(|| {
            SignalImportError::InvalidConfidence {
                id: row.id.clone(),
                value: row.confidence.clone(),
            }
        })?;
        let week_of = row
            .week_of
            .as_deref()
            .map(|value| parse_week("week_of", value))
            .transpose()?;

        records.push(HistoricalSignal {
            id: row.id,
            account_id: row.account_id,
            headline: row.headline,
            detail: row.detail,
            confidence,
            recorded_at: row.recorded_at,
            week_of,
        });
    }

    Ok(records)
}

pub(crate) fn parse_briefs<R: Read>(source: R) -> Result<Vec<QuickBrief>, SignalImportError> {
    let mut briefs = Vec::new();

    for row in reader(source).deserialize::<BriefRow>() {
        let row = row?;
        briefs.push(QuickBrief {
            week_of: parse_week("week_of", &row.week_of)?,
            signal_ids: split_list(row.signal_ids.as_deref()),
            focus_id: row.focus_id,
            headline: row.headline,
        });
    }

    Ok(briefs)
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|raw| {
            raw.split(LIST_SEPARATOR)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_week(field: &'static str, value: &str) -> Result<NaiveDate, SignalImportError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        SignalImportError::InvalidDate {
            field,
            value: value.to_string(),
        }
    })
}

fn parse_confidence_score(id: &str, value: &str) -> Result<u8, SignalImportError> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|score| *score <= 100)
        .ok_or_else(|| SignalImportError::InvalidConfidence {
            id: id.to_string(),
            value: value.to_string(),
        })
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
pub(crate) fn split_list_for_tests(value: Option<&str>) -> Vec<String> {
    split_list(value)
}

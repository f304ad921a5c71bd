// src/analysis/aggregator.rs
use chrono::{DateTime, Utc};
use eframe::egui::Color32;
use std::collections::BTreeMap;

use super::classifier::{LabelSource, SentimentClassifier};
use crate::model::{FeedbackRow, FeedbackTable, SentimentLabel};
use crate::state::Notices;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("no '{0}' column found in the dataset")]
    MissingCommentColumn(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    pub classified: usize,
    pub remote_calls: usize,
    pub cache_hits: usize,
    pub failures: usize,
    pub completed_at: DateTime<Utc>,
}

/// Classify the comments of the first `prefix` rows, in order, writing each
/// label back onto its row. Rows past the prefix are left as they were.
pub fn annotate(
    table: &mut FeedbackTable,
    classifier: &SentimentClassifier,
    prefix: usize,
    comment_column: &str,
    notices: &mut Notices,
) -> Result<AnalysisSummary, AnalysisError> {
    if !table.has_comment_column {
        return Err(AnalysisError::MissingCommentColumn(comment_column.to_string()));
    }

    let mut summary = AnalysisSummary {
        classified: 0,
        remote_calls: 0,
        cache_hits: 0,
        failures: 0,
        completed_at: Utc::now(),
    };

    for row in table.rows.iter_mut().take(prefix) {
        let result = classifier.classify(row.comment.as_deref(), notices);
        match result.source {
            LabelSource::Remote => summary.remote_calls += 1,
            LabelSource::Cache => summary.cache_hits += 1,
            LabelSource::Fallback { requested } => {
                if requested {
                    summary.remote_calls += 1;
                }
                summary.failures += 1;
            }
            LabelSource::MissingText => {}
        }
        row.sentiment = Some(result.label);
        table.has_sentiment_column = true;
        summary.classified += 1;
    }

    summary.completed_at = Utc::now();
    tracing::info!(
        classified = summary.classified,
        remote_calls = summary.remote_calls,
        cache_hits = summary.cache_hits,
        failures = summary.failures,
        cached_texts = classifier.cached_len(),
        "Sentiment analysis finished"
    );
    Ok(summary)
}

/// One bar of the sentiment breakdown chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBar {
    pub label: SentimentLabel,
    pub count: usize,
    pub color: Color32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentCounts {
    counts: BTreeMap<SentimentLabel, usize>,
}

impl SentimentCounts {
    pub fn tally<'a>(rows: impl IntoIterator<Item = &'a FeedbackRow>) -> Self {
        let mut counts = BTreeMap::new();
        for label in rows.into_iter().filter_map(|row| row.sentiment) {
            *counts.entry(label).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, label: SentimentLabel) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Bars in fixed Negative, Neutral, Positive order. Labels that never
    /// occur get no bar at all.
    pub fn bars(&self) -> Vec<ChartBar> {
        SentimentLabel::DISPLAY_ORDER
            .into_iter()
            .filter_map(|label| match self.get(label) {
                0 => None,
                count => Some(ChartBar { label, count, color: label.color() }),
            })
            .collect()
    }
}

impl FromIterator<SentimentLabel> for SentimentCounts {
    fn from_iter<I: IntoIterator<Item = SentimentLabel>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for label in iter {
            *counts.entry(label).or_insert(0) += 1;
        }
        Self { counts }
    }
}

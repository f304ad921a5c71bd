// src/state/view.rs
use crate::analysis::{ChartBar, SentimentCounts};
use crate::model::{FeedbackRow, FeedbackTable};

pub const ALL_IDS: &str = "All IDs";

/// Current value of the "Choose a Student ID" selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IdSelection {
    #[default]
    All,
    Id(String),
}

impl IdSelection {
    pub fn label(&self) -> &str {
        match self {
            IdSelection::All => ALL_IDS,
            IdSelection::Id(id) => id.as_str(),
        }
    }

    pub fn matches(&self, row: &FeedbackRow) -> bool {
        match self {
            IdSelection::All => true,
            IdSelection::Id(id) => row.id.as_deref() == Some(id.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub title: String,
    pub bars: Vec<ChartBar>,
    pub labeled: usize,
}

/// Immutable snapshot of everything the dashboard draws for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub selection: IdSelection,
    /// Empty when the dataset has no identifier column.
    pub id_options: Vec<String>,
    pub missing_id_warning: Option<String>,
    pub id_header: String,
    pub comment_header: String,
    pub rows: Vec<RowView>,
    pub total_rows: usize,
    pub chart: Option<ChartView>,
}

impl DashboardView {
    pub fn filter_enabled(&self) -> bool {
        self.missing_id_warning.is_none()
    }
}

/// Rows matching the selection. Without an identifier column nothing can be
/// matched, so the whole table is returned.
pub fn filter_rows<'a>(table: &'a FeedbackTable, selection: &IdSelection) -> Vec<&'a FeedbackRow> {
    if !table.has_id_column {
        return table.rows.iter().collect();
    }
    table.rows.iter().filter(|row| selection.matches(row)).collect()
}

pub fn build_view(
    table: &FeedbackTable,
    selection: &IdSelection,
    id_column: &str,
    comment_column: &str,
) -> DashboardView {
    let (selection, id_options, missing_id_warning) = if table.has_id_column {
        (selection.clone(), table.unique_ids(), None)
    } else {
        (
            IdSelection::All,
            Vec::new(),
            Some(format!("No '{id_column}' column found in the dataset. Showing all data.")),
        )
    };

    let filtered = filter_rows(table, &selection);

    let chart = table.has_sentiment_column.then(|| {
        let counts = SentimentCounts::tally(filtered.iter().copied());
        ChartView {
            title: format!("Distribution of Sentiment Classifications - {}", selection.label()),
            bars: counts.bars(),
            labeled: counts.total(),
        }
    });

    let rows = filtered
        .iter()
        .map(|row| RowView {
            id: row.id.clone(),
            comment: row.comment.clone(),
        })
        .collect();

    DashboardView {
        selection,
        id_options,
        missing_id_warning,
        id_header: id_column.to_string(),
        comment_header: comment_column.to_string(),
        rows,
        total_rows: table.len(),
        chart,
    }
}

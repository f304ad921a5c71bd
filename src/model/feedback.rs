// src/model/feedback.rs
use super::SentimentLabel;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackRow {
    pub id: Option<String>,
    pub comment: Option<String>,
    pub sentiment: Option<SentimentLabel>,
}

impl FeedbackRow {
    #[cfg(test)]
    pub fn new(id: impl Into<String>, comment: Option<&str>) -> Self {
        Self {
            id: Some(id.into()),
            comment: comment.map(str::to_string),
            sentiment: None,
        }
    }
}

/// In-memory feedback dataset owned by a single session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackTable {
    pub headers: Vec<String>,
    pub rows: Vec<FeedbackRow>,
    pub has_id_column: bool,
    pub has_comment_column: bool,
    // Set once any row has been labeled, either from the file or by analysis
    pub has_sentiment_column: bool,
}

impl FeedbackTable {
    #[cfg(test)]
    pub fn new(headers: Vec<String>, rows: Vec<FeedbackRow>) -> Self {
        Self {
            headers,
            rows,
            has_id_column: true,
            has_comment_column: true,
            has_sentiment_column: false,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct identifiers in order of first appearance. Rows without an id
    /// never match a selection, so they are left out.
    pub fn unique_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for id in self.rows.iter().filter_map(|row| row.id.as_ref()) {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        ids
    }

    pub fn labeled_rows(&self) -> usize {
        self.rows.iter().filter(|row| row.sentiment.is_some()).count()
    }
}

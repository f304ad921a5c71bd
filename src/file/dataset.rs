// src/file/dataset.rs
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::FileHandler;
use crate::config::DashboardConfig;
use crate::model::{FeedbackRow, FeedbackTable, SentimentLabel};

pub const SENTIMENT_COLUMN: &str = "Sentiment";

// Cell values read as missing, matching common data-frame readers
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Dataset not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        source: io::Error,
    },
    #[error("Failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads the feedback CSV into a `FeedbackTable`, keeping only the leading rows.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    load_limit: usize,
    id_column: String,
    comment_column: String,
}

impl DatasetLoader {
    pub fn new(load_limit: usize, id_column: impl Into<String>, comment_column: impl Into<String>) -> Self {
        Self {
            load_limit,
            id_column: id_column.into(),
            comment_column: comment_column.into(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.load_limit, &config.id_column, &config.comment_column)
    }

    pub fn parse(&self, text: &str) -> Result<FeedbackTable, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let position = |name: &str| headers.iter().position(|h| h == name);
        let id_idx = position(&self.id_column);
        let comment_idx = position(&self.comment_column);
        let sentiment_idx = position(SENTIMENT_COLUMN);

        let mut rows = Vec::new();
        for (line, record) in reader.records().take(self.load_limit).enumerate() {
            let record = record?;
            let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).and_then(present);

            let sentiment = cell(sentiment_idx).and_then(|raw| {
                let label = SentimentLabel::parse(&raw);
                if label.is_none() {
                    tracing::warn!(row = line + 1, value = %raw, "Ignoring unrecognized sentiment value");
                }
                label
            });

            rows.push(FeedbackRow {
                id: cell(id_idx),
                comment: cell(comment_idx),
                sentiment,
            });
        }

        Ok(FeedbackTable {
            headers,
            rows,
            has_id_column: id_idx.is_some(),
            has_comment_column: comment_idx.is_some(),
            has_sentiment_column: sentiment_idx.is_some(),
        })
    }
}

impl FileHandler<FeedbackTable> for DatasetLoader {
    type Error = DatasetError;

    fn load(&self, path: &Path) -> Result<FeedbackTable, DatasetError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(DatasetError::NotFound(path.to_path_buf()));
            }
            Err(source) => {
                return Err(DatasetError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let table = self.parse(&decode_latin1(&bytes))?;
        tracing::info!(
            path = %path.display(),
            rows = table.len(),
            columns = table.headers.len(),
            "Dataset loaded"
        );
        Ok(table)
    }
}

/// ISO-8859-1 maps every byte to the code point with the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn present(value: &str) -> Option<String> {
    if MISSING_MARKERS.contains(&value) {
        None
    } else {
        Some(value.to_string())
    }
}

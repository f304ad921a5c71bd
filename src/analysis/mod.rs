// src/analysis/mod.rs
pub mod aggregator;
pub mod classifier;

// Re-export commonly used types
pub use aggregator::{annotate, AnalysisSummary, ChartBar, SentimentCounts};
pub use classifier::SentimentClassifier;

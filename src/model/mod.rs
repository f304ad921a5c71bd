// src/model/mod.rs
pub mod feedback;
pub mod sentiment;

// Re-export commonly used types
pub use feedback::{FeedbackRow, FeedbackTable};
pub use sentiment::SentimentLabel;

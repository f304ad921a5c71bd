// src/model/sentiment.rs
use eframe::egui::Color32;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    /// Category order used by every chart, left to right.
    pub const DISPLAY_ORDER: [SentimentLabel; 3] = [
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Positive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Positive => "Positive",
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            SentimentLabel::Negative => Color32::RED,
            SentimentLabel::Neutral => Color32::LIGHT_GRAY,
            SentimentLabel::Positive => Color32::GREEN,
        }
    }

    /// Parse a model reply or a stored cell value into a label.
    ///
    /// Matching ignores case plus any surrounding whitespace, quotes and
    /// punctuation, so `"positive."` is accepted but `"Mostly positive"` is not.
    pub fn parse(raw: &str) -> Option<Self> {
        let cleaned = raw.trim_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation());
        Self::DISPLAY_ORDER
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(cleaned))
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// src/analysis/classifier.rs
use std::collections::HashMap;
use std::sync::Mutex;

use crate::config::ClassifierConfig;
use crate::llm::{ChatMessage, ChatRequest, CompletionClient, CompletionError};
use crate::model::SentimentLabel;
use crate::state::Notices;

pub const SYSTEM_PROMPT: &str =
    "Classify the sentiment of the following feedback as exactly one word: Positive, Negative, or Neutral.";
const USER_PROMPT_PREFIX: &str = "What's the sentiment of this feedback?";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    #[error("API error: {0}")]
    Api(#[from] CompletionError),
    #[error("Unrecognized sentiment from model: {0:?}")]
    UnrecognizedLabel(String),
}

/// Where a label came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSource {
    MissingText,
    Cache,
    Remote,
    /// The call failed; `requested` is false when nothing was sent.
    Fallback { requested: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub label: SentimentLabel,
    pub source: LabelSource,
}

/// Labels feedback text through a completion backend.
///
/// Every answer for a non-blank text is memoized for the life of the process,
/// keyed by the exact input text. A failed call memoizes its `Neutral`
/// fallback, so a text is sent at most once.
pub struct SentimentClassifier {
    client: Box<dyn CompletionClient>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    cache: Mutex<HashMap<String, SentimentLabel>>,
}

impl SentimentClassifier {
    pub fn new(client: Box<dyn CompletionClient>, config: &ClassifierConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Never fails: errors are reported through `notices` and degrade to `Neutral`.
    pub fn classify(&self, text: Option<&str>, notices: &mut Notices) -> Classification {
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return Classification {
                label: SentimentLabel::Neutral,
                source: LabelSource::MissingText,
            };
        };

        if let Some(label) = self.cached(text) {
            tracing::debug!(%label, "Sentiment cache hit");
            return Classification { label, source: LabelSource::Cache };
        }

        let outcome = self.request_label(text);
        let label = outcome.as_ref().copied().unwrap_or(SentimentLabel::Neutral);
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(text.to_string(), label);

        match outcome {
            Ok(label) => {
                tracing::debug!(%label, "Classified feedback");
                Classification { label, source: LabelSource::Remote }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Classification failed, defaulting to Neutral");
                notices.error(err.to_string());
                let requested = !matches!(err, ClassifyError::Api(CompletionError::MissingApiKey));
                Classification {
                    label: SentimentLabel::Neutral,
                    source: LabelSource::Fallback { requested },
                }
            }
        }
    }

    fn request_label(&self, text: &str) -> Result<SentimentLabel, ClassifyError> {
        let reply = self.client.complete(&self.request_for(text))?;
        SentimentLabel::parse(&reply)
            .ok_or_else(|| ClassifyError::UnrecognizedLabel(reply.trim().to_string()))
    }

    pub fn request_for(&self, text: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(format!("{USER_PROMPT_PREFIX} {text}")),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    fn cached(&self, text: &str) -> Option<SentimentLabel> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(text)
            .copied()
    }
}

// src/input/command.rs
use anyhow::{anyhow, Result};

use crate::analysis::annotate;
use crate::file::{DatasetError, FileHandler};
use crate::state::{AppState, IdSelection, Session};

pub trait Command {
    fn name(&self) -> &'static str;
    fn execute(&self, state: &mut AppState) -> Result<()>;

    /// Commands that wait on the classification API and freeze the frame.
    fn blocks_on_network(&self) -> bool {
        false
    }
}

/// "Load Dataset": read the configured file and start or refresh the session.
pub struct LoadDatasetCommand;
impl Command for LoadDatasetCommand {
    fn name(&self) -> &'static str {
        "load_dataset"
    }

    fn execute(&self, state: &mut AppState) -> Result<()> {
        let table = state.loader.load(&state.config.dataset_path).map_err(|e| match e {
            DatasetError::NotFound(path) => anyhow!(
                "Dataset not found. Please check the file path: {}",
                path.display()
            ),
            other => anyhow::Error::new(other).context("Could not load dataset"),
        })?;

        match state.session.as_mut() {
            Some(session) => session.replace_table(table),
            None => state.session = Some(Session::new(table)),
        }
        state.notices.success("Dataset loaded successfully!");
        Ok(())
    }
}

/// "Analyze Sentiment": label the leading rows of the loaded table.
pub struct AnalyzeSentimentCommand;
impl Command for AnalyzeSentimentCommand {
    fn name(&self) -> &'static str {
        "analyze_sentiment"
    }

    fn blocks_on_network(&self) -> bool {
        true
    }

    fn execute(&self, state: &mut AppState) -> Result<()> {
        let Some(session) = state.session.as_mut() else {
            state.notices.warning("Please ingest the dataset first.");
            return Ok(());
        };

        let summary = annotate(
            &mut session.table,
            &state.classifier,
            state.config.analyze_limit,
            &state.config.comment_column,
            &mut state.notices,
        )
        .map_err(|e| anyhow!("Something went wrong: {e}"))?;

        session.last_analysis = Some(summary);
        state.notices.success("Sentiment analysis completed!");
        Ok(())
    }
}

/// "Choose a Student ID": re-filter without reclassifying.
pub struct SelectIdCommand(pub IdSelection);
impl Command for SelectIdCommand {
    fn name(&self) -> &'static str {
        "select_id"
    }

    fn execute(&self, state: &mut AppState) -> Result<()> {
        if let Some(session) = state.session.as_mut() {
            session.selection = self.0.clone();
        }
        Ok(())
    }
}

pub struct ResetSessionCommand;
impl Command for ResetSessionCommand {
    fn name(&self) -> &'static str {
        "reset_session"
    }

    fn execute(&self, state: &mut AppState) -> Result<()> {
        if state.session.take().is_some() {
            state.notices.success("Session reset.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classifier::tests::classifier;
    use crate::config::DashboardConfig;
    use crate::input::dispatch;
    use crate::llm::CompletionError;
    use crate::model::SentimentLabel;
    use crate::state::NoticeLevel;
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn state_for(path: &Path, replies: &[(&str, Result<&str, CompletionError>)]) -> (AppState, Arc<AtomicUsize>) {
        let config = DashboardConfig {
            dataset_path: path.to_path_buf(),
            ..DashboardConfig::default()
        };
        let (classifier, calls) = classifier(replies);
        (AppState::new(config, classifier), calls)
    }

    #[test]
    fn end_to_end_three_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feedback student.csv");
        fs::write(&path, "Id,comment\n1,great class\n2,\n3,terrible pacing\n").unwrap();
        let (mut state, calls) = state_for(
            &path,
            &[("great class", Ok("Positive")), ("terrible pacing", Ok("Negative"))],
        );

        dispatch(&LoadDatasetCommand, &mut state);
        assert_eq!(state.notices.count(NoticeLevel::Success), 1);

        dispatch(&AnalyzeSentimentCommand, &mut state);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let session = state.session.as_ref().unwrap();
        let labels: Vec<_> = session.table.rows.iter().map(|row| row.sentiment).collect();
        assert_eq!(
            labels,
            vec![
                Some(SentimentLabel::Positive),
                Some(SentimentLabel::Neutral),
                Some(SentimentLabel::Negative),
            ]
        );
        assert_eq!(session.last_analysis.as_ref().unwrap().remote_calls, 2);

        let chart = state.view().unwrap().chart.unwrap();
        let bars: Vec<_> = chart.bars.iter().map(|bar| (bar.label, bar.count)).collect();
        assert_eq!(
            bars,
            vec![
                (SentimentLabel::Negative, 1),
                (SentimentLabel::Neutral, 1),
                (SentimentLabel::Positive, 1),
            ]
        );
        assert_eq!(state.notices.len(), 1);
        assert_eq!(state.notices.iter().next().unwrap().message, "Sentiment analysis completed!");
    }

    #[test]
    fn analyze_before_load_only_warns() {
        let dir = tempdir().unwrap();
        let (mut state, calls) = state_for(&dir.path().join("unused.csv"), &[]);

        dispatch(&AnalyzeSentimentCommand, &mut state);

        assert!(state.session.is_none());
        assert_eq!(state.notices.count(NoticeLevel::Warning), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn failed_load_keeps_previous_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feedback.csv");
        fs::write(&path, "Id,comment\n1,fine\n").unwrap();
        let (mut state, _) = state_for(&path, &[]);
        dispatch(&LoadDatasetCommand, &mut state);

        fs::remove_file(&path).unwrap();
        dispatch(&LoadDatasetCommand, &mut state);

        assert_eq!(state.session.as_ref().unwrap().table.len(), 1);
        assert_eq!(state.notices.count(NoticeLevel::Error), 1);
        assert!(state
            .notices
            .iter()
            .next()
            .unwrap()
            .message
            .starts_with("Dataset not found"));
    }

    #[test]
    fn missing_file_on_first_load_creates_no_session() {
        let dir = tempdir().unwrap();
        let (mut state, _) = state_for(&dir.path().join("nope.csv"), &[]);

        dispatch(&LoadDatasetCommand, &mut state);

        assert!(state.session.is_none());
        assert!(state.view().is_none());
    }

    #[test]
    fn selecting_an_id_does_not_reclassify() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feedback.csv");
        fs::write(&path, "Id,comment\na,good\nb,bad\n").unwrap();
        let (mut state, calls) = state_for(&path, &[("good", Ok("Positive")), ("bad", Ok("Negative"))]);
        dispatch(&LoadDatasetCommand, &mut state);
        dispatch(&AnalyzeSentimentCommand, &mut state);

        dispatch(&SelectIdCommand(IdSelection::Id("b".into())), &mut state);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let view = state.view().unwrap();
        assert_eq!(view.rows.len(), 1);
        let chart = view.chart.unwrap();
        assert_eq!(chart.title, "Distribution of Sentiment Classifications - b");
        assert_eq!(chart.bars.len(), 1);
        assert_eq!(chart.bars[0].label, SentimentLabel::Negative);
    }

    #[test]
    fn analysis_without_comment_column_reports_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feedback.csv");
        fs::write(&path, "Id,text\n1,hello\n").unwrap();
        let (mut state, _) = state_for(&path, &[]);
        dispatch(&LoadDatasetCommand, &mut state);

        dispatch(&AnalyzeSentimentCommand, &mut state);

        assert_eq!(state.notices.count(NoticeLevel::Error), 1);
        assert!(state.notices.iter().next().unwrap().message.starts_with("Something went wrong"));
        assert!(state.view().unwrap().chart.is_none());
    }

    #[test]
    fn reset_tears_down_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feedback.csv");
        fs::write(&path, "Id,comment\n1,fine\n").unwrap();
        let (mut state, _) = state_for(&path, &[]);
        dispatch(&LoadDatasetCommand, &mut state);

        dispatch(&ResetSessionCommand, &mut state);

        assert!(state.session.is_none());
        dispatch(&AnalyzeSentimentCommand, &mut state);
        assert_eq!(state.notices.count(NoticeLevel::Warning), 1);
    }
}

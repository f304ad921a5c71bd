// src/input/mod.rs
use crate::state::AppState;

pub mod command;

pub use command::{
    AnalyzeSentimentCommand, Command, LoadDatasetCommand, ResetSessionCommand, SelectIdCommand,
};

/// Run one user action. Messages from the previous action are cleared first;
/// a failed command becomes an error notice and never ends the session.
pub fn dispatch(command: &dyn Command, state: &mut AppState) {
    state.notices.clear();
    tracing::debug!(command = command.name(), "Handling command");

    if let Err(e) = command.execute(state) {
        tracing::error!(command = command.name(), error = %format!("{e:#}"), "Command failed");
        state.notices.error(format!("{e:#}"));
    }
}

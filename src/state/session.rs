// src/state/session.rs
use super::view::IdSelection;
use crate::analysis::AnalysisSummary;
use crate::model::FeedbackTable;

/// Data owned by one interactive session. Created by the first successful
/// load and dropped on reset or exit.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub table: FeedbackTable,
    pub selection: IdSelection,
    pub last_analysis: Option<AnalysisSummary>,
}

impl Session {
    pub fn new(table: FeedbackTable) -> Self {
        Self {
            table,
            selection: IdSelection::All,
            last_analysis: None,
        }
    }

    /// Swap in a freshly loaded table. Labels from the previous table are
    /// discarded; the selection survives only if its id is still present.
    pub fn replace_table(&mut self, table: FeedbackTable) {
        if let IdSelection::Id(id) = &self.selection {
            if !table.has_id_column || !table.unique_ids().contains(id) {
                self.selection = IdSelection::All;
            }
        }
        self.table = table;
        self.last_analysis = None;
    }
}

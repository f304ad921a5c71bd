// src/state/mod.rs
use crate::analysis::SentimentClassifier;
use crate::config::DashboardConfig;
use crate::file::DatasetLoader;

pub mod notice;
pub mod session;
pub mod view;

pub use notice::{NoticeLevel, Notices};
pub use session::Session;
pub use view::{DashboardView, IdSelection, ALL_IDS};

// Core application state
pub struct AppState {
    pub config: DashboardConfig,
    pub loader: DatasetLoader,
    pub classifier: SentimentClassifier,

    // None until the first dataset load succeeds
    pub session: Option<Session>,
    pub notices: Notices,
}

impl AppState {
    pub fn new(config: DashboardConfig, classifier: SentimentClassifier) -> Self {
        Self {
            loader: DatasetLoader::from_config(&config),
            config,
            classifier,
            session: None,
            notices: Notices::default(),
        }
    }

    pub fn view(&self) -> Option<DashboardView> {
        self.session.as_ref().map(|session| {
            view::build_view(
                &session.table,
                &session.selection,
                &self.config.id_column,
                &self.config.comment_column,
            )
        })
    }
}

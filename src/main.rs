// src/main.rs
use anyhow::{Context, Result};
use eframe::egui;

mod analysis;
mod app;
mod config;
mod file;
mod input;
mod llm;
mod logging;
mod model;
mod state;
mod ui;

use analysis::SentimentClassifier;
use app::FeedbackApp;
use config::DashboardConfig;
use llm::OpenAiClient;
use state::AppState;

fn main() -> Result<()> {
    // API key and FEEDBACK_* overrides may live in a local .env file
    dotenv::dotenv().ok();

    if let Err(e) = logging::init() {
        logging::init_stdout_only();
        tracing::warn!("File logging unavailable: {}", e);
    }

    let config = DashboardConfig::load().context("Failed to load dashboard configuration")?;
    tracing::info!(
        dataset = %config.dataset_path.display(),
        load_limit = config.load_limit,
        analyze_limit = config.analyze_limit,
        model = %config.classifier.model,
        "Configuration loaded"
    );

    let client = OpenAiClient::from_config(&config.classifier);
    let classifier = SentimentClassifier::new(Box::new(client), &config.classifier);
    let state = AppState::new(config, classifier);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("Student Feedback Sentiment"),
        ..Default::default()
    };

    eframe::run_native(
        "Student Feedback Sentiment",
        options,
        Box::new(|_cc| Box::new(FeedbackApp::new(state))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}

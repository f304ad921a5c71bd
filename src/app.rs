// src/app.rs
use eframe::egui;

use crate::input::{self, Command};
use crate::state::AppState;

struct QueuedCommand {
    command: Box<dyn Command>,
    // Set once a frame with the busy indicator has been drawn
    shown: bool,
}

pub struct FeedbackApp {
    state: AppState,
    queued: Option<QueuedCommand>,
}

impl FeedbackApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            queued: None,
        }
    }

    fn show_header(&self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.heading("🎓 Student Feedback Sentiment Dashboard");
        ui.label("Analyze student feedback using GenAI-powered sentiment classification.");
        ui.add_space(4.0);
    }

    fn run_queued(&mut self, ctx: &egui::Context) {
        match self.queued.take() {
            Some(queued) if queued.shown => {
                input::dispatch(queued.command.as_ref(), &mut self.state);
            }
            Some(mut queued) => {
                queued.shown = true;
                self.queued = Some(queued);
                ctx.request_repaint();
            }
            None => {}
        }
    }
}

impl eframe::App for FeedbackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.run_queued(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_header(ui);
        });

        let busy = self.queued.is_some();
        let triggered = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_source("dashboard_scroll")
                    .show(ui, |ui| {
                        crate::ui::dashboard::show_dashboard_view(ui, &self.state, busy)
                    })
                    .inner
            })
            .inner;

        if let Some(command) = triggered {
            if command.blocks_on_network() {
                self.queued = Some(QueuedCommand { command, shown: false });
                ctx.request_repaint();
            } else {
                input::dispatch(command.as_ref(), &mut self.state);
            }
        }
    }
}

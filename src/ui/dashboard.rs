// src/ui/dashboard.rs
use eframe::egui;

use crate::input::{
    AnalyzeSentimentCommand, Command, LoadDatasetCommand, ResetSessionCommand, SelectIdCommand,
};
use crate::state::view::{ChartView, DashboardView};
use crate::state::{AppState, IdSelection, NoticeLevel, ALL_IDS};

const TABLE_HEIGHT: f32 = 280.0;
const CHART_HEIGHT: f32 = 260.0;

/// Draws the whole page and returns the command triggered this frame, if any.
pub fn show_dashboard_view(ui: &mut egui::Ui, state: &AppState, busy: bool) -> Option<Box<dyn Command>> {
    let mut command: Option<Box<dyn Command>> = None;

    ui.horizontal(|ui| {
        ui.add_enabled_ui(!busy, |ui| {
            if ui.button("📥 Load Dataset").clicked() {
                command = Some(Box::new(LoadDatasetCommand));
            }
            if ui.button("🔍 Analyze Sentiment").clicked() {
                command = Some(Box::new(AnalyzeSentimentCommand));
            }
            if ui.button("♻ Reset Session").clicked() {
                command = Some(Box::new(ResetSessionCommand));
            }
        });
        if busy {
            ui.spinner();
            ui.label("Analyzing sentiment...");
        }
    });

    if !state.notices.is_empty() {
        ui.add_space(8.0);
        show_notices(ui, state);
    }

    let Some(view) = state.view() else {
        ui.add_space(16.0);
        ui.label(format!(
            "Load {} to get started.",
            state.config.dataset_path.display()
        ));
        return command;
    };

    ui.add_space(8.0);
    ui.separator();

    if view.filter_enabled() {
        ui.heading("🔍 Filter by Student ID");
        if let Some(selection) = show_id_selector(ui, &view) {
            command = Some(Box::new(SelectIdCommand(selection)));
        }
    } else if let Some(warning) = &view.missing_id_warning {
        ui.label(egui::RichText::new(format!("⚠ {warning}")).color(warning_color()));
    }

    ui.add_space(8.0);
    ui.heading(format!("📁 Feedback for {}", view.selection.label()));
    if let Some(session) = &state.session {
        if session.table.is_empty() {
            ui.label("The dataset has no rows.");
        } else {
            ui.label(format!(
                "{} of {} rows, {} labeled",
                view.rows.len(),
                view.total_rows,
                session.table.labeled_rows()
            ));
        }
    }
    show_feedback_table(ui, &view);

    if let Some(chart) = &view.chart {
        ui.add_space(16.0);
        ui.heading(format!("📊 Sentiment Breakdown for {}", view.selection.label()));
        if let Some(summary) = state.session.as_ref().and_then(|s| s.last_analysis.as_ref()) {
            ui.label(format!(
                "Last analyzed: {} ({} rows, {} API calls, {} failed)",
                summary.completed_at.format("%Y-%m-%d %H:%M:%S UTC"),
                summary.classified,
                summary.remote_calls,
                summary.failures
            ));
        }
        show_sentiment_chart(ui, chart);
    }

    command
}

fn show_notices(ui: &mut egui::Ui, state: &AppState) {
    for notice in state.notices.iter() {
        let (icon, color) = match notice.level {
            NoticeLevel::Success => ("✔", egui::Color32::from_rgb(60, 160, 60)),
            NoticeLevel::Warning => ("⚠", warning_color()),
            NoticeLevel::Error => ("✖", egui::Color32::RED),
        };
        ui.label(egui::RichText::new(format!("{icon} {}", notice.message)).color(color));
    }
}

fn show_id_selector(ui: &mut egui::Ui, view: &DashboardView) -> Option<IdSelection> {
    let mut selected = view.selection.clone();

    egui::ComboBox::from_label("Choose a Student ID")
        .selected_text(selected.label().to_string())
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut selected, IdSelection::All, ALL_IDS);
            for id in &view.id_options {
                ui.selectable_value(&mut selected, IdSelection::Id(id.clone()), id.as_str());
            }
        });

    (selected != view.selection).then_some(selected)
}

fn show_feedback_table(ui: &mut egui::Ui, view: &DashboardView) {
    egui::ScrollArea::vertical()
        .id_source("feedback_table_scroll")
        .max_height(TABLE_HEIGHT)
        .show(ui, |ui| {
            egui::Grid::new("feedback_table")
                .num_columns(2)
                .striped(true)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    ui.strong(&view.id_header);
                    ui.strong(&view.comment_header);
                    ui.end_row();

                    for row in &view.rows {
                        cell(ui, row.id.as_deref());
                        cell(ui, row.comment.as_deref());
                        ui.end_row();
                    }
                });
        });
}

fn cell(ui: &mut egui::Ui, value: Option<&str>) {
    match value {
        Some(text) => ui.label(text),
        None => ui.weak("—"),
    };
}

fn show_sentiment_chart(ui: &mut egui::Ui, chart: &ChartView) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.strong(&chart.title);

            if chart.bars.is_empty() {
                ui.label("No classified feedback for this selection.");
                return;
            }

            ui.small("Number of Feedback");
            let plot = egui_plot::Plot::new("sentiment_breakdown")
                .height(CHART_HEIGHT)
                .allow_zoom(false)
                .allow_drag(false)
                .show_background(false)
                .show_axes([false, true])
                .include_y(0.0);

            plot.show(ui, |plot_ui| {
                let bars: Vec<egui_plot::Bar> = chart
                    .bars
                    .iter()
                    .enumerate()
                    .map(|(i, bar)| {
                        egui_plot::Bar::new(i as f64, bar.count as f64)
                            .name(bar.label.as_str())
                            .width(0.6)
                            .fill(bar.color)
                    })
                    .collect();

                plot_ui.bar_chart(egui_plot::BarChart::new(bars));
            });

            // Category axis, left to right in bar order
            ui.horizontal(|ui| {
                ui.label(format!("Sentiment Category ({} labeled):", chart.labeled));
                for bar in &chart.bars {
                    ui.label(
                        egui::RichText::new(format!("{} ({})", bar.label, bar.count))
                            .color(bar.color)
                            .strong(),
                    );
                }
            });
        });
    });
}

fn warning_color() -> egui::Color32 {
    egui::Color32::from_rgb(220, 160, 0)
}

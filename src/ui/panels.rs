use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::config::TrackOrientation;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Right side panel – depth controls and averages
// ---------------------------------------------------------------------------

/// Render the depth-range controls and the interval averages.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Depth interval");
    ui.separator();

    egui::Grid::new("depth_inputs")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Start Depth:");
            let start = ui.add(egui::TextEdit::singleline(&mut state.start_text).desired_width(90.0));
            if start.lost_focus() {
                state.commit_start_text();
            }
            ui.end_row();

            ui.label("End Depth:");
            let end = ui.add(egui::TextEdit::singleline(&mut state.end_text).desired_width(90.0));
            if end.lost_focus() {
                state.commit_end_text();
            }
            ui.end_row();
        });

    ui.add_space(6.0);

    let range = state.slider_min..=state.slider_max;
    let slider_height = (ui.available_height() - 220.0).max(120.0);
    ui.horizontal(|ui: &mut Ui| {
        let mut start = state.start_step;
        let mut end = state.end_step;

        ui.vertical(|ui: &mut Ui| {
            ui.spacing_mut().slider_width = slider_height;
            if ui
                .add(egui::Slider::new(&mut start, range.clone()).vertical().show_value(false))
                .changed()
            {
                state.set_start_step(start);
            }
        });
        ui.vertical(|ui: &mut Ui| {
            ui.spacing_mut().slider_width = slider_height;
            if ui
                .add(egui::Slider::new(&mut end, range.clone()).vertical().show_value(false))
                .changed()
            {
                state.set_end_step(end);
            }
        });
    });

    let range = state.depth_range();
    ui.label(format!("Start Depth: {:.2}", range.start));
    ui.label(format!("End Depth: {:.2}", range.end));

    ui.separator();
    averages_table(ui, state);

    ui.add_space(4.0);
    ui.label(format!(
        "{} complete of {} samples in range",
        state.summary.indices.len(),
        state.summary.in_range
    ));
}

fn averages_table(ui: &mut Ui, state: &AppState) {
    ui.strong("Averages");
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Curve");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Unit");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Mean");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Min");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Max");
            });
        })
        .body(|mut body| {
            for curve in &state.summary.curves {
                let description = state
                    .dataset
                    .curve(&curve.mnemonic)
                    .map(|c| c.description.as_str())
                    .unwrap_or_default();
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        let label = ui.label(&curve.mnemonic);
                        if !description.is_empty() {
                            label.on_hover_text(description);
                        }
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&curve.unit);
                    });
                    row.col(|ui: &mut Ui| {
                        let text = RichText::new(curve.mean_label()).monospace();
                        if curve.mean.is_some() {
                            ui.label(text);
                        } else {
                            ui.label(text.weak());
                        }
                    });
                    for bound in [curve.min, curve.max] {
                        row.col(|ui: &mut Ui| {
                            ui.monospace(bound.map_or("–".to_string(), |v| format!("{v:.2}")));
                        });
                    }
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open LAS…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = !state.summary.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Export interval…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.source.is_some() {
            ui.label(format!(
                "{}  –  {} samples, {} in interval",
                state.dataset.well,
                state.dataset.len(),
                state.summary.indices.len()
            ));
            if let Some((top, bottom)) = state.summary.depth_extent(&state.dataset) {
                ui.label(format!("covering {top:.2} – {bottom:.2}"));
            }
        }

        ui.separator();

        let vertical = state.config.orientation == TrackOrientation::Vertical;
        if ui.selectable_label(vertical, "Vertical tracks").clicked() {
            state.config.orientation = if vertical {
                TrackOrientation::Horizontal
            } else {
                TrackOrientation::Vertical
            };
            state.recompute();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open LAS File")
        .add_filter("LAS Files", &["las", "LAS"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export depth interval")
        .add_filter("CSV", &["csv"])
        .set_file_name("interval.csv")
        .save_file();

    if let Some(path) = file {
        state.export_to(&path);
    }
}

use eframe::egui::{self, Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints};

use crate::color::track_colors;
use crate::config::TrackOrientation;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Log tracks (central panel)
// ---------------------------------------------------------------------------

/// Render one chart per configured track, side by side for vertical tracks
/// and stacked for horizontal ones.
pub fn log_tracks(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a LAS file to view curves  (File → Open LAS…)");
        });
        return;
    }

    let colors = track_colors(&state.config.tracks);
    let n = state.dataset.curves.len();
    if n == 0 {
        return;
    }

    match state.config.orientation {
        TrackOrientation::Vertical => {
            ui.columns(n, |cols: &mut [Ui]| {
                for (idx, col) in cols.iter_mut().enumerate() {
                    track_plot(col, state, idx, colors[idx]);
                }
            });
        }
        TrackOrientation::Horizontal => {
            let height = ui.available_height() / n as f32 - ui.spacing().item_spacing.y;
            for (idx, &color) in colors.iter().enumerate().take(n) {
                ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
                    track_plot(ui, state, idx, color);
                });
            }
        }
    }
}

fn track_plot(ui: &mut Ui, state: &AppState, idx: usize, color: Color32) {
    let curve = &state.dataset.curves[idx];
    let name = if curve.unit.is_empty() {
        curve.mnemonic.clone()
    } else {
        format!("{} ({})", curve.mnemonic, curve.unit)
    };
    let depth_label = if state.dataset.well.depth_unit.is_empty() {
        "Depth".to_string()
    } else {
        format!("Depth ({})", state.dataset.well.depth_unit)
    };

    let mut plot = Plot::new(("log_track", idx));
    if revision_changed(ui.ctx(), egui::Id::new(("log_track_revision", idx)), state.revision) {
        // Refit bounds to the new interval.
        plot = plot.reset();
    }
    let plot = plot
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    let plot = match state.config.orientation {
        TrackOrientation::Vertical => plot
            .x_axis_label(name.clone())
            .y_axis_label(depth_label)
            // Depth is plotted negated so it grows downwards.
            .y_axis_formatter(|mark, _range| format!("{:.1}", -mark.value))
            .label_formatter(|name, p| format!("{name}\nvalue: {:.3}\ndepth: {:.2}", p.x, -p.y))
            .link_axis(egui::Id::new("depth_axis"), egui::Vec2b::new(false, true)),
        TrackOrientation::Horizontal => plot
            .height(ui.available_height())
            .x_axis_label(depth_label)
            .y_axis_label(name.clone())
            .label_formatter(|name, p| format!("{name}\ndepth: {:.2}\nvalue: {:.3}", p.x, p.y))
            .link_axis(egui::Id::new("depth_axis"), egui::Vec2b::new(true, false)),
    };

    let points: PlotPoints = state.track_points(idx).into();

    plot.show(ui, |plot_ui| {
        let line = Line::new(points)
            .name(&name)
            .color(color)
            .width(state.config.line_width);
        plot_ui.line(line);
    });
}

/// Record `revision` under `id`, returning whether it differs from the one
/// recorded on the previous frame.
fn revision_changed(ctx: &egui::Context, id: egui::Id, revision: u64) -> bool {
    ctx.data_mut(|data| {
        let changed = data.get_temp::<u64>(id) != Some(revision);
        if changed {
            data.insert_temp(id, revision);
        }
        changed
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_changed_fires_once_per_revision() {
        let ctx = egui::Context::default();
        let id = egui::Id::new(("log_track_revision", 0));

        assert!(revision_changed(&ctx, id, 1));
        assert!(!revision_changed(&ctx, id, 1));
        assert!(revision_changed(&ctx, id, 2));
        assert!(!revision_changed(&ctx, id, 2));

        let other = egui::Id::new(("log_track_revision", 1));
        assert!(revision_changed(&ctx, other, 2));
    }
}

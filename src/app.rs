use eframe::egui;

use crate::config::{Theme, ViewerConfig};
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LasViewerApp {
    pub state: AppState,
}

impl LasViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig) -> Self {
        let visuals = match config.theme {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        };
        cc.egui_ctx.set_visuals(visuals);

        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for LasViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: depth controls ----
        egui::SidePanel::right("depth_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: log tracks ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::log_tracks(ui, &self.state);
        });
    }
}

use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

/// Window of the dashboard: a source/row-count strip on top, the sensor and
/// year selectors on the left, and the four charts filling the rest.
pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // Selection changes here rebuild the chart cache before the charts draw.
        egui::SidePanel::left("selector_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            plot::dashboard(ui, &self.state);
        });
    }
}

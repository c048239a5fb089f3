use eframe::egui;

use crate::config::Config;
use crate::state::{AppState, ViewMode};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WorkPlanApp {
    pub state: AppState,
}

impl WorkPlanApp {
    pub fn new(config: &Config) -> Self {
        Self {
            state: AppState::load(&config.csv_path),
        }
    }
}

impl eframe::App for WorkPlanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table or charts ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view_mode {
            ViewMode::Table => table::work_plan_table(ui, &self.state),
            ViewMode::Charts => plot::charts(ui, &self.state),
        });
    }
}

use eframe::egui;

use crate::color::SeriesColors;
use crate::config::DashboardConfig;
use crate::state::DashboardState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SunDashApp {
    pub state: DashboardState,
    colors: SeriesColors,
}

impl SunDashApp {
    pub fn new(config: DashboardConfig) -> anyhow::Result<Self> {
        Ok(Self {
            state: DashboardState::new(config)?,
            colors: SeriesColors::default(),
        })
    }
}

impl eframe::App for SunDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls and imagery ----
        egui::SidePanel::left("control_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let chart_height = ((ui.available_height() - 120.0) / 2.0).max(120.0);
            plot::sunspot_line_chart(ui, &self.state, &self.colors, chart_height);
            ui.separator();
            plot::cycle_scatter_chart(ui, &self.state, &self.colors, chart_height);
        });
    }
}

use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::color::SeriesColors;
use crate::data::model::{CYCLE, DATE_FRAC, ROLLING_AVG, TOTAL_SPOT_NUM};
use crate::state::DashboardState;

// ---------------------------------------------------------------------------
// Monthly + smoothed line chart
// ---------------------------------------------------------------------------

/// Render monthly sunspot numbers and their trailing mean.
pub fn sunspot_line_chart(ui: &mut Ui, state: &DashboardState, colors: &SeriesColors, height: f32) {
    ui.label(
        "For the chart below, use the year range and smoothing sliders on the left.",
    );
    ui.strong(format!(
        "International sunspot number Sn: monthly mean and {}-month smoothed number",
        state.months
    ));

    let Some(table) = &state.smoothed else {
        placeholder(ui, height);
        return;
    };

    let monthly = table.xy_points(DATE_FRAC, TOTAL_SPOT_NUM).unwrap_or_default();
    let smoothed = table.xy_points(DATE_FRAC, ROLLING_AVG).unwrap_or_default();

    Plot::new("sunspot_line_chart")
        .legend(Legend::default())
        .height(height)
        .x_axis_label("Time(years)")
        .y_axis_label("Sunspot Number")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let points: PlotPoints = PlotPoints::from(monthly);
            plot_ui.line(Line::new(points).name("Monthly").color(colors.monthly).width(1.0));

            let points: PlotPoints = PlotPoints::from(smoothed);
            plot_ui.line(Line::new(points).name("Smoothed").color(colors.smoothed).width(2.0));
        });
}

// ---------------------------------------------------------------------------
// Cycle-folded scatter chart
// ---------------------------------------------------------------------------

/// Render sunspot numbers against their position within the cycle.
pub fn cycle_scatter_chart(ui: &mut Ui, state: &DashboardState, colors: &SeriesColors, height: f32) {
    ui.label("For the chart below, use the cycle slider on the left.");
    ui.strong(format!("Sunspot Cycle: {:.1}", state.cycle_years));

    let Some(table) = &state.folded else {
        placeholder(ui, height);
        return;
    };

    let folded = table.xy_points(CYCLE, TOTAL_SPOT_NUM).unwrap_or_default();

    Plot::new("cycle_scatter_chart")
        .height(height)
        .x_axis_label("Years")
        .y_axis_label("# of Sunspots")
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            let points: PlotPoints = PlotPoints::from(folded);
            plot_ui.points(Points::new(points).color(colors.folded).radius(1.5));
        });
}

fn placeholder(ui: &mut Ui, height: f32) {
    ui.allocate_ui(eframe::egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data  (File → Open dataset…)");
        });
    });
}

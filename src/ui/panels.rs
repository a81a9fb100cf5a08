use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::imagery::SolarFilter;
use crate::state::DashboardState;

// ---------------------------------------------------------------------------
// Left side panel – control widgets
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut DashboardState) {
    ui.heading("Interactive SunDash Dashboard");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            year_controls(ui, state);
            ui.add_space(8.0);

            // ---- Smoothing window ----
            ui.strong("Number of months (observation periods) for the smoothing line");
            let bounds = state.config.smoothing_months.clone();
            let mut months = state.months;
            if ui
                .add(egui::Slider::new(&mut months, bounds.min..=bounds.max).text("months"))
                .changed()
            {
                state.set_months(months);
            }
            ui.add_space(8.0);

            // ---- Cycle length ----
            ui.strong("Number of years for each cycle period");
            let bounds = state.config.cycle_years.clone();
            let mut cycle = state.cycle_years;
            if ui
                .add(
                    egui::Slider::new(&mut cycle, bounds.min..=bounds.max)
                        .step_by(bounds.step)
                        .fixed_decimals(1)
                        .text("years"),
                )
                .changed()
            {
                state.set_cycle_years(cycle);
            }
            ui.add_space(8.0);

            image_picker(ui, state);
        });
}

fn year_controls(ui: &mut Ui, state: &mut DashboardState) {
    ui.strong("Range of years");
    let (min, max) = state.config.year_bounds;
    let (mut low, mut high) = state.years;

    let low_changed = ui
        .add(egui::Slider::new(&mut low, min..=max).text("from"))
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(&mut high, min..=max).text("to"))
        .changed();

    // Dragging one end past the other pushes the other along.
    if low_changed {
        state.set_years((low, high.max(low)));
    } else if high_changed {
        state.set_years((low.min(high), high));
    }
}

fn image_picker(ui: &mut Ui, state: &mut DashboardState) {
    ui.strong("Image filter");
    let current = state.filter_label.clone();
    egui::ComboBox::from_id_salt("image_filter")
        .selected_text(&current)
        .width(ui.available_width() * 0.8)
        .show_ui(ui, |ui: &mut Ui| {
            for filter in SolarFilter::ALL {
                if ui
                    .selectable_label(current == filter.label(), filter.to_string())
                    .clicked()
                {
                    state.set_filter_label(filter.label());
                }
            }
        });
    ui.add_space(4.0);

    match state.image_path() {
        Some(path) => {
            let uri = format!("file://{}", path.display());
            ui.add(
                egui::Image::from_uri(uri)
                    .max_width(ui.available_width())
                    .max_height(360.0),
            );
        }
        None => {
            ui.label(RichText::new("No image for this filter.").italics());
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.refresh_all();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!("{}", state.data_path().display()));
        if let Some(table) = &state.smoothed {
            ui.label(format!(
                "{} observations in {}–{}",
                table.len(),
                state.years.0,
                state.years.1
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut DashboardState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sunspot observations")
        .add_filter("Supported files", &["csv", "txt", "parquet", "pq"])
        .add_filter("CSV", &["csv", "txt"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.set_data_path(path);
    }
}

use anyhow::anyhow;
use eframe::egui;

use sundash::app::SunDashApp;
use sundash::config::DashboardConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let app = DashboardConfig::resolve(std::env::args().nth(1))
        .and_then(SunDashApp::new)
        .inspect_err(|e| {
            log::error!("invalid configuration: {e:#}");
        })?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SunDash – Sunspot Dashboard",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render the jpg imagery.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow!("running dashboard: {e}"))
}

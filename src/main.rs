use eframe::NativeOptions;
use trendlab::viz::TrendlabApp;

fn main() -> eframe::Result<()> {
    // Configure logging (optional)
    env_logger::init();

    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("Trendlab - Trend Labelling"),
        ..Default::default()
    };

    eframe::run_native(
        "Trendlab",
        native_options,
        Box::new(|cc| Ok(Box::new(TrendlabApp::new(cc)))),
    )
}

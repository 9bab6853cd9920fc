mod app;
mod ui;

// Re-export library modules so that `crate::state` and `crate::mercator`
// resolve to the lib crate types everywhere in the binary.
pub use floatchat_gui_lib::mercator;
pub use floatchat_gui_lib::state;

use app::FloatChatApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "floatchat_gui=info,shared=info".into()),
        )
        .init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("FloatChat")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "floatchat-gui",
        native_options,
        Box::new(|cc| Ok(Box::new(FloatChatApp::new(cc)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

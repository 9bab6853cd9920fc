use egui::Ui;

use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        let center = state.map.center();
        ui.weak(format!(
            "{:.3}°, {:.3}°  z{:.1}",
            center.lat,
            center.lng,
            state.map.zoom()
        ));

        ui.separator();
        ui.weak(format!("Chat: {:?}", state.panel.state()));

        ui.separator();
        let panel = state.glass.panel();
        ui.weak(format!(
            "Glass: {} {:.0}×{:.0}",
            state.glass.style().class_name(),
            panel.width,
            panel.height
        ));
    });
}

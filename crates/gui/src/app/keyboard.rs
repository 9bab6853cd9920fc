//! Keyboard shortcut handling

use eframe::egui;

use crate::app::Clock;
use crate::state::AppState;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState, clock: &Clock) {
    ctx.input(|i| {
        // Escape: dismiss suggestions, then close the chat
        if i.key_pressed(egui::Key::Escape) {
            if state.search.autocomplete.is_visible() {
                state.search.autocomplete.document_clicked(false, false);
            } else {
                state.panel.close(clock.now());
            }
        }
    });

    // Remaining shortcuts only apply when no text field has focus
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        // Ctrl+/ toggles the chat
        if i.modifiers.command && i.key_pressed(egui::Key::Slash) {
            state.panel.toggle(clock.now());
        }
        // +/- zoom the map
        if i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals) {
            state.map.zoom_by(1.0);
        }
        if i.key_pressed(egui::Key::Minus) {
            state.map.zoom_by(-1.0);
        }
    });
}

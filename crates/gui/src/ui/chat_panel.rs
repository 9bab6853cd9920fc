use egui::Ui;
use shared::panel::CLOSE_DELAY;
use shared::{ChatMessage, ChatRole};

use crate::app::{glass_frame, Clock};
use crate::state::AppState;

/// Show the chat popup. The panel fades with its active flag; its laid-out
/// size feeds the glass effect.
pub fn show(ctx: &egui::Context, state: &mut AppState, clock: &Clock) {
    let opacity = ctx.animate_bool_with_time(
        egui::Id::new("chat_fade"),
        state.panel.is_active(),
        CLOSE_DELAY.as_secs_f32(),
    );
    let [width, height] = state.settings.ui.chat_size;

    let mut close_clicked = false;
    let window = egui::Window::new("FloatChat")
        .id(egui::Id::new("chat_window"))
        .title_bar(false)
        .collapsible(false)
        .resizable(true)
        .default_size([width, height])
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -36.0])
        .frame(glass_frame(&state.settings))
        .show(ctx, |ui| {
            ui.set_opacity(opacity);
            close_clicked = show_contents(ui, state);
        });

    if let Some(window) = window {
        let rect = window.response.rect;
        state.observe_panel_size(rect.width(), rect.height());
    }
    if close_clicked {
        state.panel.close(clock.now());
    }
}

/// Returns true if the close button was clicked.
fn show_contents(ui: &mut Ui, state: &mut AppState) -> bool {
    let mut close_clicked = false;
    ui.horizontal(|ui| {
        ui.heading("FloatChat");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            close_clicked = ui.small_button("✕").on_hover_text("Close").clicked();
        });
    });
    ui.separator();

    let scroll_height = (ui.available_height() - 36.0).max(60.0);
    egui::ScrollArea::vertical()
        .id_salt("chat_scroll")
        .max_height(scroll_height)
        .stick_to_bottom(true)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if state.chat.log.is_empty() {
                ui.add_space(10.0);
                ui.vertical_centered(|ui| {
                    ui.weak("Ask about the ocean floats");
                });
            }
            for message in state.chat.log.messages() {
                show_message(ui, message);
            }
        });

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        let available_w = ui.available_width() - 56.0;
        let input = ui.add_sized(
            [available_w.max(40.0), 22.0],
            egui::TextEdit::singleline(&mut state.chat.input)
                .hint_text("Type a message...")
                .desired_width(available_w.max(40.0)),
        );

        let enter_pressed = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let send_clicked = ui.button("Send").clicked();

        if (send_clicked || enter_pressed) && state.chat.send_message() && enter_pressed {
            input.request_focus();
        }
    });

    close_clicked
}

fn show_message(ui: &mut Ui, message: &ChatMessage) {
    let (align, bg) = match message.role {
        ChatRole::User => (
            egui::Align::Max,
            egui::Color32::from_rgba_unmultiplied(41, 128, 185, 200),
        ),
        ChatRole::Bot => (
            egui::Align::Min,
            egui::Color32::from_rgba_unmultiplied(255, 255, 255, 28),
        ),
    };

    ui.with_layout(egui::Layout::top_down(align), |ui| {
        egui::Frame::NONE
            .fill(bg)
            .corner_radius(egui::CornerRadius::same(10))
            .inner_margin(egui::Margin::symmetric(10, 6))
            .outer_margin(egui::Margin::symmetric(0, 2))
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.8);
                ui.label(&message.text);
            });
    });
}

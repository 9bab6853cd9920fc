//! Application style configuration

use eframe::egui;

use crate::state::AppSettings;

/// Configure initial application styles from the loaded settings
pub fn configure_styles(ctx: &egui::Context, settings: &AppSettings) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::dark();

    let radius = corner_radius(settings.effect.border_radius);
    style.visuals.window_corner_radius = radius;
    style.visuals.menu_corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(6);

    style.spacing.item_spacing = egui::vec2(6.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 4.0);

    style.visuals.panel_fill = egui::Color32::from_rgb(18, 28, 40);
    style.visuals.selection.bg_fill = egui::Color32::from_rgb(41, 128, 185);
    style.visuals.hyperlink_color = egui::Color32::from_rgb(52, 152, 219);

    apply_text_styles(&mut style, settings.ui.font_size);

    ctx.set_style(style);
}

/// Frame of the chat panel: a translucent surface standing in for the
/// refracting glass when no SVG filter is available.
pub fn glass_frame(settings: &AppSettings) -> egui::Frame {
    let effect = &settings.effect;
    let alpha = (effect.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(28, 36, 48, alpha))
        .stroke(egui::Stroke::new(
            1.0,
            egui::Color32::from_rgba_unmultiplied(255, 255, 255, 48),
        ))
        .corner_radius(corner_radius(effect.border_radius))
        .inner_margin(egui::Margin::same(12))
}

fn corner_radius(px: f64) -> egui::CornerRadius {
    egui::CornerRadius::same(px.clamp(0.0, 255.0) as u8)
}

fn apply_text_styles(style: &mut egui::Style, font_size: f32) {
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::proportional(font_size),
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::proportional(font_size),
    );
    style.text_styles.insert(
        egui::TextStyle::Small,
        egui::FontId::proportional(font_size * 0.8),
    );
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::proportional(font_size * 1.25),
    );
}

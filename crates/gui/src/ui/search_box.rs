use egui::Ui;
use shared::PointOfInterest;

use crate::state::AppState;

const INPUT_WIDTH: f32 = 260.0;

/// Search input with a floating suggestion list underneath
pub fn show(ui: &mut Ui, state: &mut AppState) {
    let input = ui.add(
        egui::TextEdit::singleline(&mut state.search.input)
            .hint_text("Search a float...")
            .desired_width(INPUT_WIDTH),
    );
    if input.changed() {
        state.search.input_changed();
    }

    let mut list_rect = None;
    let mut selected = None;
    if state.search.autocomplete.is_visible() {
        let suggestions: Vec<&'static PointOfInterest> =
            state.search.autocomplete.suggestions().to_vec();
        let area = egui::Area::new(egui::Id::new("search_suggestions"))
            .order(egui::Order::Foreground)
            .fixed_pos(input.rect.left_bottom() + egui::vec2(0.0, 2.0))
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_min_width(INPUT_WIDTH);
                    for (index, point) in suggestions.iter().enumerate() {
                        if ui.selectable_label(false, point.name).clicked() {
                            selected = Some(index);
                        }
                    }
                });
            });
        list_rect = Some(area.response.rect);
    }

    if let Some(index) = selected {
        state.search.select(index, &mut state.map);
        return;
    }

    // Any click outside the input and the list dismisses the list
    let click = ui.input(|i| {
        if i.pointer.any_click() {
            i.pointer.interact_pos()
        } else {
            None
        }
    });
    if let Some(pos) = click {
        let inside_input = input.rect.contains(pos);
        let inside_list = list_rect.is_some_and(|rect| rect.contains(pos));
        state
            .search
            .autocomplete
            .document_clicked(inside_input, inside_list);
    }
}

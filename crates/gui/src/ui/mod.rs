pub mod chat_panel;
pub mod map_view;
pub mod search_box;
pub mod status_bar;

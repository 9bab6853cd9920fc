//! Main application module

mod keyboard;
mod styles;

use std::time::{Duration, Instant};

use eframe::egui;

use crate::state::AppState;
use crate::ui::{chat_panel, map_view, search_box, status_bar};

pub use styles::glass_frame;

/// Monotonic application clock. State timers are offsets from start.
pub struct Clock {
    start: Instant,
}

impl Clock {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Main application
pub struct FloatChatApp {
    state: AppState,
    clock: Clock,
}

impl FloatChatApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let state = AppState::default();
        styles::configure_styles(&cc.egui_ctx, &state.settings);
        tracing::info!(style = ?state.glass.style(), "FloatChat started");

        Self {
            state,
            clock: Clock::new(),
        }
    }
}

impl eframe::App for FloatChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = self.clock.now();
        self.state.tick(now);

        keyboard::handle_keyboard(ctx, &mut self.state, &self.clock);

        // ── Top bar: search + chat button ─────────────────────
        egui::TopBottomPanel::top("top_bar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(10, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("FloatChat");
                    ui.separator();
                    search_box::show(ui, &mut self.state);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let label = if self.state.panel.is_displayed() {
                            "Hide chat"
                        } else {
                            "Chat"
                        };
                        if ui.button(label).clicked() {
                            self.state.panel.toggle(self.clock.now());
                        }
                    });
                });
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Central panel: map ───────────────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                map_view::show(ui, &mut self.state);
            });

        // ── Chat popup ───────────────────────────────────────
        if self.state.panel.is_displayed() {
            chat_panel::show(ctx, &mut self.state, &self.clock);
        }

        self.schedule_repaint(ctx, now);
    }
}

impl FloatChatApp {
    /// Repaint continuously while something animates, otherwise wake up for
    /// the next panel timer only.
    fn schedule_repaint(&self, ctx: &egui::Context, now: Duration) {
        if self.state.is_animating() || self.state.glass.resize_pending() {
            ctx.request_repaint();
        } else if let Some(deadline) = self.state.next_wakeup() {
            ctx.request_repaint_after(deadline.saturating_sub(now));
        }
    }
}

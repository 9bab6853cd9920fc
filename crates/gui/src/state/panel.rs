//! Frame-clock driver for the chat panel state machine.

use std::time::Duration;

use shared::{PanelController, PanelEffect, PanelState, TimerToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingTimer {
    token: TimerToken,
    due: Duration,
}

/// Applies [`PanelEffect`]s to plain flags and runs the panel timers off the
/// frame clock. Times are offsets from application start.
#[derive(Debug, Default)]
pub struct PanelDriver {
    controller: PanelController,
    pending: Option<PendingTimer>,
    displayed: bool,
    active: bool,
    refresh_requested: bool,
}

impl PanelDriver {
    pub fn state(&self) -> PanelState {
        self.controller.state()
    }

    /// The panel takes part in the layout
    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    /// The panel carries the active style (fully faded in)
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// When the pending transition timer is due, if any
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.map(|p| p.due)
    }

    pub fn open(&mut self, now: Duration) {
        let effects = self.controller.open();
        self.apply(effects, now);
    }

    pub fn close(&mut self, now: Duration) {
        let effects = self.controller.close();
        self.apply(effects, now);
    }

    pub fn toggle(&mut self, now: Duration) {
        let effects = self.controller.toggle();
        self.apply(effects, now);
    }

    /// Fire the pending timer if it is due at `now`
    pub fn poll(&mut self, now: Duration) {
        let Some(pending) = self.pending else {
            return;
        };
        if pending.due > now {
            return;
        }
        self.pending = None;
        let effects = self.controller.timer_elapsed(pending.token);
        self.apply(effects, now);
    }

    /// Whether a displacement refresh was requested since the last call
    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }

    fn apply(&mut self, effects: Vec<PanelEffect>, now: Duration) {
        for effect in effects {
            match effect {
                PanelEffect::Show => self.displayed = true,
                PanelEffect::Hide => self.displayed = false,
                PanelEffect::Activate => self.active = true,
                PanelEffect::Deactivate => self.active = false,
                PanelEffect::RefreshDisplacement => self.refresh_requested = true,
                PanelEffect::StartTimer { token, delay } => {
                    self.pending = Some(PendingTimer {
                        token,
                        due: now + delay,
                    });
                }
                PanelEffect::CancelTimer(token) => {
                    if self.pending.is_some_and(|p| p.token == token) {
                        self.pending = None;
                    }
                }
            }
        }
    }
}

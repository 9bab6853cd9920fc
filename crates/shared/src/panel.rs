//! Visibility state machine for the chat panel.
//!
//! The panel fades in and out with CSS transitions, so showing and activating
//! (and deactivating and hiding) happen one timer apart:
//!
//! ```text
//! Hidden --open--> Opening --timer--> Active --close--> Closing --timer--> Hidden
//! ```
//!
//! The controller never sleeps. Every call returns the [`PanelEffect`]s the
//! host has to perform, including starting and cancelling timers. A pending
//! transition owns exactly one timer; starting a new transition cancels it,
//! and a late tick carrying a stale [`TimerToken`] is ignored.

use std::time::Duration;

/// Delay between showing the panel and marking it active
pub const OPEN_DELAY: Duration = Duration::from_millis(10);
/// Length of the close transition, after which the panel is hidden
pub const CLOSE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Hidden,
    Opening,
    Active,
    Closing,
}

/// Identifies one scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Side effect requested from the host surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEffect {
    /// Make the panel part of the layout
    Show,
    /// Remove the panel from the layout
    Hide,
    /// Add the active class (starts the open transition)
    Activate,
    /// Remove the active class (starts the close transition)
    Deactivate,
    /// Regenerate the displacement map for the current panel box
    RefreshDisplacement,
    /// Call [`PanelController::timer_elapsed`] with `token` after `delay`
    StartTimer { token: TimerToken, delay: Duration },
    /// The timer for `token` must not fire any more
    CancelTimer(TimerToken),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelTimings {
    pub open_delay: Duration,
    pub close_delay: Duration,
}

impl Default for PanelTimings {
    fn default() -> Self {
        Self {
            open_delay: OPEN_DELAY,
            close_delay: CLOSE_DELAY,
        }
    }
}

#[derive(Debug)]
pub struct PanelController {
    state: PanelState,
    timings: PanelTimings,
    pending: Option<TimerToken>,
    next_token: u64,
}

impl Default for PanelController {
    fn default() -> Self {
        Self::new(PanelTimings::default())
    }
}

impl PanelController {
    pub fn new(timings: PanelTimings) -> Self {
        Self {
            state: PanelState::Hidden,
            timings,
            pending: None,
            next_token: 0,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn timings(&self) -> PanelTimings {
        self.timings
    }

    /// Token of the timer the controller is waiting for, if any
    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.pending
    }

    /// Whether the panel currently takes part in the layout
    pub fn is_visible(&self) -> bool {
        self.state != PanelState::Hidden
    }

    pub fn is_active(&self) -> bool {
        self.state == PanelState::Active
    }

    pub fn open(&mut self) -> Vec<PanelEffect> {
        let mut effects = Vec::new();
        match self.state {
            PanelState::Hidden => effects.push(PanelEffect::Show),
            PanelState::Closing => self.cancel_pending(&mut effects),
            PanelState::Opening | PanelState::Active => return effects,
        }
        self.start_timer(self.timings.open_delay, &mut effects);
        self.transition(PanelState::Opening);
        effects
    }

    pub fn close(&mut self) -> Vec<PanelEffect> {
        let mut effects = Vec::new();
        match self.state {
            PanelState::Active => {}
            PanelState::Opening => self.cancel_pending(&mut effects),
            PanelState::Hidden | PanelState::Closing => return effects,
        }
        effects.push(PanelEffect::Deactivate);
        self.start_timer(self.timings.close_delay, &mut effects);
        self.transition(PanelState::Closing);
        effects
    }

    /// Open when hidden or closing, close otherwise
    pub fn toggle(&mut self) -> Vec<PanelEffect> {
        match self.state {
            PanelState::Hidden | PanelState::Closing => self.open(),
            PanelState::Opening | PanelState::Active => self.close(),
        }
    }

    /// Report that the timer for `token` fired.
    pub fn timer_elapsed(&mut self, token: TimerToken) -> Vec<PanelEffect> {
        if self.pending != Some(token) {
            tracing::trace!(?token, "ignoring stale panel timer");
            return Vec::new();
        }
        self.pending = None;

        match self.state {
            PanelState::Opening => {
                self.transition(PanelState::Active);
                vec![PanelEffect::Activate, PanelEffect::RefreshDisplacement]
            }
            PanelState::Closing => {
                self.transition(PanelState::Hidden);
                vec![PanelEffect::Hide]
            }
            // A timer is only pending while opening or closing
            PanelState::Hidden | PanelState::Active => Vec::new(),
        }
    }

    fn start_timer(&mut self, delay: Duration, effects: &mut Vec<PanelEffect>) {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(token);
        effects.push(PanelEffect::StartTimer { token, delay });
    }

    fn cancel_pending(&mut self, effects: &mut Vec<PanelEffect>) {
        if let Some(token) = self.pending.take() {
            effects.push(PanelEffect::CancelTimer(token));
        }
    }

    fn transition(&mut self, next: PanelState) {
        tracing::debug!(from = ?self.state, to = ?next, "chat panel transition");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_timer(effects: &[PanelEffect]) -> TimerToken {
        effects
            .iter()
            .find_map(|e| match e {
                PanelEffect::StartTimer { token, .. } => Some(*token),
                _ => None,
            })
            .expect("no timer started")
    }

    #[test]
    fn test_full_cycle() {
        let mut panel = PanelController::default();
        assert_eq!(panel.state(), PanelState::Hidden);
        assert!(!panel.is_visible());

        let effects = panel.open();
        let t = started_timer(&effects);
        assert_eq!(
            effects,
            vec![
                PanelEffect::Show,
                PanelEffect::StartTimer {
                    token: t,
                    delay: OPEN_DELAY
                }
            ]
        );
        assert_eq!(panel.state(), PanelState::Opening);
        assert!(panel.is_visible());
        assert!(!panel.is_active());

        let effects = panel.timer_elapsed(t);
        assert_eq!(
            effects,
            vec![PanelEffect::Activate, PanelEffect::RefreshDisplacement]
        );
        assert!(panel.is_active());
        assert_eq!(panel.pending_timer(), None);

        let effects = panel.close();
        let t = started_timer(&effects);
        assert_eq!(
            effects,
            vec![
                PanelEffect::Deactivate,
                PanelEffect::StartTimer {
                    token: t,
                    delay: CLOSE_DELAY
                }
            ]
        );
        assert_eq!(panel.state(), PanelState::Closing);
        assert!(panel.is_visible());

        assert_eq!(panel.timer_elapsed(t), vec![PanelEffect::Hide]);
        assert_eq!(panel.state(), PanelState::Hidden);
    }

    #[test]
    fn test_open_while_open_is_noop() {
        let mut panel = PanelController::default();
        let t = started_timer(&panel.open());
        assert!(panel.open().is_empty());
        panel.timer_elapsed(t);
        assert!(panel.open().is_empty());
        assert_eq!(panel.state(), PanelState::Active);
    }

    #[test]
    fn test_close_while_hidden_is_noop() {
        let mut panel = PanelController::default();
        assert!(panel.close().is_empty());
        assert_eq!(panel.state(), PanelState::Hidden);
    }

    #[test]
    fn test_close_during_opening_cancels_activation() {
        let mut panel = PanelController::default();
        let open_timer = started_timer(&panel.open());

        let effects = panel.close();
        let close_timer = started_timer(&effects);
        assert_eq!(effects[0], PanelEffect::CancelTimer(open_timer));
        assert!(effects.contains(&PanelEffect::Deactivate));
        assert_ne!(open_timer, close_timer);
        assert_eq!(panel.state(), PanelState::Closing);

        // The cancelled open timer must not activate the panel
        assert!(panel.timer_elapsed(open_timer).is_empty());
        assert_eq!(panel.state(), PanelState::Closing);

        assert_eq!(panel.timer_elapsed(close_timer), vec![PanelEffect::Hide]);
        assert_eq!(panel.state(), PanelState::Hidden);
    }

    #[test]
    fn test_open_during_closing_cancels_hide() {
        let mut panel = PanelController::default();
        let t = started_timer(&panel.open());
        panel.timer_elapsed(t);
        let close_timer = started_timer(&panel.close());

        let effects = panel.open();
        let reopen_timer = started_timer(&effects);
        assert_eq!(effects[0], PanelEffect::CancelTimer(close_timer));
        // Still displayed, so no Show is needed
        assert!(!effects.contains(&PanelEffect::Show));
        assert_eq!(panel.state(), PanelState::Opening);

        assert!(panel.timer_elapsed(close_timer).is_empty());
        assert!(panel.is_visible());

        panel.timer_elapsed(reopen_timer);
        assert!(panel.is_active());
    }

    #[test]
    fn test_rapid_toggling_ends_in_last_requested_state() {
        let mut panel = PanelController::default();
        let mut timers = Vec::new();
        for _ in 0..5 {
            timers.push(started_timer(&panel.toggle()));
        }
        // open, close, open, close, open
        assert_eq!(panel.state(), PanelState::Opening);

        // Every timer fires late, in order; only the last one counts
        let mut effects = Vec::new();
        for t in timers {
            effects.extend(panel.timer_elapsed(t));
        }
        assert_eq!(
            effects,
            vec![PanelEffect::Activate, PanelEffect::RefreshDisplacement]
        );
        assert!(panel.is_active());
    }

    #[test]
    fn test_custom_timings() {
        let timings = PanelTimings {
            open_delay: Duration::from_millis(1),
            close_delay: Duration::from_millis(2),
        };
        let mut panel = PanelController::new(timings);
        let effects = panel.open();
        assert!(matches!(
            effects[1],
            PanelEffect::StartTimer { delay, .. } if delay == Duration::from_millis(1)
        ));
    }
}

//! Screen transition scheduler
//!
//! Two independent countdowns drive screen changes:
//!
//! - the **transition** timer runs a crossfade. It counts down once while the
//!   old screen fades out, flips the active screen, then counts down again
//!   while the new screen fades in.
//! - the **delay** timer postpones the start of a transition so move and
//!   merge animations stay visible before the screen changes.
//!
//! While either runs, gameplay input is blocked.

use crate::types::{Screen, STATE_DELAY_TIME, STATE_TRANSITION_TIME};

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionScheduler {
    screen: Screen,
    destination: Screen,
    transition_time: f32,
    delay_time: f32,
    transition_remaining: f32,
    delay_remaining: f32,
    delayed_target: Screen,
}

impl TransitionScheduler {
    pub fn new(transition_time: f32, delay_time: f32) -> Self {
        Self {
            screen: Screen::Start,
            destination: Screen::Start,
            transition_time,
            delay_time,
            transition_remaining: 0.0,
            delay_remaining: 0.0,
            delayed_target: Screen::Start,
        }
    }

    /// Screen currently being updated and drawn
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Screen the running (or last) transition leads to
    pub fn destination(&self) -> Screen {
        self.destination
    }

    /// Target of the pending delayed change, if any
    pub fn pending(&self) -> Option<Screen> {
        (self.delay_remaining > 0.0).then_some(self.delayed_target)
    }

    pub fn transition_time(&self) -> f32 {
        self.transition_time
    }

    pub fn delay_time(&self) -> f32 {
        self.delay_time
    }

    /// Start a crossfade toward `destination` now.
    pub fn begin_transition(&mut self, destination: Screen) {
        self.destination = destination;
        self.transition_remaining = self.transition_time;
    }

    /// Start a crossfade toward `destination` once the delay elapses.
    ///
    /// A second call before the delay fires replaces the target and restarts
    /// the countdown.
    pub fn schedule(&mut self, destination: Screen) {
        self.delayed_target = destination;
        self.delay_remaining = self.delay_time;
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition_remaining > 0.0
    }

    /// True while either timer runs.
    pub fn is_blocking(&self) -> bool {
        self.transition_remaining > 0.0 || self.delay_remaining > 0.0
    }

    /// Advance both timers by `dt` seconds.
    ///
    /// Returns the screen of a delayed change whose countdown just ran out;
    /// the caller starts that transition. At most one per call.
    pub fn tick(&mut self, dt: f32) -> Option<Screen> {
        if self.transition_remaining > 0.0 {
            self.transition_remaining -= dt;
            if self.transition_remaining <= 0.0 {
                if self.screen != self.destination {
                    self.screen = self.destination;
                    self.transition_remaining = self.transition_time;
                } else {
                    self.transition_remaining = 0.0;
                }
            }
        }

        if self.delay_remaining > 0.0 {
            self.delay_remaining -= dt;
            if self.delay_remaining <= 0.0 {
                self.delay_remaining = 0.0;
                return Some(self.delayed_target);
            }
        }

        None
    }

    /// Opacity of the full-screen fade overlay, `None` when no transition runs.
    ///
    /// Rises from 0 to 1 while the old screen fades out, then falls back to 0
    /// as the new screen fades in.
    pub fn overlay_opacity(&self) -> Option<f32> {
        if self.transition_remaining <= 0.0 {
            return None;
        }
        let t = if self.screen != self.destination {
            (self.transition_time - self.transition_remaining) / self.transition_time
        } else {
            self.transition_remaining / self.transition_time
        };
        Some(t.clamp(0.0, 1.0))
    }
}

impl Default for TransitionScheduler {
    fn default() -> Self {
        Self::new(STATE_TRANSITION_TIME, STATE_DELAY_TIME)
    }
}

//! Per-frame key collection.
//!
//! Terminals deliver keys as a stream of events; the game asks "was this key
//! pressed since last frame". The collector folds presses into a
//! [`FrameInput`] and hands it over once per frame. Auto-repeat events are
//! ignored so holding a key does not fire a move every repeat tick.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{map_key, should_quit};
use crate::types::FrameInput;

/// What a single key event means to the application loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Recorded for the current frame
    Recorded,
    /// Not a game key, or not a fresh press
    Ignored,
    /// The player asked to leave
    Quit,
}

#[derive(Debug, Clone, Default)]
pub struct FrameCollector {
    current: FrameInput,
}

impl FrameCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.kind != KeyEventKind::Press {
            return KeyOutcome::Ignored;
        }
        if should_quit(key) {
            return KeyOutcome::Quit;
        }
        match map_key(key) {
            Some(game_key) => {
                self.current.press(game_key);
                KeyOutcome::Recorded
            }
            None => KeyOutcome::Ignored,
        }
    }

    /// Keys gathered so far this frame
    pub fn peek(&self) -> &FrameInput {
        &self.current
    }

    /// Hand over this frame's keys and start collecting the next frame.
    pub fn take(&mut self) -> FrameInput {
        std::mem::take(&mut self.current)
    }
}

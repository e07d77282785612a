//! Terminal input module.
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameKey`] and gathers the keys
//! pressed during one frame into an edge-triggered [`crate::types::FrameInput`].

pub mod collector;
pub mod map;

pub use tui_2048_types as types;

pub use collector::{FrameCollector, KeyOutcome};
pub use map::{map_key, should_quit};

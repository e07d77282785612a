//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the tile rules, the screen state machine and their
//! timers. It has **no dependencies** on terminal I/O, which makes it:
//!
//! - **Deterministic**: Same seed and frame deltas replay the same game
//! - **Testable**: Every rule is exercised without a terminal
//! - **Portable**: Any renderer can draw a [`GameSession`]
//!
//! # Module Structure
//!
//! - [`board`]: 4x4 board with slide/merge, spawn and stuck detection
//! - [`grid`]: Cell geometry used for animation endpoints and drawing
//! - [`rng`]: Seeded LCG for spawn placement and tile values
//! - [`scheduler`]: Crossfade and delayed screen-change timers
//! - [`session`]: Screen state machine tying the above together
//!
//! # Game Rules
//!
//! - **Moves**: Tiles slide as far as they can toward the pressed direction;
//!   equal tiles that collide merge into one tile of double value
//! - **Spawns**: Every move that changes the board drops a new 2 (or a 4,
//!   one time in four) into a free cell
//! - **Win**: Producing a 2048 tile schedules the win screen
//! - **Loss**: A full board with no equal neighbours schedules the loss screen
//!
//! # Example
//!
//! ```
//! use tui_2048_core::{GameSession, SessionConfig};
//! use tui_2048_types::{FrameInput, GameKey, Screen};
//!
//! let mut session = GameSession::new(12345, SessionConfig::default());
//!
//! // Press start on the title screen.
//! let mut input = FrameInput::new();
//! input.press(GameKey::Start);
//! session.update(1.0 / 60.0, &input);
//!
//! assert_eq!(session.board().occupied_count(), 2);
//!
//! // Let the crossfade run out.
//! for _ in 0..300 {
//!     session.update(1.0 / 60.0, &FrameInput::new());
//! }
//! assert_eq!(session.screen(), Screen::Gameplay);
//! assert!(!session.input_blocked());
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::update`](session::GameSession::update) every frame with
//! the elapsed time in seconds. Screen changes fade out for 1.25s, flip, and
//! fade back in for 1.25s; win/loss changes first wait 2s so the final move
//! stays visible.

pub mod board;
pub mod grid;
pub mod rng;
pub mod scheduler;
pub mod session;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError, Piece, ShiftOutcome};
pub use grid::{Grid, GridStyle};
pub use rng::SimpleRng;
pub use scheduler::TransitionScheduler;
pub use session::{GameSession, PlayTime, SessionConfig};

//! Game session - the board, the screen state machine and their timers
//!
//! One `GameSession` value lives for the whole process. The application loop
//! calls [`GameSession::update`] once per frame with the elapsed time and the
//! keys pressed since the previous frame, then hands the session to the
//! renderer.

use std::fmt;

use tracing::{debug, error, info};

use crate::board::{Board, ShiftOutcome};
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::scheduler::TransitionScheduler;
use crate::types::{
    FrameInput, GameKey, MergePolicy, PieceValue, Screen, STATE_DELAY_TIME, STATE_TRANSITION_TIME,
};

/// Tunables for a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub merge_policy: MergePolicy,
    /// Seconds per half of a screen crossfade
    pub transition_time: f32,
    /// Seconds between scheduling a win/loss and its crossfade
    pub delay_time: f32,
}

impl SessionConfig {
    pub fn with_merge_policy(mut self, merge_policy: MergePolicy) -> Self {
        self.merge_policy = merge_policy;
        self
    }

    pub fn with_transition_time(mut self, seconds: f32) -> Self {
        self.transition_time = seconds;
        self
    }

    pub fn with_delay_time(mut self, seconds: f32) -> Self {
        self.delay_time = seconds;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            merge_policy: MergePolicy::default(),
            transition_time: STATE_TRANSITION_TIME,
            delay_time: STATE_DELAY_TIME,
        }
    }
}

/// Whole minutes and seconds spent on a won game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayTime {
    pub minutes: u32,
    pub seconds: u32,
}

impl PlayTime {
    fn from_secs(secs: f32) -> Self {
        let total = secs.max(0.0) as u32;
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for PlayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m {}s", self.minutes, self.seconds)
    }
}

/// Complete game session state
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    grid: Grid,
    scheduler: TransitionScheduler,
    rng: SimpleRng,
    config: SessionConfig,
    /// Seconds since the session was created (sum of frame deltas)
    clock: f32,
    game_start: f32,
    game_end: f32,
    highest_piece: PieceValue,
    /// Monotonic game counter (increments on every `begin_game`)
    games_started: u32,
}

impl GameSession {
    /// Create a session on the start screen with the given RNG seed
    pub fn new(seed: u32, config: SessionConfig) -> Self {
        Self {
            board: Board::new(),
            grid: Grid::default(),
            scheduler: TransitionScheduler::new(config.transition_time, config.delay_time),
            rng: SimpleRng::new(seed),
            config,
            clock: 0.0,
            game_start: 0.0,
            game_end: 0.0,
            highest_piece: PieceValue::Two,
            games_started: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scripted scenarios
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &TransitionScheduler {
        &self.scheduler
    }

    pub fn screen(&self) -> Screen {
        self.scheduler.screen()
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn games_started(&self) -> u32 {
        self.games_started
    }

    /// Highest tile, as recorded when the loss screen was entered
    pub fn highest_piece(&self) -> PieceValue {
        self.highest_piece
    }

    /// Time from the start of the game until the win was scheduled
    pub fn play_time(&self) -> PlayTime {
        PlayTime::from_secs(self.game_end - self.game_start)
    }

    /// Time since the current game started
    pub fn game_time(&self) -> PlayTime {
        PlayTime::from_secs(self.clock - self.game_start)
    }

    /// Player input is ignored while a transition or delayed change runs
    pub fn input_blocked(&self) -> bool {
        self.scheduler.is_blocking()
    }

    pub fn overlay_opacity(&self) -> Option<f32> {
        self.scheduler.overlay_opacity()
    }

    /// Reset the board, deal two tiles, and fade into gameplay
    pub fn begin_game(&mut self) {
        self.change_screen(Screen::Gameplay);

        self.game_start = self.clock;
        self.games_started += 1;
        self.board.clear();
        info!(game = self.games_started, seed = self.rng.state(), "starting game");

        self.spawn_piece();
        self.spawn_piece();
    }

    /// Start a crossfade to `destination` now
    pub fn change_screen(&mut self, destination: Screen) {
        debug!(from = self.screen().as_str(), to = destination.as_str(), "screen transition");
        self.scheduler.begin_transition(destination);

        if destination == Screen::Loss {
            self.highest_piece = self.board.highest_value().max(PieceValue::Two);
        }
    }

    /// Start a crossfade to `destination` after the configured delay
    pub fn schedule_screen(&mut self, destination: Screen) {
        debug!(to = destination.as_str(), delay = self.config.delay_time, "screen change scheduled");
        self.scheduler.schedule(destination);

        if destination == Screen::Win {
            self.game_end = self.clock;
        }
    }

    /// Advance the session by one frame
    pub fn update(&mut self, dt: f32, input: &FrameInput) {
        self.clock += dt;

        if let Some(destination) = self.scheduler.tick(dt) {
            self.change_screen(destination);
        }

        match self.scheduler.screen() {
            Screen::Start => {
                if !self.input_blocked() && input.pressed(GameKey::Start) {
                    self.begin_game();
                }
            }
            Screen::Gameplay => self.update_gameplay(dt, input),
            Screen::Loss | Screen::Win => {
                if !self.input_blocked() && input.pressed(GameKey::Restart) {
                    self.begin_game();
                }
            }
        }
    }

    fn update_gameplay(&mut self, dt: f32, input: &FrameInput) {
        if !self.input_blocked() {
            let (dx, dy) = input.direction();
            if self.apply_move(dx, dy) {
                self.spawn_piece();
            }
        }

        self.board.tick_animations(dt);
    }

    /// Shift the board by a movement vector; returns whether anything changed.
    ///
    /// Producing the maximum tile schedules the win screen. This does not
    /// check input blocking, `update` does.
    pub fn apply_move(&mut self, dx: i8, dy: i8) -> bool {
        let ShiftOutcome {
            changed,
            reached_max,
        } = self
            .board
            .shift_vector(dx, dy, &self.grid, self.config.merge_policy);

        if reached_max {
            self.schedule_screen(Screen::Win);
        }
        changed
    }

    /// Spawn one tile and check whether the game is lost
    pub fn spawn_piece(&mut self) {
        match self.board.spawn(&mut self.rng) {
            Ok(_) => self.check_terminal(),
            Err(err) => error!(%err, "spawn skipped"),
        }
    }

    /// Schedule the loss screen when no move is left
    pub fn check_terminal(&mut self) {
        if self.board.is_stuck() {
            self.schedule_screen(Screen::Loss);
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1, SessionConfig::default())
    }
}

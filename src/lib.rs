//! Pico Pong - a fixed-tick paddle and ball game for small displays
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, opponent, score)
//! - `input`: Button mapping and the exit gesture debouncer
//! - `renderer`: Full-frame draw calls against an external canvas
//! - `platform`: Canvas/buttons/clock abstraction plus native and headless backends
//! - `settings`: Game configuration, presets and validation
//! - `game`: The tick loop and its run/terminate state machine

pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, GameResult, TerminationReason, run};
pub use settings::{ConfigError, GameConfig, GameMode, Preset};

/// Reference tuning constants (the device variant's values)
pub mod consts {
    /// Display dimensions
    pub const COURT_WIDTH: i32 = 320;
    pub const COURT_HEIGHT: i32 = 240;
    /// Largest accepted court side
    pub const MAX_COURT_SIDE: i32 = 4096;

    /// Paddle defaults (extent along the track, thickness across it)
    pub const PADDLE_EXTENT: i32 = 60;
    pub const PADDLE_THICKNESS: i32 = 10;
    pub const PADDLE_SPEED: i32 = 10;
    /// Gap between the goal edge and the paddle's outer face
    pub const PADDLE_INSET: i32 = 10;

    /// Ball defaults
    pub const BALL_SIZE: i32 = 5;
    pub const BALL_SPEED: i32 = 8;

    /// Opponent step per tick
    pub const AI_SPEED: i32 = 3;

    /// First to this many points wins
    pub const WIN_SCORE: u32 = 11;

    /// Exit gesture timings
    pub const TRIPLE_PRESS_WINDOW_MS: u64 = 500;
    pub const TRIPLE_PRESS_COUNT: u32 = 3;
    pub const DUAL_HOLD_THRESHOLD_MS: u64 = 2000;

    /// Loop cadence
    pub const DEVICE_TICK_MS: u64 = 30;
    pub const ARCADE_TICK_MS: u64 = 50;
    /// Settle delay after a mode-select press
    pub const MODE_SELECT_SETTLE_MS: u64 = 200;

    /// Score text placement
    pub const SCORE_MARGIN: i32 = 10;
    pub const SCORE_TEXT_SCALE: u32 = 2;
    pub const MAX_TEXT_SCALE: u32 = 16;
}

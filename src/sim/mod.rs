//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Fixed increments per tick only
//! - Integer positions and velocities
//! - Fixed evaluation order (Home before Away)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod state;
pub mod tick;

pub use ai::{drive_opponent, track_ball};
pub use collision::{deflection_speed, resolve_paddle_collision, resolve_wall_collision};
pub use state::{Ball, Court, GameState, Paddle, Score, Side};
pub use tick::{
    PaddleInput, TickEvents, TickInput, advance, apply_paddle_input, check_game_over,
    resolve_paddles, resolve_scoring, tick,
};

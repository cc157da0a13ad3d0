//! Fixed-step simulation tick
//!
//! One call advances the game by exactly one tick: paddles, ball, walls,
//! paddle hits, scoring, then the opponent.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::ai::drive_opponent;
use super::collision::{resolve_paddle_collision, resolve_wall_collision};
use super::state::{GameState, Score, Side};
use crate::settings::{GameMode, Layout};

/// Movement buttons for one paddle in one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleInput {
    pub decrement: bool,
    pub increment: bool,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub home: PaddleInput,
    /// Ignored in single-player mode
    pub away: PaddleInput,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub wall_bounce: bool,
    pub paddle_hit: Option<Side>,
    pub scored: Option<Side>,
}

/// Apply one paddle's buttons: decrement first, then increment, each clamped
pub fn apply_paddle_input(state: &mut GameState, side: Side, input: PaddleInput) {
    let speed = state.paddle(side).speed;
    if input.decrement {
        state.shift_paddle(side, -speed);
    }
    if input.increment {
        state.shift_paddle(side, speed);
    }
}

/// Integrate ball position by its velocity
pub fn advance(state: &mut GameState) {
    state.ball.pos += state.ball.vel;
}

/// Bounce off whichever paddle the ball is touching
pub fn resolve_paddles(state: &mut GameState) -> Option<Side> {
    let layout = state.layout();
    let mut hit = None;
    for side in [Side::Home, Side::Away] {
        let paddle = *state.paddle(side);
        if resolve_paddle_collision(
            &mut state.ball,
            &paddle,
            layout,
            state.deflection,
            state.return_speed,
        ) {
            hit = Some(side);
        }
    }
    hit
}

/// Award a point if the ball is past a goal line, then re-serve.
/// Returns the side that scored.
pub fn resolve_scoring(state: &mut GameState) -> Option<Side> {
    let across = state.layout().perpendicular(state.ball.pos);
    let depth = state.court.depth();

    // Past the goal line at the origin end, or past the far one
    let missed = if across < 0 {
        Some(match state.layout() {
            Layout::HorizontalGoals => Side::Away,
            Layout::VerticalGoals => Side::Home,
        })
    } else if across > depth {
        Some(match state.layout() {
            Layout::HorizontalGoals => Side::Home,
            Layout::VerticalGoals => Side::Away,
        })
    } else {
        None
    };

    let scorer = missed?.opponent();
    state.score.award(scorer);
    debug!(
        "{:?} scores ({} - {})",
        scorer, state.score.home, state.score.away
    );
    state.reset_ball();
    Some(scorer)
}

/// Winner once either score reaches `win_score`; never with `None`
pub fn check_game_over(score: &Score, win_score: Option<u32>) -> Option<Side> {
    win_score.and_then(|target| score.winner(target))
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput, mode: GameMode) -> TickEvents {
    state.time_ticks += 1;

    apply_paddle_input(state, Side::Home, input.home);
    if mode == GameMode::TwoPlayer {
        apply_paddle_input(state, Side::Away, input.away);
    }

    advance(state);
    let wall_bounce = resolve_wall_collision(&mut state.ball, &state.court);
    let paddle_hit = resolve_paddles(state);
    let scored = resolve_scoring(state);

    if mode == GameMode::SinglePlayerAI {
        drive_opponent(state);
    }

    trace!(
        "tick {} ball={:?} vel={:?} home={} away={}",
        state.time_ticks, state.ball.pos, state.ball.vel, state.home.pos, state.away.pos
    );

    TickEvents {
        wall_bounce,
        paddle_hit,
        scored,
    }
}

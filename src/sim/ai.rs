//! Opponent controller
//!
//! Constant-step tracker: one `ai_speed` step toward the ball's position along
//! the track per tick, no prediction. It can dither by one step around the
//! ball, which is what makes it beatable.

use super::state::{GameState, Paddle, Side};

/// Step `paddle` toward `target` along its track
pub fn track_ball(paddle: &mut Paddle, target: i32, ai_speed: i32, track: i32) {
    let center = paddle.center();
    if center < target {
        paddle.shift(ai_speed, track);
    } else if center > target {
        paddle.shift(-ai_speed, track);
    }
}

/// Drive the Away paddle toward the ball
pub fn drive_opponent(state: &mut GameState) {
    let target = state.layout().parallel(state.ball.pos);
    let track = state.court.track_length();
    let ai_speed = state.ai_speed;
    track_ball(state.paddle_mut(Side::Away), target, ai_speed, track);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Preset;
    use glam::IVec2;

    #[test]
    fn test_moves_toward_ball_by_fixed_step() {
        let mut state = GameState::new(&Preset::PicoDisplay.config());
        assert_eq!(state.away.center(), 160);

        state.ball.pos = IVec2::new(200, 50);
        drive_opponent(&mut state);
        assert_eq!(state.away.pos, 133);

        state.ball.pos = IVec2::new(20, 50);
        drive_opponent(&mut state);
        assert_eq!(state.away.pos, 130);
    }

    #[test]
    fn test_holds_still_when_centered() {
        let mut state = GameState::new(&Preset::PicoDisplay.config());
        state.ball.pos = IVec2::new(160, 50);
        drive_opponent(&mut state);
        assert_eq!(state.away.pos, 130);
    }

    #[test]
    fn test_clamps_at_track_end() {
        let mut state = GameState::new(&Preset::PicoDisplay.config());
        state.away.pos = 259;
        state.ball.pos = IVec2::new(319, 50);
        drive_opponent(&mut state);
        assert_eq!(state.away.pos, 260);
        drive_opponent(&mut state);
        assert_eq!(state.away.pos, 260);
    }

    #[test]
    fn test_oscillates_within_one_step() {
        let mut state = GameState::new(&Preset::PicoDisplay.config());
        state.ball.pos = IVec2::new(171, 50);
        for _ in 0..4 {
            drive_opponent(&mut state);
        }
        // 160 -> 172, then dithers between 169 and 172
        for _ in 0..10 {
            drive_opponent(&mut state);
            let gap = (state.away.center() - 171).abs();
            assert!(gap <= state.ai_speed, "gap {gap}");
        }
    }

    #[test]
    fn test_vertical_layout_tracks_y() {
        let mut state = GameState::new(&Preset::Arcade.config());
        let before = state.away.pos;
        state.ball.pos = IVec2::new(300, 10);
        drive_opponent(&mut state);
        assert_eq!(state.away.pos, before - state.ai_speed);
    }
}

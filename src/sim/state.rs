//! Game state and core simulation types
//!
//! Everything a single run mutates lives in `GameState`; nothing outlives it.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::settings::{Deflection, GameConfig, Layout};

/// Which end of the court a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Bottom paddle (horizontal goals) or left paddle (vertical goals)
    Home,
    /// Top paddle (horizontal goals) or right paddle (vertical goals)
    Away,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    /// Sign of the perpendicular velocity that carries the ball away from
    /// this side's paddle, back into the court
    pub fn into_court(self, layout: Layout) -> i32 {
        match (layout, self) {
            (Layout::HorizontalGoals, Side::Home) => -1,
            (Layout::HorizontalGoals, Side::Away) => 1,
            (Layout::VerticalGoals, Side::Home) => 1,
            (Layout::VerticalGoals, Side::Away) => -1,
        }
    }
}

impl Layout {
    /// Component of `v` along the paddles' axis of freedom
    pub fn parallel(&self, v: IVec2) -> i32 {
        match self {
            Layout::HorizontalGoals => v.x,
            Layout::VerticalGoals => v.y,
        }
    }

    /// Component of `v` along the goal-to-goal axis
    pub fn perpendicular(&self, v: IVec2) -> i32 {
        match self {
            Layout::HorizontalGoals => v.y,
            Layout::VerticalGoals => v.x,
        }
    }

    /// Build a vector from parallel and perpendicular components
    pub fn compose(&self, parallel: i32, perpendicular: i32) -> IVec2 {
        match self {
            Layout::HorizontalGoals => IVec2::new(parallel, perpendicular),
            Layout::VerticalGoals => IVec2::new(perpendicular, parallel),
        }
    }
}

/// Fixed court bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    pub width: i32,
    pub height: i32,
    pub layout: Layout,
}

impl Court {
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.width / 2, self.height / 2)
    }

    /// Length of the axis the paddles slide along
    pub fn track_length(&self) -> i32 {
        self.layout.parallel(IVec2::new(self.width, self.height))
    }

    /// Distance between the two goal lines
    pub fn depth(&self) -> i32 {
        self.layout.perpendicular(IVec2::new(self.width, self.height))
    }
}

/// A paddle sliding along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paddle {
    pub owner: Side,
    /// Leading edge along the axis of freedom, always in `[0, track - extent]`
    pub pos: i32,
    /// Size along the axis of freedom
    pub extent: i32,
    /// Size across the axis of freedom
    pub thickness: i32,
    /// Fixed offset across the axis of freedom (near face, screen coordinates)
    pub cross: i32,
    /// Human movement step per tick
    pub speed: i32,
}

impl Paddle {
    pub fn new(owner: Side, config: &GameConfig) -> Self {
        let track = config.track_length();
        let depth = config.goal_axis_length();
        let extent = config.paddle_extent();
        let thickness = config.paddle_thickness();
        let inset = config.paddle.inset;

        // The goal nearer the origin belongs to Away for horizontal goals
        // (top edge) and to Home for vertical goals (left edge).
        let near_origin = match (config.layout, owner) {
            (Layout::HorizontalGoals, Side::Away) | (Layout::VerticalGoals, Side::Home) => true,
            (Layout::HorizontalGoals, Side::Home) | (Layout::VerticalGoals, Side::Away) => false,
        };
        let cross = if near_origin {
            inset
        } else {
            depth - inset - thickness
        };

        Self {
            owner,
            pos: (track - extent) / 2,
            extent,
            thickness,
            cross,
            speed: config.paddle.speed,
        }
    }

    /// Largest legal `pos` on a track of the given length
    pub fn max_pos(&self, track: i32) -> i32 {
        (track - self.extent).max(0)
    }

    /// Move by `delta`, clamping to the track immediately
    pub fn shift(&mut self, delta: i32, track: i32) {
        self.pos = self.pos.saturating_add(delta).clamp(0, self.max_pos(track));
    }

    pub fn center(&self) -> i32 {
        self.pos + self.extent / 2
    }

    /// Whether `along` lies on the paddle's extent (edges inclusive)
    pub fn spans(&self, along: i32) -> bool {
        (self.pos..=self.pos + self.extent).contains(&along)
    }

    /// Screen rectangle `(x, y, width, height)`
    pub fn rect(&self, layout: Layout) -> (i32, i32, i32, i32) {
        match layout {
            Layout::HorizontalGoals => (self.pos, self.cross, self.extent, self.thickness),
            Layout::VerticalGoals => (self.cross, self.pos, self.thickness, self.extent),
        }
    }
}

/// The ball. Velocity is piecewise-constant between collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: IVec2,
    pub vel: IVec2,
    pub radius: i32,
}

/// Points for each side. Only ever reset by starting a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn award(&mut self, side: Side) {
        match side {
            Side::Home => self.home = self.home.saturating_add(1),
            Side::Away => self.away = self.away.saturating_add(1),
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    /// Side that has reached `win_score`, if any
    pub fn winner(&self, win_score: u32) -> Option<Side> {
        if self.home >= win_score {
            Some(Side::Home)
        } else if self.away >= win_score {
            Some(Side::Away)
        } else {
            None
        }
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub court: Court,
    pub deflection: Deflection,
    pub home: Paddle,
    pub away: Paddle,
    pub ball: Ball,
    pub score: Score,
    /// Velocity the ball is served with after every point
    pub serve_velocity: IVec2,
    /// Speed scalar for angled returns (parallel component at a paddle edge)
    pub return_speed: i32,
    pub ai_speed: i32,
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh state for a validated config
    pub fn new(config: &GameConfig) -> Self {
        let layout = config.layout;
        let court = Court {
            width: config.court.width,
            height: config.court.height,
            layout,
        };

        // Serve toward Home: down for horizontal goals, left for vertical goals
        let speed_x = config.ball.speed_x.saturating_abs();
        let speed_y = config.ball.speed_y.saturating_abs();
        let serve_velocity = match layout {
            Layout::HorizontalGoals => IVec2::new(speed_x, speed_y),
            Layout::VerticalGoals => IVec2::new(-speed_x, speed_y),
        };

        Self {
            court,
            deflection: config.deflection,
            home: Paddle::new(Side::Home, config),
            away: Paddle::new(Side::Away, config),
            ball: Ball {
                pos: court.center(),
                vel: serve_velocity,
                radius: config.ball.size,
            },
            score: Score::new(),
            serve_velocity,
            return_speed: config.parallel_ball_speed().saturating_abs(),
            ai_speed: config.ai_speed,
            time_ticks: 0,
        }
    }

    pub fn layout(&self) -> Layout {
        self.court.layout
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    /// Move a paddle by `delta`, clamped to the track
    pub fn shift_paddle(&mut self, side: Side, delta: i32) {
        let track = self.court.track_length();
        self.paddle_mut(side).shift(delta, track);
    }

    /// Ball back to center with the serve velocity. Paddles stay put.
    pub fn reset_ball(&mut self) {
        self.ball.pos = self.court.center();
        self.ball.vel = self.serve_velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Preset;

    #[test]
    fn test_horizontal_layout_matches_device_geometry() {
        let state = GameState::new(&Preset::PicoDisplay.config());
        assert_eq!(state.home.pos, 130);
        assert_eq!(state.away.pos, 130);
        assert_eq!(state.home.cross, 220);
        assert_eq!(state.away.cross, 10);
        assert_eq!(state.ball.pos, IVec2::new(160, 120));
        assert_eq!(state.ball.vel, IVec2::new(8, 8));
        assert_eq!(state.home.rect(Layout::HorizontalGoals), (130, 220, 60, 10));
    }

    #[test]
    fn test_vertical_layout_serves_toward_home() {
        let state = GameState::new(&Preset::Arcade.config());
        assert_eq!(state.home.cross, 10);
        assert_eq!(state.away.cross, 320 - 10 - 10);
        assert_eq!(state.home.pos, (240 - 60) / 2);
        assert!(state.ball.vel.x < 0, "serve should head toward Home (left)");
        assert_eq!(state.home.rect(Layout::VerticalGoals), (10, 90, 10, 60));
    }

    #[test]
    fn test_shift_clamps_at_both_ends() {
        let mut state = GameState::new(&Preset::PicoDisplay.config());
        state.shift_paddle(Side::Home, -1000);
        assert_eq!(state.home.pos, 0);
        state.shift_paddle(Side::Home, 1000);
        assert_eq!(state.home.pos, 260);
        state.shift_paddle(Side::Home, -10);
        assert_eq!(state.home.pos, 250);
    }

    #[test]
    fn test_reset_ball_keeps_paddles_and_score() {
        let mut state = GameState::new(&Preset::PicoDisplay.config());
        state.shift_paddle(Side::Home, -40);
        state.score.award(Side::Away);
        state.ball.pos = IVec2::new(3, 250);
        state.ball.vel = IVec2::new(-5, 8);

        state.reset_ball();

        assert_eq!(state.ball.pos, IVec2::new(160, 120));
        assert_eq!(state.ball.vel, IVec2::new(8, 8));
        assert_eq!(state.home.pos, 90);
        assert_eq!(state.score.away, 1);
    }

    #[test]
    fn test_shift_saturates_instead_of_overflowing() {
        let mut state = GameState::new(&Preset::PicoDisplay.config());
        state.shift_paddle(Side::Home, i32::MAX);
        assert_eq!(state.home.pos, 260);
        state.shift_paddle(Side::Home, i32::MIN);
        assert_eq!(state.home.pos, 0);
    }

    #[test]
    fn test_extreme_ball_speed_does_not_panic_on_construction() {
        let mut config = Preset::PicoDisplay.config();
        config.ball.speed_x = i32::MIN;
        let state = GameState::new(&config);
        assert_eq!(state.serve_velocity.x, i32::MAX);
    }

    #[test]
    fn test_score_winner() {
        let mut score = Score::new();
        for _ in 0..10 {
            score.award(Side::Away);
        }
        assert_eq!(score.winner(11), None);
        score.award(Side::Away);
        assert_eq!(score.winner(11), Some(Side::Away));
        assert_eq!(score.get(Side::Home), 0);
    }

    #[test]
    fn test_layout_axis_helpers() {
        let v = IVec2::new(3, 7);
        for layout in [Layout::HorizontalGoals, Layout::VerticalGoals] {
            let rebuilt = layout.compose(layout.parallel(v), layout.perpendicular(v));
            assert_eq!(rebuilt, v);
        }
        assert_eq!(Layout::VerticalGoals.parallel(v), 7);
    }
}

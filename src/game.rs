//! Loop controller
//!
//! `run` is the whole public surface of the game: it blocks on the caller's
//! thread, owns every bit of per-run state, and hands back a `GameResult`
//! when the game ends. Each tick is input, simulate, opponent, render, then
//! a fixed sleep; the sleep is not shortened to absorb render cost.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::input::{InputMapper, select_mode};
use crate::platform::{ButtonState, Buttons, Canvas, Clock};
use crate::renderer::{draw_frame, draw_mode_select};
use crate::settings::{ConfigError, GameConfig, GameMode, ModeSetting};
use crate::sim::{self, GameState, Side};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// A side reached the win score
    GameOver,
    /// The player performed the exit gesture
    ExitGesture,
}

/// Final report of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub home: u32,
    pub away: u32,
    pub reason: TerminationReason,
    pub mode: GameMode,
    /// Simulation ticks executed
    pub ticks: u64,
    /// Set only for `GameOver`
    pub winner: Option<Side>,
}

/// Loop states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Waiting for a mode-select press
    ModeSelect,
    Running(GameMode),
    Terminated(GameResult),
}

/// One game in progress
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    mode: GameMode,
    state: GameState,
    input: InputMapper,
}

impl Game {
    pub fn new(config: &GameConfig, mode: GameMode) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, mode))
    }

    // Caller has already validated `config`
    fn build(config: &GameConfig, mode: GameMode) -> Self {
        Self {
            config: config.clone(),
            mode,
            state: GameState::new(config),
            input: InputMapper::new(config.controls, mode, config.exit_gesture),
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input(&self) -> &InputMapper {
        &self.input
    }

    /// One pass of the tick pipeline, without the sleep.
    ///
    /// The exit gesture ends the run before anything moves; a winning point
    /// is still drawn before the run ends.
    pub fn tick<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        buttons: ButtonState,
        now_ms: u64,
    ) -> Option<TerminationReason> {
        let mapped = self.input.map(buttons, now_ms);
        if mapped.exit {
            debug!("exit gesture at {}ms", now_ms);
            return Some(TerminationReason::ExitGesture);
        }

        sim::tick(&mut self.state, &mapped.tick, self.mode);
        draw_frame(canvas, &self.state, &self.config.theme);

        sim::check_game_over(&self.state.score, self.config.win_score)
            .map(|_| TerminationReason::GameOver)
    }

    pub fn result(&self, reason: TerminationReason) -> GameResult {
        let score = self.state.score;
        let winner = match reason {
            TerminationReason::GameOver => {
                sim::check_game_over(&score, self.config.win_score)
            }
            TerminationReason::ExitGesture => None,
        };
        GameResult {
            home: score.home,
            away: score.away,
            reason,
            mode: self.mode,
            ticks: self.state.time_ticks,
            winner,
        }
    }
}

/// Run one game to completion on the caller's collaborators.
///
/// The config is checked before anything is drawn. Nothing survives the
/// call except the returned result.
pub fn run<C, B, K>(
    mut canvas: C,
    mut buttons: B,
    mut clock: K,
    config: &GameConfig,
) -> Result<GameResult, ConfigError>
where
    C: Canvas,
    B: Buttons,
    K: Clock,
{
    config.validate()?;
    info!(
        "starting game: {:?} {:?}, win score {:?}",
        config.layout, config.mode, config.win_score
    );

    let mut phase = match config.mode {
        ModeSetting::Fixed(mode) => LoopState::Running(mode),
        ModeSetting::SelectAtRuntime => LoopState::ModeSelect,
    };
    let mut game: Option<Game> = None;

    loop {
        phase = match phase {
            LoopState::ModeSelect => {
                draw_mode_select(&mut canvas, &config.controls, &config.theme);
                match select_mode(buttons.sample(), &config.controls) {
                    Some(mode) => {
                        info!("mode selected: {:?}", mode);
                        clock.sleep_ms(config.mode_select_settle_ms);
                        LoopState::Running(mode)
                    }
                    None => {
                        clock.sleep_ms(config.tick_ms);
                        LoopState::ModeSelect
                    }
                }
            }
            LoopState::Running(mode) => {
                let game = game.get_or_insert_with(|| Game::build(config, mode));
                let now = clock.now_ms();
                let pressed = buttons.sample();
                match game.tick(&mut canvas, pressed, now) {
                    Some(reason) => LoopState::Terminated(game.result(reason)),
                    None => {
                        clock.sleep_ms(config.tick_ms);
                        LoopState::Running(mode)
                    }
                }
            }
            LoopState::Terminated(result) => {
                info!(
                    "game ended: {:?} after {} ticks ({} - {})",
                    result.reason, result.ticks, result.home, result.away
                );
                return Ok(result);
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ExitGestureTracker;
    use crate::platform::{Button, ManualClock, RecordingCanvas, ScriptedButtons};
    use crate::settings::{ExitGesture, Preset};
    use glam::IVec2;

    fn y() -> ButtonState {
        ButtonState::NONE.with(Button::Y)
    }

    #[test]
    fn test_triple_press_ends_run_before_third_tick_simulates() {
        let config = Preset::PicoDisplay.config();
        let mut canvas = RecordingCanvas::new();
        let buttons = ScriptedButtons::new([y(), y(), y()]);

        let result =
            run(&mut canvas, buttons, ManualClock::new(0), &config).expect("valid config");

        assert_eq!(result.reason, TerminationReason::ExitGesture);
        assert_eq!(result.ticks, 2);
        assert_eq!(result.winner, None);
        assert_eq!(canvas.frames(), 2);
    }

    #[test]
    fn test_slow_presses_never_exit() {
        let mut config = Preset::PicoDisplay.config();
        config.win_score = Some(3);
        // One Y press every 17 ticks (510ms) until the game ends on score
        let script = (0..2000).map(|i| if i % 17 == 0 { y() } else { ButtonState::NONE });
        let buttons = ScriptedButtons::new(script);

        let result = run(RecordingCanvas::new(), buttons, ManualClock::new(0), &config)
            .expect("valid config");
        assert_eq!(result.reason, TerminationReason::GameOver);
    }

    #[test]
    fn test_first_point_ends_game_at_win_score_one() {
        let mut config = Preset::PicoDisplay.config();
        config.win_score = Some(1);
        let mut canvas = RecordingCanvas::new();

        let result = run(
            &mut canvas,
            ScriptedButtons::default(),
            ManualClock::new(0),
            &config,
        )
        .expect("valid config");

        // Serve (8, 8) from center misses the centered Home paddle on tick 16
        assert_eq!(result.reason, TerminationReason::GameOver);
        assert_eq!(result.ticks, 16);
        assert_eq!((result.home, result.away), (0, 1));
        assert_eq!(result.winner, Some(Side::Away));
        // The winning point is on screen
        assert_eq!(canvas.frames(), 16);
        assert_eq!(canvas.last_frame_text(), vec!["0", "1"]);
    }

    #[test]
    fn test_game_over_regardless_of_other_score() {
        let config = Preset::PicoDisplay.config();
        let mut game = Game::new(&config, GameMode::TwoPlayer).expect("valid config");
        let mut canvas = RecordingCanvas::new();
        {
            let state = game.state_mut();
            state.score.home = 10;
            state.score.away = 10;
            state.home.pos = 0;
            state.ball.pos = IVec2::new(300, 5);
            state.ball.vel = IVec2::new(0, -8);
        }

        let reason = game.tick(&mut canvas, ButtonState::NONE, 0);
        assert_eq!(reason, Some(TerminationReason::GameOver));
        let result = game.result(TerminationReason::GameOver);
        assert_eq!(result.home, 11);
        assert_eq!(result.winner, Some(Side::Home));
    }

    #[test]
    fn test_endless_game_only_stops_on_gesture() {
        let config = Preset::Arcade.config();
        let hold = ButtonState::NONE.with(Button::A).with(Button::B);
        // Select single player, idle for a long time, then hold the exit pair
        let buttons = ScriptedButtons::new([ButtonState::NONE.with(Button::A)])
            .hold(ButtonState::NONE, 3000)
            .then(hold);
        let mut clock = ManualClock::new(0);

        let result =
            run(RecordingCanvas::new(), buttons, &mut clock, &config).expect("valid config");

        assert_eq!(result.reason, TerminationReason::ExitGesture);
        assert_eq!(result.mode, GameMode::SinglePlayerAI);
        assert_eq!(result.winner, None);
        assert!(result.home + result.away > 11, "scores never end the game");
        // 41 ticks of 50ms pass before the hold exceeds 2000ms
        assert_eq!(result.ticks, 3000 + 41);
    }

    #[test]
    fn test_mode_select_waits_for_press() {
        let config = Preset::Arcade.config();
        let mut canvas = RecordingCanvas::new();
        let two = ButtonState::NONE.with(config.controls.select_two);
        let hold = ButtonState::NONE.with(Button::A).with(Button::B);
        let buttons = ScriptedButtons::new([ButtonState::NONE; 4])
            .hold(two, 1)
            .then(hold);
        let mut clock = ManualClock::new(0);

        let result = run(&mut canvas, buttons, &mut clock, &config).expect("valid config");

        assert_eq!(result.mode, GameMode::TwoPlayer);
        assert_eq!(result.reason, TerminationReason::ExitGesture);
        // 5 select frames, then ticks until the hold passes 2000ms
        assert_eq!(canvas.frames(), 5 + result.ticks);
        assert_eq!(clock.now_ms(), 4 * 50 + 200 + 41 * 50);
    }

    #[test]
    fn test_degenerate_config_is_rejected_before_drawing() {
        let mut config = Preset::PicoDisplay.config();
        config.paddle.width = 400;
        let mut canvas = RecordingCanvas::new();

        let err = run(
            &mut canvas,
            ScriptedButtons::default(),
            ManualClock::new(0),
            &config,
        )
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::PaddleTooLong {
                extent: 400,
                track: 320
            }
        );
        assert_eq!(canvas.frames(), 0);
        assert!(Game::new(&config, GameMode::TwoPlayer).is_err());
    }

    #[test]
    fn test_two_player_moves_both_paddles() {
        let mut config = Preset::PicoDisplay.config();
        config.exit_gesture = ExitGesture::TriplePress {
            button: Button::Y,
            window_ms: 500,
            edge_triggered: true,
        };
        let mut game = Game::new(&config, GameMode::TwoPlayer).expect("valid config");
        let mut canvas = RecordingCanvas::new();
        let buttons = ButtonState::NONE
            .with(config.controls.home_decrement)
            .with(config.controls.away_increment);

        assert_eq!(game.tick(&mut canvas, buttons, 0), None);
        assert_eq!(game.state().home.pos, 120);
        assert_eq!(game.state().away.pos, 140);
        assert!(matches!(
            game.input().exit_tracker(),
            ExitGestureTracker::TriplePress { count: 0, .. }
        ));
    }
}

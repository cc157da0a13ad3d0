//! Game configuration and compiled-in presets
//!
//! Everything the loop needs is decided here before a run starts. A config
//! is validated once, up front, so the simulation never has to guard
//! against degenerate clamp ranges or a stalled ball.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::platform::{Button, Color};

/// Which participants control the paddles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Home is human, Away is driven by the opponent controller
    SinglePlayerAI,
    /// Both paddles are human
    TwoPlayer,
}

/// Mode policy for a run: fixed, or picked on a select screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeSetting {
    Fixed(GameMode),
    SelectAtRuntime,
}

/// Where the goals sit, which fixes the paddles' axis of freedom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Layout {
    /// Paddles span the bottom (Home) and top (Away) edges and slide along x
    #[default]
    HorizontalGoals,
    /// Paddles span the left (Home) and right (Away) edges and slide along y
    VerticalGoals,
}

/// How a paddle hit changes the ball's velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deflection {
    /// Parallel component recomputed from the contact offset
    Angled,
    /// Only the perpendicular component's sign is forced
    SignOnly,
}

impl Layout {
    /// Deflection policy each layout uses unless overridden
    pub fn default_deflection(&self) -> Deflection {
        match self {
            Layout::HorizontalGoals => Deflection::SignOnly,
            Layout::VerticalGoals => Deflection::Angled,
        }
    }
}

/// Loop termination gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitGesture {
    /// Three qualifying presses of one button, each within `window_ms` of the last
    TriplePress {
        button: Button,
        window_ms: u64,
        /// Count only released-to-pressed transitions instead of every pressed tick
        #[serde(default)]
        edge_triggered: bool,
    },
    /// Two buttons held together for longer than `threshold_ms`
    DualHold {
        buttons: [Button; 2],
        threshold_ms: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtConfig {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleConfig {
    pub width: i32,
    pub height: i32,
    pub speed: i32,
    /// Distance from the goal edge to the paddle's outer face
    pub inset: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallConfig {
    /// Radius in display units
    pub size: i32,
    pub speed_x: i32,
    pub speed_y: i32,
}

/// Button bindings for the logical controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub home_decrement: Button,
    pub home_increment: Button,
    pub away_decrement: Button,
    pub away_increment: Button,
    pub select_single: Button,
    pub select_two: Button,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            home_decrement: Button::A,
            home_increment: Button::B,
            away_decrement: Button::Left,
            away_increment: Button::Right,
            select_single: Button::A,
            select_two: Button::X,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub score_scale: u32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            foreground: Color::WHITE,
            score_scale: SCORE_TEXT_SCALE,
        }
    }
}

/// Full configuration for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: ModeSetting,
    pub layout: Layout,
    pub deflection: Deflection,
    pub court: CourtConfig,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub ai_speed: i32,
    /// `None` plays until the exit gesture fires
    pub win_score: Option<u32>,
    pub exit_gesture: ExitGesture,
    pub tick_ms: u64,
    pub mode_select_settle_ms: u64,
    pub controls: Controls,
    pub theme: Theme,
}

impl Default for GameConfig {
    fn default() -> Self {
        Preset::PicoDisplay.config()
    }
}

/// Compiled-in configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Horizontal goals, AI opponent, first to 11, triple-press exit
    #[default]
    PicoDisplay,
    /// Vertical goals, mode picked at start, endless, dual-hold exit
    Arcade,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::PicoDisplay => "pico",
            Preset::Arcade => "arcade",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pico" | "pico-display" | "device" => Some(Preset::PicoDisplay),
            "arcade" | "classic" => Some(Preset::Arcade),
            _ => None,
        }
    }

    pub fn config(&self) -> GameConfig {
        match self {
            Preset::PicoDisplay => GameConfig {
                mode: ModeSetting::Fixed(GameMode::SinglePlayerAI),
                layout: Layout::HorizontalGoals,
                deflection: Layout::HorizontalGoals.default_deflection(),
                court: CourtConfig {
                    width: COURT_WIDTH,
                    height: COURT_HEIGHT,
                },
                paddle: PaddleConfig {
                    width: PADDLE_EXTENT,
                    height: PADDLE_THICKNESS,
                    speed: PADDLE_SPEED,
                    inset: PADDLE_INSET,
                },
                ball: BallConfig {
                    size: BALL_SIZE,
                    speed_x: BALL_SPEED,
                    speed_y: BALL_SPEED,
                },
                ai_speed: AI_SPEED,
                win_score: Some(WIN_SCORE),
                exit_gesture: ExitGesture::TriplePress {
                    button: Button::Y,
                    window_ms: TRIPLE_PRESS_WINDOW_MS,
                    edge_triggered: false,
                },
                tick_ms: DEVICE_TICK_MS,
                mode_select_settle_ms: MODE_SELECT_SETTLE_MS,
                controls: Controls::default(),
                theme: Theme::default(),
            },
            Preset::Arcade => GameConfig {
                mode: ModeSetting::SelectAtRuntime,
                layout: Layout::VerticalGoals,
                deflection: Layout::VerticalGoals.default_deflection(),
                court: CourtConfig {
                    width: COURT_WIDTH,
                    height: COURT_HEIGHT,
                },
                paddle: PaddleConfig {
                    width: PADDLE_THICKNESS,
                    height: PADDLE_EXTENT,
                    speed: PADDLE_SPEED,
                    inset: PADDLE_INSET,
                },
                ball: BallConfig {
                    size: BALL_SIZE,
                    speed_x: BALL_SPEED,
                    speed_y: BALL_SPEED / 2,
                },
                ai_speed: AI_SPEED,
                win_score: None,
                exit_gesture: ExitGesture::DualHold {
                    buttons: [Button::A, Button::B],
                    threshold_ms: DUAL_HOLD_THRESHOLD_MS,
                },
                tick_ms: ARCADE_TICK_MS,
                mode_select_settle_ms: MODE_SELECT_SETTLE_MS,
                controls: Controls {
                    home_decrement: Button::Up,
                    home_increment: Button::Down,
                    away_decrement: Button::X,
                    away_increment: Button::Y,
                    select_single: Button::A,
                    select_two: Button::B,
                },
                theme: Theme::default(),
            },
        }
    }
}

/// A configuration the engine refuses to run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("court must have positive size, got {width}x{height}")]
    EmptyCourt { width: i32, height: i32 },
    #[error("court sides must be at most {max}, got {width}x{height}")]
    CourtTooLarge { width: i32, height: i32, max: i32 },
    #[error("paddle extent {extent} does not fit track length {track}")]
    PaddleTooLong { extent: i32, track: i32 },
    #[error("paddle thickness {thickness} plus inset {inset} does not fit half the court ({half})")]
    PaddleTooThick { thickness: i32, inset: i32, half: i32 },
    #[error("paddle dimensions and speed must be positive")]
    StalledPaddle,
    #[error("ball size must be positive and smaller than the court")]
    BadBallSize,
    #[error("ball speed components must be non-zero, got ({0}, {1})")]
    StalledBall(i32, i32),
    #[error("opponent speed must be positive, got {0}")]
    StalledOpponent(i32),
    #[error("{what} speed {speed} must stay below {limit}")]
    SpeedOutOfRange {
        what: &'static str,
        speed: i32,
        limit: i32,
    },
    #[error("text scale must be in 1..={max}, got {scale}")]
    BadTextScale { scale: u32, max: u32 },
    #[error("tick interval must be non-zero")]
    ZeroTick,
    #[error("win score must be at least 1")]
    ZeroWinScore,
    #[error("exit gesture timing must be non-zero")]
    ZeroGestureWindow,
    #[error("dual-hold exit needs two distinct buttons, got {0:?} twice")]
    SameHoldButtons(Button),
}

impl GameConfig {
    /// Length of the axis the paddles slide along
    pub fn track_length(&self) -> i32 {
        match self.layout {
            Layout::HorizontalGoals => self.court.width,
            Layout::VerticalGoals => self.court.height,
        }
    }

    /// Length of the axis between the two goals
    pub fn goal_axis_length(&self) -> i32 {
        match self.layout {
            Layout::HorizontalGoals => self.court.height,
            Layout::VerticalGoals => self.court.width,
        }
    }

    /// Paddle size along its axis of freedom
    pub fn paddle_extent(&self) -> i32 {
        match self.layout {
            Layout::HorizontalGoals => self.paddle.width,
            Layout::VerticalGoals => self.paddle.height,
        }
    }

    /// Paddle size across its axis of freedom
    pub fn paddle_thickness(&self) -> i32 {
        match self.layout {
            Layout::HorizontalGoals => self.paddle.height,
            Layout::VerticalGoals => self.paddle.width,
        }
    }

    /// Ball speed scalar used for angled returns (the parallel component)
    pub fn parallel_ball_speed(&self) -> i32 {
        match self.layout {
            Layout::HorizontalGoals => self.ball.speed_x,
            Layout::VerticalGoals => self.ball.speed_y,
        }
    }

    /// Reject configs the simulation cannot run. Every check is written so
    /// it cannot overflow, whatever the field values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let CourtConfig { width, height } = self.court;
        if width <= 0 || height <= 0 {
            return Err(ConfigError::EmptyCourt { width, height });
        }
        if width > MAX_COURT_SIDE || height > MAX_COURT_SIDE {
            return Err(ConfigError::CourtTooLarge {
                width,
                height,
                max: MAX_COURT_SIDE,
            });
        }
        if self.paddle.width <= 0 || self.paddle.height <= 0 || self.paddle.speed <= 0 {
            return Err(ConfigError::StalledPaddle);
        }

        let track = self.track_length();
        let extent = self.paddle_extent();
        if extent >= track {
            return Err(ConfigError::PaddleTooLong { extent, track });
        }
        if self.paddle.speed >= track {
            return Err(ConfigError::SpeedOutOfRange {
                what: "paddle",
                speed: self.paddle.speed,
                limit: track,
            });
        }

        // `inset` is in `0..half` before the subtraction
        let half = self.goal_axis_length() / 2;
        let thickness = self.paddle_thickness();
        let inset = self.paddle.inset;
        if inset < 0 || inset >= half || thickness >= half - inset {
            return Err(ConfigError::PaddleTooThick {
                thickness,
                inset,
                half,
            });
        }

        if self.ball.size <= 0 || self.ball.size >= width.min(height) / 2 {
            return Err(ConfigError::BadBallSize);
        }
        let BallConfig {
            speed_x, speed_y, ..
        } = self.ball;
        if speed_x == 0 || speed_y == 0 {
            return Err(ConfigError::StalledBall(speed_x, speed_y));
        }
        for (what, speed, limit) in [("ball x", speed_x, width), ("ball y", speed_y, height)] {
            if speed.unsigned_abs() >= limit.unsigned_abs() {
                return Err(ConfigError::SpeedOutOfRange { what, speed, limit });
            }
        }

        if self.ai_speed <= 0 {
            return Err(ConfigError::StalledOpponent(self.ai_speed));
        }
        if self.ai_speed >= track {
            return Err(ConfigError::SpeedOutOfRange {
                what: "opponent",
                speed: self.ai_speed,
                limit: track,
            });
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.win_score == Some(0) {
            return Err(ConfigError::ZeroWinScore);
        }
        if !(1..=MAX_TEXT_SCALE).contains(&self.theme.score_scale) {
            return Err(ConfigError::BadTextScale {
                scale: self.theme.score_scale,
                max: MAX_TEXT_SCALE,
            });
        }

        match self.exit_gesture {
            ExitGesture::TriplePress { window_ms, .. } if window_ms == 0 => {
                Err(ConfigError::ZeroGestureWindow)
            }
            ExitGesture::DualHold { threshold_ms, .. } if threshold_ms == 0 => {
                Err(ConfigError::ZeroGestureWindow)
            }
            ExitGesture::DualHold { buttons: [a, b], .. } if a == b => {
                Err(ConfigError::SameHoldButtons(a))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert_eq!(Preset::PicoDisplay.config().validate(), Ok(()));
        assert_eq!(Preset::Arcade.config().validate(), Ok(()));
    }

    #[test]
    fn test_preset_names_round_trip() {
        for preset in [Preset::PicoDisplay, Preset::Arcade] {
            assert_eq!(Preset::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(Preset::from_str("ARCADE"), Some(Preset::Arcade));
        assert_eq!(Preset::from_str("nope"), None);
    }

    #[test]
    fn test_axis_helpers_follow_layout() {
        let pico = Preset::PicoDisplay.config();
        assert_eq!(pico.track_length(), 320);
        assert_eq!(pico.paddle_extent(), 60);
        assert_eq!(pico.paddle_thickness(), 10);

        let arcade = Preset::Arcade.config();
        assert_eq!(arcade.track_length(), 240);
        assert_eq!(arcade.paddle_extent(), 60);
        assert_eq!(arcade.paddle_thickness(), 10);
    }

    #[test]
    fn test_rejects_paddle_as_long_as_track() {
        let mut config = GameConfig::default();
        config.paddle.width = config.court.width;
        assert_eq!(
            config.validate(),
            Err(ConfigError::PaddleTooLong {
                extent: 320,
                track: 320
            })
        );
    }

    #[test]
    fn test_rejects_zero_tick_and_zero_speed() {
        let mut config = GameConfig::default();
        config.tick_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTick));

        let mut config = GameConfig::default();
        config.ball.speed_y = 0;
        assert_eq!(config.validate(), Err(ConfigError::StalledBall(8, 0)));

        let mut config = GameConfig::default();
        config.paddle.speed = 0;
        assert_eq!(config.validate(), Err(ConfigError::StalledPaddle));

        let mut config = GameConfig::default();
        config.ai_speed = 0;
        assert_eq!(config.validate(), Err(ConfigError::StalledOpponent(0)));
    }

    #[test]
    fn test_rejects_degenerate_court_and_gestures() {
        let mut config = GameConfig::default();
        config.court.height = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyCourt { .. })
        ));

        let mut config = GameConfig::default();
        config.win_score = Some(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroWinScore));

        let mut config = Preset::Arcade.config();
        config.exit_gesture = ExitGesture::DualHold {
            buttons: [Button::A, Button::A],
            threshold_ms: 2000,
        };
        assert_eq!(config.validate(), Err(ConfigError::SameHoldButtons(Button::A)));

        let mut config = GameConfig::default();
        config.exit_gesture = ExitGesture::TriplePress {
            button: Button::Y,
            window_ms: 0,
            edge_triggered: false,
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroGestureWindow));
    }

    #[test]
    fn test_extreme_values_are_rejected_without_overflow() {
        let mut config = GameConfig::default();
        config.ball.size = i32::MAX;
        assert_eq!(config.validate(), Err(ConfigError::BadBallSize));

        let mut config = GameConfig::default();
        config.paddle.height = i32::MAX;
        config.paddle.inset = i32::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PaddleTooThick { .. })
        ));

        let mut config = GameConfig::default();
        config.paddle.inset = 115;
        config.paddle.height = i32::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PaddleTooThick { .. })
        ));

        let mut config = GameConfig::default();
        config.paddle.speed = i32::MAX;
        assert_eq!(
            config.validate(),
            Err(ConfigError::SpeedOutOfRange {
                what: "paddle",
                speed: i32::MAX,
                limit: 320
            })
        );

        let mut config = GameConfig::default();
        config.ball.speed_x = i32::MIN;
        assert_eq!(
            config.validate(),
            Err(ConfigError::SpeedOutOfRange {
                what: "ball x",
                speed: i32::MIN,
                limit: 320
            })
        );

        let mut config = Preset::Arcade.config();
        config.ball.speed_y = -240;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpeedOutOfRange { what: "ball y", .. })
        ));

        let mut config = GameConfig::default();
        config.ai_speed = i32::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpeedOutOfRange { what: "opponent", .. })
        ));

        let mut config = GameConfig::default();
        config.court.width = i32::MAX;
        config.court.height = i32::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CourtTooLarge { .. })
        ));

        let mut config = GameConfig::default();
        config.theme.score_scale = u32::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BadTextScale { .. })
        ));
    }

    #[test]
    fn test_largest_accepted_values_still_validate() {
        let mut config = GameConfig::default();
        config.paddle.speed = 319;
        config.ai_speed = 319;
        config.ball.speed_x = -319;
        config.ball.speed_y = 239;
        config.ball.size = 119;
        config.theme.score_scale = MAX_TEXT_SCALE;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_config_serializes() {
        let config = Preset::Arcade.config();
        let json = serde_json::to_string(&config).expect("serialize");
        let back: GameConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, config);
    }
}

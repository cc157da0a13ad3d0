//! Pico Pong demo host
//!
//! Runs one game against headless collaborators: a recording canvas, a
//! seeded button masher standing in for the player, and a virtual clock
//! (or the wall clock with `--realtime`). Prints the result as JSON.

use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use pico_pong::platform::{
    Button, ButtonState, Buttons, Clock, ManualClock, RecordingCanvas, SystemClock,
};
use pico_pong::settings::{ExitGesture, GameConfig, ModeSetting};
use pico_pong::{GameMode, GameResult, Preset, run};

/// Runs one game against a seeded button masher and prints the result as JSON
#[derive(Debug, Parser)]
#[command(name = "pico-pong", version, about, long_about = None)]
struct Cli {
    /// Compiled-in configuration to play
    #[arg(value_enum, default_value_t = PresetArg::Pico)]
    preset: PresetArg,

    /// Force the game mode (fixed-mode presets) or the select-screen choice
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Seed for the button masher
    #[arg(short, long, default_value_t = 0x5eed)]
    seed: u64,

    /// Button samples before the masher performs the exit gesture
    #[arg(
        long,
        value_name = "SAMPLES",
        default_value_t = 5000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    exit_after: u64,

    /// Sleep on the wall clock instead of virtual time
    #[arg(long)]
    realtime: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PresetArg {
    #[value(aliases = ["pico-display", "device"])]
    Pico,
    #[value(alias = "classic")]
    Arcade,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Pico => Preset::PicoDisplay,
            PresetArg::Arcade => Preset::Arcade,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    #[value(alias = "1")]
    Single,
    #[value(alias = "2")]
    Two,
}

impl From<ModeArg> for GameMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Single => GameMode::SinglePlayerAI,
            ModeArg::Two => GameMode::TwoPlayer,
        }
    }
}

/// Random presses on the movement buttons, then the exit gesture
struct ButtonMasher {
    rng: Pcg32,
    opening: Option<Button>,
    movement: Vec<Button>,
    gesture: ExitGesture,
    exit_after: u64,
    samples: u64,
}

impl ButtonMasher {
    fn new(config: &GameConfig, mode: Option<GameMode>, seed: u64, exit_after: u64) -> Self {
        let controls = config.controls;
        let gesture_buttons: Vec<Button> = match config.exit_gesture {
            ExitGesture::TriplePress { button, .. } => vec![button],
            ExitGesture::DualHold { buttons, .. } => buttons.to_vec(),
        };
        let mut movement = vec![
            controls.home_decrement,
            controls.home_increment,
            controls.away_decrement,
            controls.away_increment,
        ];
        movement.retain(|b| !gesture_buttons.contains(b));

        let opening = match (config.mode, mode) {
            (ModeSetting::SelectAtRuntime, Some(GameMode::TwoPlayer)) => Some(controls.select_two),
            (ModeSetting::SelectAtRuntime, _) => Some(controls.select_single),
            (ModeSetting::Fixed(_), _) => None,
        };

        Self {
            rng: Pcg32::seed_from_u64(seed),
            opening,
            movement,
            gesture: config.exit_gesture,
            exit_after,
            samples: 0,
        }
    }
}

impl Buttons for ButtonMasher {
    fn sample(&mut self) -> ButtonState {
        self.samples += 1;
        if let Some(select) = self.opening.take() {
            return ButtonState::NONE.with(select);
        }

        if self.samples > self.exit_after {
            return match self.gesture {
                ExitGesture::TriplePress {
                    button,
                    edge_triggered,
                    ..
                } => {
                    // Release between presses so edge-triggered counting sees each one
                    if edge_triggered && self.samples % 2 == 0 {
                        ButtonState::NONE
                    } else {
                        ButtonState::NONE.with(button)
                    }
                }
                ExitGesture::DualHold { buttons, .. } => buttons.into_iter().collect(),
            };
        }

        let mut state = ButtonState::NONE;
        for &button in &self.movement {
            state.set(button, self.rng.random_bool(0.5));
        }
        state
    }
}

#[derive(Debug, Serialize)]
struct Report {
    preset: &'static str,
    seed: u64,
    frames: u64,
    result: GameResult,
}

fn play<K: Clock>(
    config: &GameConfig,
    cli: &Cli,
    clock: K,
) -> Result<(GameResult, u64), Box<dyn Error>> {
    let mut canvas = RecordingCanvas::new();
    let mode = cli.mode.map(GameMode::from);
    let buttons = ButtonMasher::new(config, mode, cli.seed, cli.exit_after);
    let result = run(&mut canvas, buttons, clock, config)?;
    Ok((result, canvas.frames()))
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let preset = Preset::from(cli.preset);
    let mut config = preset.config();
    if let (ModeSetting::Fixed(_), Some(mode)) = (config.mode, cli.mode) {
        config.mode = ModeSetting::Fixed(mode.into());
    }
    log::info!("Pico Pong demo: preset {}", preset.as_str());

    let outcome = if cli.realtime {
        play(&config, &cli, SystemClock::new())
    } else {
        play(&config, &cli, ManualClock::new(0))
    };

    match outcome.and_then(|(result, frames)| {
        let report = Report {
            preset: preset.as_str(),
            seed: cli.seed,
            frames,
            result,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

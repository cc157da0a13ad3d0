//! Input mapping
//!
//! Turns one button snapshot per tick into paddle movement, and watches for
//! the exit gesture. Timing comes from the caller's clock reading for the
//! tick, so a press during the inter-tick sleep is only seen next tick.

use log::debug;

use crate::consts::TRIPLE_PRESS_COUNT;
use crate::platform::{Button, ButtonState};
use crate::settings::{Controls, ExitGesture, GameMode};
use crate::sim::{PaddleInput, TickInput};

/// Debounce state for the loop-termination gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitGestureTracker {
    TriplePress {
        button: Button,
        window_ms: u64,
        edge_triggered: bool,
        /// Qualifying presses in the current burst
        count: u32,
        /// Timestamp of the last qualifying press
        last_press: Option<u64>,
        was_pressed: bool,
    },
    DualHold {
        buttons: [Button; 2],
        threshold_ms: u64,
        /// When both buttons went down, `None` while not holding
        held_since: Option<u64>,
    },
}

impl ExitGestureTracker {
    pub fn new(gesture: ExitGesture) -> Self {
        match gesture {
            ExitGesture::TriplePress {
                button,
                window_ms,
                edge_triggered,
            } => ExitGestureTracker::TriplePress {
                button,
                window_ms,
                edge_triggered,
                count: 0,
                last_press: None,
                was_pressed: false,
            },
            ExitGesture::DualHold {
                buttons,
                threshold_ms,
            } => ExitGestureTracker::DualHold {
                buttons,
                threshold_ms,
                held_since: None,
            },
        }
    }

    /// Feed one tick's buttons. Returns true when the gesture completes.
    ///
    /// Level-triggered triple press counts every tick the button reads
    /// pressed, so holding it through three ticks inside the window also
    /// exits. Set `edge_triggered` to count only fresh presses.
    pub fn update(&mut self, buttons: ButtonState, now_ms: u64) -> bool {
        match self {
            ExitGestureTracker::TriplePress {
                button,
                window_ms,
                edge_triggered,
                count,
                last_press,
                was_pressed,
            } => {
                let pressed = buttons.pressed(*button);
                let qualifies = pressed && !(*edge_triggered && *was_pressed);
                *was_pressed = pressed;
                if !qualifies {
                    return false;
                }

                let within_window = (*last_press)
                    .is_some_and(|last| now_ms.saturating_sub(last) < *window_ms);
                *count = if within_window { *count + 1 } else { 1 };
                *last_press = Some(now_ms);
                debug!("exit press {}/{} at {}ms", count, TRIPLE_PRESS_COUNT, now_ms);

                if *count >= TRIPLE_PRESS_COUNT {
                    *count = 0;
                    *last_press = None;
                    return true;
                }
                false
            }
            ExitGestureTracker::DualHold {
                buttons: [first, second],
                threshold_ms,
                held_since,
            } => {
                if !(buttons.pressed(*first) && buttons.pressed(*second)) {
                    if held_since.take().is_some() {
                        debug!("exit hold released at {}ms", now_ms);
                    }
                    return false;
                }

                let since = *held_since.get_or_insert(now_ms);
                now_ms.saturating_sub(since) > *threshold_ms
            }
        }
    }
}

/// Result of mapping one tick's buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MappedInput {
    pub tick: TickInput,
    pub exit: bool,
}

/// Maps button snapshots onto paddle movement and the exit gesture
#[derive(Debug, Clone)]
pub struct InputMapper {
    controls: Controls,
    mode: GameMode,
    exit: ExitGestureTracker,
}

impl InputMapper {
    pub fn new(controls: Controls, mode: GameMode, gesture: ExitGesture) -> Self {
        Self {
            controls,
            mode,
            exit: ExitGestureTracker::new(gesture),
        }
    }

    pub fn exit_tracker(&self) -> &ExitGestureTracker {
        &self.exit
    }

    pub fn map(&mut self, buttons: ButtonState, now_ms: u64) -> MappedInput {
        let c = &self.controls;
        let home = PaddleInput {
            decrement: buttons.pressed(c.home_decrement),
            increment: buttons.pressed(c.home_increment),
        };
        let away = match self.mode {
            GameMode::TwoPlayer => PaddleInput {
                decrement: buttons.pressed(c.away_decrement),
                increment: buttons.pressed(c.away_increment),
            },
            GameMode::SinglePlayerAI => PaddleInput::default(),
        };

        MappedInput {
            tick: TickInput { home, away },
            exit: self.exit.update(buttons, now_ms),
        }
    }
}

/// Mode chosen on the select screen, if a select button is down.
/// Single-player wins if both are pressed.
pub fn select_mode(buttons: ButtonState, controls: &Controls) -> Option<GameMode> {
    if buttons.pressed(controls.select_single) {
        Some(GameMode::SinglePlayerAI)
    } else if buttons.pressed(controls.select_two) {
        Some(GameMode::TwoPlayer)
    } else {
        None
    }
}

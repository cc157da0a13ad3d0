//! Headless collaborators
//!
//! Deterministic stand-ins for the display, buttons and clock. The demo host
//! runs on them, and so do the loop tests.

use std::collections::VecDeque;

use super::{ButtonState, Buttons, Canvas, Clock, Color};

/// One primitive call against the canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    SetColor(Color),
    Clear,
    FillRect { x: i32, y: i32, width: i32, height: i32 },
    FillCircle { x: i32, y: i32, radius: i32 },
    Text { text: String, x: i32, y: i32, scale: u32 },
}

/// Canvas that keeps the commands of the last presented frame
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pending: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Commands of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    /// All text drawn in the last frame, in draw order
    pub fn last_frame_text(&self) -> Vec<&str> {
        self.last_frame
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn set_color(&mut self, color: Color) {
        self.pending.push(DrawCommand::SetColor(color));
    }

    fn clear(&mut self) {
        self.pending.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.pending.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_circle(&mut self, x: i32, y: i32, radius: i32) {
        self.pending.push(DrawCommand::FillCircle { x, y, radius });
    }

    fn text(&mut self, text: &str, x: i32, y: i32, scale: u32) {
        self.pending.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            scale,
        });
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames += 1;
    }
}

/// Replays a per-sample script, then repeats a fallback state forever
#[derive(Debug, Clone, Default)]
pub struct ScriptedButtons {
    script: VecDeque<ButtonState>,
    fallback: ButtonState,
    samples: u64,
}

impl ScriptedButtons {
    pub fn new(script: impl IntoIterator<Item = ButtonState>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: ButtonState::NONE,
            samples: 0,
        }
    }

    /// State returned once the script runs out
    pub fn then(mut self, fallback: ButtonState) -> Self {
        self.fallback = fallback;
        self
    }

    /// Append `count` samples of `state`
    pub fn hold(mut self, state: ButtonState, count: usize) -> Self {
        self.script.extend(std::iter::repeat_n(state, count));
        self
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }
}

impl Buttons for ScriptedButtons {
    fn sample(&mut self) -> ButtonState {
        self.samples += 1;
        self.script.pop_front().unwrap_or(self.fallback)
    }
}

/// Virtual clock: time only moves when someone sleeps or advances it
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self { now: start_ms }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now = self.now.saturating_add(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> u64 {
        self.now
    }

    fn sleep_ms(&mut self, ms: u64) {
        self.advance(ms);
    }
}

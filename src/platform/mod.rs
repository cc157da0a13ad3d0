//! Platform abstraction layer
//!
//! The game core only ever talks to hardware through these traits:
//! - `Canvas`: primitive draw calls on the display
//! - `Buttons`: one normalized snapshot of the buttons per tick
//! - `Clock`: monotonic milliseconds and the inter-tick sleep
//!
//! Hosts own the real devices and hand them to `game::run`; the core never
//! opens, configures, or releases them.

pub mod headless;
pub mod native;

pub use headless::{DrawCommand, ManualClock, RecordingCanvas, ScriptedButtons};
pub use native::SystemClock;

use serde::{Deserialize, Serialize};

/// RGB pen color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Drawing surface. Draw calls are infallible by contract.
pub trait Canvas {
    fn set_color(&mut self, color: Color);
    /// Fill the whole surface with the current color
    fn clear(&mut self);
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn fill_circle(&mut self, x: i32, y: i32, radius: i32);
    fn text(&mut self, text: &str, x: i32, y: i32, scale: u32);
    /// Push the finished frame to the display
    fn present(&mut self);
}

/// Physical buttons on the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    A,
    B,
    X,
    Y,
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Pressed/released snapshot of every button, already normalized
/// (active-low wiring is the host's concern)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ButtonState(u8);

impl ButtonState {
    pub const NONE: ButtonState = ButtonState(0);

    pub fn pressed(&self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn set(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.0 |= button.bit();
        } else {
            self.0 &= !button.bit();
        }
    }

    /// Builder form of `set(button, true)`
    pub fn with(mut self, button: Button) -> Self {
        self.set(button, true);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Button> for ButtonState {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        iter.into_iter().fold(ButtonState::NONE, ButtonState::with)
    }
}

/// Source of button snapshots
pub trait Buttons {
    fn sample(&mut self) -> ButtonState;
}

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&mut self) -> u64;
    fn sleep_ms(&mut self, ms: u64);
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn set_color(&mut self, color: Color) {
        (**self).set_color(color)
    }
    fn clear(&mut self) {
        (**self).clear()
    }
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        (**self).fill_rect(x, y, width, height)
    }
    fn fill_circle(&mut self, x: i32, y: i32, radius: i32) {
        (**self).fill_circle(x, y, radius)
    }
    fn text(&mut self, text: &str, x: i32, y: i32, scale: u32) {
        (**self).text(text, x, y, scale)
    }
    fn present(&mut self) {
        (**self).present()
    }
}

impl<B: Buttons + ?Sized> Buttons for &mut B {
    fn sample(&mut self) -> ButtonState {
        (**self).sample()
    }
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now_ms(&mut self) -> u64 {
        (**self).now_ms()
    }
    fn sleep_ms(&mut self, ms: u64) {
        (**self).sleep_ms(ms)
    }
}
